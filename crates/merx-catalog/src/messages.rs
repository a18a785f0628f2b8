//! User-facing message constants returned inside result envelopes.
//!
//! Kept in one place so the hosting layer (and tests) can match on exact
//! text without chasing string literals through the services.

pub const PRODUCT_ADDED: &str = "Product added";
pub const PRODUCTS_ADDED: &str = "Products added";
pub const PRODUCT_UPDATED: &str = "Product updated";
pub const PRODUCT_DELETED: &str = "Product deleted";
pub const PRODUCT_NAME_ALREADY_EXISTS: &str = "Product name already exists";

/// Example domain rule: the catalog wants a minimum number of enabled
/// categories before products may be added.
pub const CATEGORY_FLOOR_NOT_MET: &str =
    "At least 10 categories must be enabled before adding products";

pub const CATEGORY_ADDED: &str = "Category added";
pub const CATEGORY_UPDATED: &str = "Category updated";
pub const CATEGORY_DELETED: &str = "Category deleted";

pub const USER_ADDED: &str = "User added";
pub const USER_EMAIL_ALREADY_EXISTS: &str = "User email already exists";
