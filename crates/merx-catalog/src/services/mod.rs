//! # Business Services
//!
//! The three catalog services and their public traits. Hosts depend on
//! the traits ([`Categories`], [`Products`], [`Users`]); the structs are
//! the default implementations wired over a repository and a shared
//! aspect [`Pipeline`](merx_core::Pipeline).

mod category;
mod product;
mod user;

pub use category::{Categories, CategoryService};
pub use product::{ProductService, ProductServiceConfig, Products, CATEGORY_FLOOR};
pub use user::{UserService, Users};
