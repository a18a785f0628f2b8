//! Product service: the most decorated of the three services.
//!
//! ## Per-Method Aspect Plans
//! ```text
//! add                   Validation + CacheInvalidate("ProductService.get")
//! update                Validation + CacheInvalidate
//! delete                CacheInvalidate
//! add_batch             CacheInvalidate + Transaction (all-or-nothing)
//! get_list              Performance (warn past 5s)
//! get_list_by_category  Cache (60s TTL) + Logging
//! get_by_id             undecorated pass-through
//! ```
//!
//! Domain rules on `add`: the product name must be free, and the catalog
//! must have at least [`CATEGORY_FLOOR`] enabled categories. The category
//! count is consulted through the public [`Categories`] contract, never
//! through its repository.

use std::sync::Arc;
use std::time::Duration;

use merx_core::aspects::{AspectPlan, AspectSpec, Invocation, Pipeline};
use merx_core::error::OpResult;
use merx_core::results::{ActionResult, DataResult};
use merx_core::rules;
use uuid::Uuid;

use crate::data_access::Repository;
use crate::entities::Product;
use crate::messages;
use crate::services::Categories;

const SERVICE: &str = "ProductService";

/// Cache-key prefix shared by every cached read operation; mutating
/// operations invalidate the whole prefix (coarse invalidation).
const READ_PREFIX: &str = "ProductService.get";

/// Minimum number of enabled categories before products may be added.
pub const CATEGORY_FLOOR: usize = 10;

/// Public contract of the product service.
pub trait Products: Send + Sync {
    fn add(&self, product: &Product) -> OpResult<ActionResult>;
    fn add_batch(&self, products: &[Product]) -> OpResult<ActionResult>;
    fn update(&self, product: &Product) -> OpResult<ActionResult>;
    fn delete(&self, product: &Product) -> OpResult<ActionResult>;
    fn get_by_id(&self, product_id: Uuid) -> OpResult<DataResult<Product>>;
    fn get_list(&self) -> OpResult<DataResult<Vec<Product>>>;
    fn get_list_by_category(&self, category_id: Uuid) -> OpResult<DataResult<Vec<Product>>>;
}

/// Tuning knobs for the decorated operations.
#[derive(Debug, Clone)]
pub struct ProductServiceConfig {
    /// TTL of cached read results.
    pub cache_ttl: Duration,

    /// Performance-aspect warning threshold for `get_list`.
    pub slow_threshold: Duration,
}

impl Default for ProductServiceConfig {
    fn default() -> Self {
        ProductServiceConfig {
            cache_ttl: Duration::from_secs(60),
            slow_threshold: Duration::from_secs(5),
        }
    }
}

/// Fixed per-method plans, built once at construction.
struct ProductPlans {
    add: AspectPlan,
    update: AspectPlan,
    delete: AspectPlan,
    add_batch: AspectPlan,
    get_list: AspectPlan,
    get_list_by_category: AspectPlan,
}

impl ProductPlans {
    fn new(config: &ProductServiceConfig) -> Self {
        let invalidate = AspectSpec::CacheInvalidate {
            prefix: READ_PREFIX.to_string(),
        };
        ProductPlans {
            add: AspectPlan::new([AspectSpec::Validation, invalidate.clone()]),
            update: AspectPlan::new([AspectSpec::Validation, invalidate.clone()]),
            delete: AspectPlan::new([invalidate.clone()]),
            add_batch: AspectPlan::new([AspectSpec::Transaction, invalidate]),
            get_list: AspectPlan::new([AspectSpec::Performance {
                threshold: config.slow_threshold,
            }]),
            get_list_by_category: AspectPlan::new([
                AspectSpec::Logging,
                AspectSpec::Cache {
                    ttl: config.cache_ttl,
                },
            ]),
        }
    }
}

pub struct ProductService {
    products: Arc<dyn Repository<Product>>,
    categories: Arc<dyn Categories>,
    pipeline: Arc<Pipeline>,
    plans: ProductPlans,
}

impl ProductService {
    pub fn new(
        products: Arc<dyn Repository<Product>>,
        categories: Arc<dyn Categories>,
        pipeline: Arc<Pipeline>,
    ) -> Self {
        ProductService::with_config(products, categories, pipeline, ProductServiceConfig::default())
    }

    pub fn with_config(
        products: Arc<dyn Repository<Product>>,
        categories: Arc<dyn Categories>,
        pipeline: Arc<Pipeline>,
        config: ProductServiceConfig,
    ) -> Self {
        ProductService {
            products,
            categories,
            pipeline,
            plans: ProductPlans::new(&config),
        }
    }

    fn check_name_is_free(&self, name: &str) -> OpResult<Option<ActionResult>> {
        let existing = self.products.get(&|p: &Product| p.name == name)?;
        Ok(existing.map(|_| ActionResult::fail(messages::PRODUCT_NAME_ALREADY_EXISTS)))
    }

    fn check_category_floor(&self) -> OpResult<Option<ActionResult>> {
        let listed = self.categories.get_list()?;
        let enabled = listed
            .data
            .map(|categories| categories.iter().filter(|c| c.enabled).count())
            .unwrap_or(0);
        if enabled < CATEGORY_FLOOR {
            return Ok(Some(ActionResult::fail(messages::CATEGORY_FLOOR_NOT_MET)));
        }
        Ok(None)
    }
}

impl Products for ProductService {
    fn add(&self, product: &Product) -> OpResult<ActionResult> {
        let invocation = Invocation::new(SERVICE, "add")
            .arg(product)?
            .subject(product);
        self.pipeline.execute(&self.plans.add, &invocation, &mut || {
            if let Some(failure) = rules::run(vec![
                Box::new(|| self.check_name_is_free(&product.name)),
                Box::new(|| self.check_category_floor()),
            ])? {
                return Ok(failure);
            }
            self.products.add(product)?;
            Ok(ActionResult::ok_with(messages::PRODUCT_ADDED))
        })
    }

    fn add_batch(&self, products: &[Product]) -> OpResult<ActionResult> {
        let invocation = Invocation::new(SERVICE, "add_batch").arg(&products)?;
        self.pipeline
            .execute(&self.plans.add_batch, &invocation, &mut || {
                for product in products {
                    self.products.add(product)?;
                }
                Ok(ActionResult::ok_with(messages::PRODUCTS_ADDED))
            })
    }

    fn update(&self, product: &Product) -> OpResult<ActionResult> {
        let invocation = Invocation::new(SERVICE, "update")
            .arg(product)?
            .subject(product);
        self.pipeline
            .execute(&self.plans.update, &invocation, &mut || {
                self.products.update(product)?;
                Ok(ActionResult::ok_with(messages::PRODUCT_UPDATED))
            })
    }

    fn delete(&self, product: &Product) -> OpResult<ActionResult> {
        let invocation = Invocation::new(SERVICE, "delete").arg(&product.id)?;
        self.pipeline
            .execute(&self.plans.delete, &invocation, &mut || {
                self.products.delete(product)?;
                Ok(ActionResult::ok_with(messages::PRODUCT_DELETED))
            })
    }

    fn get_by_id(&self, product_id: Uuid) -> OpResult<DataResult<Product>> {
        let found = self.products.get(&|p: &Product| p.id == product_id)?;
        Ok(DataResult::ok_maybe(found))
    }

    fn get_list(&self) -> OpResult<DataResult<Vec<Product>>> {
        let invocation = Invocation::new(SERVICE, "get_list");
        self.pipeline
            .execute(&self.plans.get_list, &invocation, &mut || {
                Ok(DataResult::ok(self.products.get_list(None)?))
            })
    }

    fn get_list_by_category(&self, category_id: Uuid) -> OpResult<DataResult<Vec<Product>>> {
        let invocation = Invocation::new(SERVICE, "get_list_by_category").arg(&category_id)?;
        self.pipeline
            .execute(&self.plans.get_list_by_category, &invocation, &mut || {
                let matching = self
                    .products
                    .get_list(Some(&|p: &Product| p.category_id == category_id))?;
                Ok(DataResult::ok(matching))
            })
    }
}
