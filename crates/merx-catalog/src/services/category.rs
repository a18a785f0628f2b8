//! Category service: plain pass-through CRUD over the category
//! repository. No aspects are declared here; interception belongs to the
//! operations that need it (see the product service).

use std::sync::Arc;

use merx_core::error::OpResult;
use merx_core::results::{ActionResult, DataResult};
use uuid::Uuid;

use crate::data_access::Repository;
use crate::entities::Category;
use crate::messages;

/// Public contract of the category service.
pub trait Categories: Send + Sync {
    fn get_by_id(&self, category_id: Uuid) -> OpResult<DataResult<Category>>;
    fn get_list(&self) -> OpResult<DataResult<Vec<Category>>>;
    fn add(&self, category: &Category) -> OpResult<ActionResult>;
    fn update(&self, category: &Category) -> OpResult<ActionResult>;
    fn delete(&self, category: &Category) -> OpResult<ActionResult>;
}

pub struct CategoryService {
    categories: Arc<dyn Repository<Category>>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn Repository<Category>>) -> Self {
        CategoryService { categories }
    }
}

impl Categories for CategoryService {
    fn get_by_id(&self, category_id: Uuid) -> OpResult<DataResult<Category>> {
        let found = self.categories.get(&|c: &Category| c.id == category_id)?;
        Ok(DataResult::ok_maybe(found))
    }

    fn get_list(&self) -> OpResult<DataResult<Vec<Category>>> {
        Ok(DataResult::ok(self.categories.get_list(None)?))
    }

    fn add(&self, category: &Category) -> OpResult<ActionResult> {
        self.categories.add(category)?;
        Ok(ActionResult::ok_with(messages::CATEGORY_ADDED))
    }

    fn update(&self, category: &Category) -> OpResult<ActionResult> {
        self.categories.update(category)?;
        Ok(ActionResult::ok_with(messages::CATEGORY_UPDATED))
    }

    fn delete(&self, category: &Category) -> OpResult<ActionResult> {
        self.categories.delete(category)?;
        Ok(ActionResult::ok_with(messages::CATEGORY_DELETED))
    }
}
