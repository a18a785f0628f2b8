//! End-to-end behavior of the decorated services: rule short-circuits,
//! cache hits and invalidation, validation blocking the repository, and
//! transactional rollback.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use merx_catalog::data_access::{Keyed, Predicate, Repository};
use merx_catalog::memory::TxParticipant;
use merx_catalog::{
    messages, Categories, Category, CategoryService, MemoryRepository, MemoryTransactionManager,
    Product, ProductService, ProductServiceConfig, Products, User, UserService, Users,
};
use merx_core::error::{Fault, OpResult};
use merx_core::{MemoryCache, NoTransaction, Pipeline, TracingLogger};

// =============================================================================
// Test Doubles
// =============================================================================

/// Repository wrapper counting collaborator calls.
struct CountingRepository<T> {
    inner: MemoryRepository<T>,
    gets: AtomicUsize,
    lists: AtomicUsize,
    adds: AtomicUsize,
}

impl<T: Keyed + Clone> CountingRepository<T> {
    fn new() -> Self {
        CountingRepository {
            inner: MemoryRepository::new(),
            gets: AtomicUsize::new(0),
            lists: AtomicUsize::new(0),
            adds: AtomicUsize::new(0),
        }
    }

    fn add_calls(&self) -> usize {
        self.adds.load(Ordering::SeqCst)
    }

    fn list_calls(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
    }
}

impl<T> Repository<T> for CountingRepository<T>
where
    T: Keyed + Clone + Send + Sync,
{
    fn get(&self, predicate: Predicate<'_, T>) -> OpResult<Option<T>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(predicate)
    }

    fn get_list(&self, predicate: Option<Predicate<'_, T>>) -> OpResult<Vec<T>> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        self.inner.get_list(predicate)
    }

    fn add(&self, entity: &T) -> OpResult<()> {
        self.adds.fetch_add(1, Ordering::SeqCst);
        self.inner.add(entity)
    }

    fn update(&self, entity: &T) -> OpResult<()> {
        self.inner.update(entity)
    }

    fn delete(&self, entity: &T) -> OpResult<()> {
        self.inner.delete(entity)
    }
}

/// Delegating repository that faults on the n-th `add`.
struct FaultOnNthAdd<T> {
    inner: Arc<MemoryRepository<T>>,
    fault_on: usize,
    adds: AtomicUsize,
}

impl<T> Repository<T> for FaultOnNthAdd<T>
where
    T: Keyed + Clone + Send + Sync,
{
    fn get(&self, predicate: Predicate<'_, T>) -> OpResult<Option<T>> {
        self.inner.get(predicate)
    }

    fn get_list(&self, predicate: Option<Predicate<'_, T>>) -> OpResult<Vec<T>> {
        self.inner.get_list(predicate)
    }

    fn add(&self, entity: &T) -> OpResult<()> {
        let call = self.adds.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fault_on {
            return Err(Fault::DataAccess("storage offline".to_string()));
        }
        self.inner.add(entity)
    }

    fn update(&self, entity: &T) -> OpResult<()> {
        self.inner.update(entity)
    }

    fn delete(&self, entity: &T) -> OpResult<()> {
        self.inner.delete(entity)
    }
}

// =============================================================================
// Fixtures
// =============================================================================

fn bare_pipeline() -> Arc<Pipeline> {
    merx_core::logging::init();
    Arc::new(Pipeline::new(
        Arc::new(MemoryCache::new()),
        Arc::new(NoTransaction),
        Arc::new(TracingLogger),
    ))
}

/// Category service seeded with `count` enabled categories, through the
/// public contract.
fn category_service_with(count: usize) -> Arc<CategoryService> {
    let service = Arc::new(CategoryService::new(Arc::new(
        MemoryRepository::<Category>::new(),
    )));
    for i in 0..count {
        service.add(&Category::new(format!("Category {i}"))).unwrap();
    }
    service
}

fn widget(category_id: Uuid) -> Product {
    Product::new(category_id, "Widget", 1099)
}

// =============================================================================
// Product Rules
// =============================================================================

#[test]
fn test_adding_widget_succeeds_and_hits_repository_once() {
    let categories = category_service_with(10);
    let repo = Arc::new(CountingRepository::<Product>::new());
    let products = ProductService::new(repo.clone(), categories, bare_pipeline());

    let product = widget(Uuid::new_v4());
    let result = products.add(&product).unwrap();

    assert!(result.success);
    assert_eq!(result.message.as_deref(), Some(messages::PRODUCT_ADDED));
    assert_eq!(repo.add_calls(), 1);

    // Exactly the given product reached the repository
    let stored = products.get_by_id(product.id).unwrap();
    assert_eq!(stored.data, Some(product));
}

#[test]
fn test_duplicate_name_is_rejected_before_add() {
    let categories = category_service_with(10);
    let repo = Arc::new(CountingRepository::<Product>::new());
    let products = ProductService::new(repo.clone(), categories, bare_pipeline());

    products.add(&widget(Uuid::new_v4())).unwrap();
    let result = products.add(&widget(Uuid::new_v4())).unwrap();

    assert!(!result.success);
    assert_eq!(
        result.message.as_deref(),
        Some(messages::PRODUCT_NAME_ALREADY_EXISTS)
    );
    assert_eq!(repo.add_calls(), 1);
}

#[test]
fn test_category_floor_rejects_add() {
    let categories = category_service_with(9);
    let repo = Arc::new(CountingRepository::<Product>::new());
    let products = ProductService::new(repo.clone(), categories, bare_pipeline());

    let result = products.add(&widget(Uuid::new_v4())).unwrap();

    assert!(!result.success);
    assert_eq!(
        result.message.as_deref(),
        Some(messages::CATEGORY_FLOOR_NOT_MET)
    );
    assert_eq!(repo.add_calls(), 0);
}

// =============================================================================
// Validation Aspect
// =============================================================================

#[test]
fn test_invalid_product_never_reaches_any_collaborator() {
    let category_repo = Arc::new(CountingRepository::<Category>::new());
    let categories = Arc::new(CategoryService::new(category_repo.clone()));
    let product_repo = Arc::new(CountingRepository::<Product>::new());
    let products = ProductService::new(product_repo.clone(), categories, bare_pipeline());

    let invalid = Product::new(Uuid::new_v4(), "", 1099);
    let result = products.add(&invalid).unwrap();

    assert!(!result.success);
    assert_eq!(
        result.message.as_deref(),
        Some("Product name must not be empty")
    );
    // Validation failed before the body: no rule ran, no repository call
    assert_eq!(product_repo.add_calls(), 0);
    assert_eq!(category_repo.list_calls(), 0);
}

#[test]
fn test_invalid_update_never_reaches_repository() {
    let categories = category_service_with(10);
    let repo = Arc::new(CountingRepository::<Product>::new());
    let products = ProductService::new(repo.clone(), categories, bare_pipeline());

    let mut product = widget(Uuid::new_v4());
    products.add(&product).unwrap();

    product.unit_price_cents = 0;
    let result = products.update(&product).unwrap();

    assert!(!result.success);
    assert_eq!(
        result.message.as_deref(),
        Some("Unit price must be greater than zero")
    );
    let stored = products.get_by_id(product.id).unwrap().data.unwrap();
    assert_eq!(stored.unit_price_cents, 1099);
}

// =============================================================================
// Cache Aspect
// =============================================================================

#[test]
fn test_cached_read_invokes_body_once_within_ttl() {
    let categories = category_service_with(10);
    let repo = Arc::new(CountingRepository::<Product>::new());
    let products = ProductService::new(repo.clone(), categories, bare_pipeline());

    let category_id = Uuid::new_v4();
    products.get_list_by_category(category_id).unwrap();
    products.get_list_by_category(category_id).unwrap();
    assert_eq!(repo.list_calls(), 1);

    // Different arguments key separately
    products.get_list_by_category(Uuid::new_v4()).unwrap();
    assert_eq!(repo.list_calls(), 2);
}

#[test]
fn test_expired_entry_recomputes() {
    let categories = category_service_with(10);
    let repo = Arc::new(CountingRepository::<Product>::new());
    let config = ProductServiceConfig {
        cache_ttl: Duration::ZERO,
        ..ProductServiceConfig::default()
    };
    let products =
        ProductService::with_config(repo.clone(), categories, bare_pipeline(), config);

    let category_id = Uuid::new_v4();
    products.get_list_by_category(category_id).unwrap();
    products.get_list_by_category(category_id).unwrap();
    assert_eq!(repo.list_calls(), 2);
}

#[test]
fn test_successful_mutation_invalidates_read_cache() {
    let categories = category_service_with(10);
    let repo = Arc::new(CountingRepository::<Product>::new());
    let products = ProductService::new(repo.clone(), categories, bare_pipeline());

    let category_id = Uuid::new_v4();
    products.get_list_by_category(category_id).unwrap();
    assert_eq!(repo.list_calls(), 1);

    products.add(&widget(category_id)).unwrap();

    // The add cleared the read prefix: next read recomputes and sees it
    let listed = products.get_list_by_category(category_id).unwrap();
    assert_eq!(repo.list_calls(), 2);
    assert_eq!(listed.data.unwrap().len(), 1);
}

#[test]
fn test_failed_mutation_leaves_cache_intact() {
    let categories = category_service_with(10);
    let repo = Arc::new(CountingRepository::<Product>::new());
    let products = ProductService::new(repo.clone(), categories, bare_pipeline());

    let category_id = Uuid::new_v4();
    products.add(&widget(category_id)).unwrap();
    products.get_list_by_category(category_id).unwrap();
    assert_eq!(repo.list_calls(), 1);

    // Rejected by the name rule: no invalidation happens
    let rejected = products.add(&widget(category_id)).unwrap();
    assert!(!rejected.success);

    products.get_list_by_category(category_id).unwrap();
    assert_eq!(repo.list_calls(), 1);
}

// =============================================================================
// Transaction Aspect
// =============================================================================

#[test]
fn test_add_batch_commits_all_products() {
    let store = Arc::new(MemoryRepository::<Product>::new());
    let participants: Vec<Arc<dyn TxParticipant>> = vec![store.clone()];
    let pipeline = Arc::new(Pipeline::new(
        Arc::new(MemoryCache::new()),
        Arc::new(MemoryTransactionManager::new(participants)),
        Arc::new(TracingLogger),
    ));
    let products = ProductService::new(store.clone(), category_service_with(10), pipeline);

    let category_id = Uuid::new_v4();
    let batch = [
        Product::new(category_id, "Widget", 1099),
        Product::new(category_id, "Gadget", 2499),
    ];
    let result = products.add_batch(&batch).unwrap();

    assert!(result.success);
    assert_eq!(result.message.as_deref(), Some(messages::PRODUCTS_ADDED));
    assert_eq!(store.get_list(None).unwrap().len(), 2);
}

#[test]
fn test_add_batch_rolls_back_when_second_add_faults() {
    let store = Arc::new(MemoryRepository::<Product>::new());
    let participants: Vec<Arc<dyn TxParticipant>> = vec![store.clone()];
    let pipeline = Arc::new(Pipeline::new(
        Arc::new(MemoryCache::new()),
        Arc::new(MemoryTransactionManager::new(participants)),
        Arc::new(TracingLogger),
    ));
    let flaky = Arc::new(FaultOnNthAdd {
        inner: store.clone(),
        fault_on: 2,
        adds: AtomicUsize::new(0),
    });
    let products = ProductService::new(flaky, category_service_with(10), pipeline);

    let category_id = Uuid::new_v4();
    let batch = [
        Product::new(category_id, "Widget", 1099),
        Product::new(category_id, "Gadget", 2499),
    ];
    let result = products.add_batch(&batch);

    assert!(matches!(result, Err(Fault::DataAccess(_))));
    // The first add's effect must not be observable after rollback
    assert!(store.get_list(None).unwrap().is_empty());
}

// =============================================================================
// User Service
// =============================================================================

#[test]
fn test_user_registration_paths() {
    let repo = Arc::new(MemoryRepository::<User>::new());
    let users = UserService::new(repo.clone(), bare_pipeline());

    let malformed = User::new("Ada", "Lovelace", "not-an-address");
    let rejected = users.add(&malformed).unwrap();
    assert!(!rejected.success);
    assert_eq!(
        rejected.message.as_deref(),
        Some("Email address is not well formed")
    );
    assert!(users.get_list().unwrap().data.unwrap().is_empty());

    let ada = User::new("Ada", "Lovelace", "ada@example.com");
    let added = users.add(&ada).unwrap();
    assert!(added.success);
    assert_eq!(added.message.as_deref(), Some(messages::USER_ADDED));

    let duplicate = User::new("Augusta", "King", "ada@example.com");
    let refused = users.add(&duplicate).unwrap();
    assert!(!refused.success);
    assert_eq!(
        refused.message.as_deref(),
        Some(messages::USER_EMAIL_ALREADY_EXISTS)
    );

    let found = users.get_by_mail("ada@example.com").unwrap();
    assert_eq!(found.data.map(|u| u.id), Some(ada.id));
}
