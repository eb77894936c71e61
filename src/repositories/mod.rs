pub mod in_memory;

use async_trait::async_trait;

use crate::errors::{ApiError, RepoErr};

/// Anything a repository can hold: a clonable value with a stable id.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
}

/// Change applied to a stored record while the store is locked. Returning
/// an error leaves the record untouched.
pub type Mutation<T> = Box<dyn FnOnce(&mut T) -> Result<(), ApiError> + Send>;

/// Check run against a stored record before it is removed.
pub type Guard<T> = Box<dyn FnOnce(&T) -> Result<(), ApiError> + Send>;

#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// All records in insertion order.
    async fn list(&self) -> Result<Vec<T>, RepoErr>;
    async fn get(&self, id: &str) -> Result<T, RepoErr>;
    async fn insert(&self, record: T) -> Result<T, RepoErr>;
    async fn update(&self, id: &str, mutation: Mutation<T>) -> Result<T, RepoErr>;
    async fn remove(&self, id: &str, guard: Guard<T>) -> Result<T, RepoErr>;
}
