use crate::errors::RepoErr;
use crate::repositories::{Guard, Mutation, Record, Repository};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

struct Table<T> {
    rows: HashMap<String, T>,
    order: Vec<String>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            order: Vec::new(),
        }
    }
}

#[derive(Clone)]
pub struct InMemoryRepository<T> {
    inner: Arc<RwLock<Table<T>>>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Table::default())),
        }
    }
}

#[async_trait]
impl<T: Record> Repository<T> for InMemoryRepository<T> {
    async fn list(&self) -> Result<Vec<T>, RepoErr> {
        let table = self.inner.read().await;
        Ok(table
            .order
            .iter()
            .filter_map(|id| table.rows.get(id).cloned())
            .collect())
    }

    async fn get(&self, id: &str) -> Result<T, RepoErr> {
        let table = self.inner.read().await;
        table.rows.get(id).cloned().ok_or(RepoErr::NotFound)
    }

    async fn insert(&self, record: T) -> Result<T, RepoErr> {
        let mut table = self.inner.write().await;
        let id = record.id().to_string();
        if table.rows.contains_key(&id) {
            return Err(RepoErr::Duplicate(id));
        }
        table.order.push(id.clone());
        table.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: &str, mutation: Mutation<T>) -> Result<T, RepoErr> {
        let mut table = self.inner.write().await;
        let row = table.rows.get_mut(id).ok_or(RepoErr::NotFound)?;
        // A rejected mutation leaves the stored row unchanged.
        let mut next = row.clone();
        mutation(&mut next).map_err(RepoErr::Rejected)?;
        *row = next;
        Ok(row.clone())
    }

    async fn remove(&self, id: &str, guard: Guard<T>) -> Result<T, RepoErr> {
        let mut table = self.inner.write().await;
        let row = table.rows.get(id).ok_or(RepoErr::NotFound)?;
        guard(row).map_err(RepoErr::Rejected)?;
        table.order.retain(|o| o != id);
        table.rows.remove(id).ok_or(RepoErr::NotFound)
    }
}
