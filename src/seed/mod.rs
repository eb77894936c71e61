//! Startup data loaded from a JSON file of the form
//! `{ "dishes": [...], "orders": [...] }`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entities::{dish::Dish, order::Order};
use crate::errors::{ApiError, RepoErr};
use crate::repositories::Repository;
use crate::validation::{dishes as dish_checks, orders as order_checks, Pipeline, Submission};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("reading seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing seed file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("seed file repeats id {0}")]
    Duplicate(String),
    #[error("seed record {id} is invalid: {reason}")]
    Invalid { id: String, reason: String },
}

#[derive(Debug, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub dishes: Vec<Dish>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl Seed {
    pub fn from_path(path: &Path) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Every id in the seed, dishes first.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.dishes
            .iter()
            .map(|d| d.id.as_str())
            .chain(self.orders.iter().map(|o| o.id.as_str()))
    }

    pub async fn load_into(
        self,
        dishes: &dyn Repository<Dish>,
        orders: &dyn Repository<Order>,
    ) -> Result<(usize, usize), SeedError> {
        let counts = (self.dishes.len(), self.orders.len());
        for dish in self.dishes {
            check(&dish.id, &dish, dish_checks::create(), dish_checks::draft)?;
            dishes.insert(dish).await.map_err(seed_err)?;
        }
        for order in self.orders {
            check(&order.id, &order, order_checks::create(), order_checks::draft)?;
            orders.insert(order).await.map_err(seed_err)?;
        }
        Ok(counts)
    }
}

/// Runs a seeded record through the same checks a create request gets.
fn check<T, D>(
    id: &str,
    record: &T,
    pipeline: Pipeline<T>,
    draft: impl Fn(&Map<String, Value>) -> Result<D, ApiError>,
) -> Result<(), SeedError>
where
    T: Serialize + 'static,
{
    let invalid = |reason: String| SeedError::Invalid {
        id: id.to_string(),
        reason,
    };
    let Value::Object(data) = serde_json::to_value(record)? else {
        return Err(invalid("record is not an object".into()));
    };
    pipeline
        .run(&Submission::new(&data))
        .and_then(|()| draft(&data).map(|_| ()))
        .map_err(|e| invalid(e.to_string()))
}

fn seed_err(e: RepoErr) -> SeedError {
    match e {
        RepoErr::Duplicate(id) => SeedError::Duplicate(id),
        RepoErr::NotFound | RepoErr::Rejected(_) => SeedError::Invalid {
            id: String::new(),
            reason: e.to_string(),
        },
    }
}
