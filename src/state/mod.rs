use crate::entities::{dish::Dish, order::Order};
use crate::repositories::{in_memory::InMemoryRepository, Repository};
use crate::utils::{IdGenerator, SequentialIds};
use actix_web::web::Data;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub dishes: Arc<dyn Repository<Dish>>,
    pub orders: Arc<dyn Repository<Order>>,
    pub ids: Arc<dyn IdGenerator>,
}

impl AppState {
    pub fn new<D, O, I>(dishes: D, orders: O, ids: I) -> Data<Self>
    where
        D: Repository<Dish> + 'static,
        O: Repository<Order> + 'static,
        I: IdGenerator + 'static,
    {
        Data::new(Self {
            dishes: Arc::new(dishes),
            orders: Arc::new(orders),
            ids: Arc::new(ids),
        })
    }

    /// Empty in-memory stores with sequential ids.
    pub fn in_memory() -> Data<Self> {
        Self::new(
            InMemoryRepository::<Dish>::default(),
            InMemoryRepository::<Order>::default(),
            SequentialIds::default(),
        )
    }
}
