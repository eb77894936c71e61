use serde::{Deserialize, Serialize};

use crate::repositories::Record;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dish {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub image_url: String,
}

/// The mutable fields of a dish, as accepted from a validated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishDraft {
    pub name: String,
    pub description: String,
    pub price: u64,
    pub image_url: String,
}

impl Dish {
    pub fn new(id: String, draft: DishDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            image_url: draft.image_url,
        }
    }

    pub fn apply(&mut self, draft: DishDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.price = draft.price;
        self.image_url = draft.image_url;
    }
}

impl Record for Dish {
    fn id(&self) -> &str {
        &self.id
    }
}
