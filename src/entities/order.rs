use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::repositories::Record;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Display)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    #[default]
    #[display("pending")]
    Pending,
    #[display("preparing")]
    Preparing,
    #[display("out-for-delivery")]
    OutForDelivery,
    #[display("delivered")]
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        Self::Pending,
        Self::Preparing,
        Self::OutForDelivery,
        Self::Delivered,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|st| st.to_string() == s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dish_id: Option<String>,
    pub quantity: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub deliver_to: String,
    pub mobile_number: String,
    #[serde(default)]
    pub status: OrderStatus,
    pub dishes: Vec<OrderLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub deliver_to: String,
    pub mobile_number: String,
    pub status: OrderStatus,
    pub dishes: Vec<OrderLine>,
}

impl Order {
    pub fn new(id: String, draft: OrderDraft) -> Self {
        Self {
            id,
            deliver_to: draft.deliver_to,
            mobile_number: draft.mobile_number,
            status: draft.status,
            dishes: draft.dishes,
        }
    }

    pub fn apply(&mut self, draft: OrderDraft) {
        self.deliver_to = draft.deliver_to;
        self.mobile_number = draft.mobile_number;
        self.status = draft.status;
        self.dishes = draft.dishes;
    }
}

impl Record for Order {
    fn id(&self) -> &str {
        &self.id
    }
}
