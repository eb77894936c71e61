pub mod dish;
pub mod order;

use derive_more::From;
use serde::{Deserialize, Serialize};

/// `{ "data": ... }` wrapper used by every response body.
#[derive(Debug, Clone, Serialize, Deserialize, From)]
pub struct Envelope<T> {
    pub data: T,
}

/// Request body; a missing `data` key reads as an empty object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Payload {
    #[serde(default)]
    pub data: serde_json::Map<String, serde_json::Value>,
}
