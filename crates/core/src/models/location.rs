use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Descriptor for a bookable room or venue.
///
/// Owned by the location registry of the surrounding system; slots hold a
/// shared reference to it and read it for display and serialization only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub capacity: Option<u32>,
    #[serde(default)]
    pub attributes: HashMap<String, Value>,
}

impl Location {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            capacity: None,
            attributes: HashMap::new(),
        }
    }
}
