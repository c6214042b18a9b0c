//! Opaque string export of slot attribute bags.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

/// Serializes an attribute bag to a JSON object string.
///
/// Keys are emitted in sorted order so repeated calls over the same bag
/// produce identical output. Consumers treat the result as an opaque
/// display string.
pub fn serialize_attributes(attributes: &HashMap<String, Value>) -> String {
    let ordered: BTreeMap<&String, &Value> = attributes.iter().collect();
    serde_json::to_string(&ordered).unwrap_or_else(|_| String::from("{}"))
}
