use serde::{Deserialize, Serialize};

use crate::domain::{AgeValue, RecordId, UserRecord};

/// Document shape returned by the record endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchResponse {
    pub data: Vec<FetchedRecord>,
}

/// Strictly typed wire record: numeric id and age, textual name and
/// country. A payload that deviates fails decoding as a whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedRecord {
    pub id: i64,
    pub name: String,
    pub age: f64,
    pub country: String,
}

impl From<FetchedRecord> for UserRecord {
    fn from(wire: FetchedRecord) -> Self {
        Self {
            id: RecordId(wire.id),
            name: wire.name,
            age: AgeValue::Number(wire.age),
            country: wire.country,
        }
    }
}
