use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Required-field presence check for the add-record form. Name and
/// country are required; age is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddRecordError {
    #[error("name is required")]
    MissingName,
    #[error("country is required")]
    MissingCountry,
}
