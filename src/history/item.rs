//! History entries.

use serde::{Deserialize, Serialize};

use crate::draw::DrawResult;

/// A recorded draw.
///
/// Serialized flat: `{ "id", "roll", "tier", "selectedItem", "timestamp", "comment"? }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Identifier, unique within the live history.
    pub id: String,
    /// The draw outcome.
    #[serde(flatten)]
    pub result: DrawResult,
}

impl HistoryItem {
    /// Wrap a result with an id.
    pub fn new(id: impl Into<String>, result: DrawResult) -> Self {
        Self { id: id.into(), result }
    }
}
