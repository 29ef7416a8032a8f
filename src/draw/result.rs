//! Draw Results
//!
//! Owned snapshots of what a draw produced. Field names follow the persisted
//! history format (`selectedItem`, `iconName`, tier `type`).

use serde::{Deserialize, Serialize};

use crate::prize::{IconRef, PrizeTier, SubItem, TierKind, TierRange};

/// Tier descriptor embedded in a result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierInfo {
    /// Tier kind.
    #[serde(rename = "type")]
    pub kind: TierKind,
    /// Display name.
    pub name: String,
    /// Probability label.
    pub probability: String,
    /// Roll band.
    pub range: TierRange,
}

impl From<&PrizeTier> for TierInfo {
    fn from(tier: &PrizeTier) -> Self {
        Self {
            kind: tier.kind,
            name: tier.name.clone(),
            probability: tier.probability.clone(),
            range: tier.range,
        }
    }
}

/// Item descriptor embedded in a result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInfo {
    /// Item id within its tier.
    pub id: String,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Opaque icon reference.
    #[serde(rename = "iconName")]
    pub icon: IconRef,
}

impl From<&SubItem> for ItemInfo {
    fn from(item: &SubItem) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            description: item.description.clone(),
            icon: item.icon.clone(),
        }
    }
}

/// Outcome of one draw.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawResult {
    /// Roll in [1, 100].
    pub roll: u8,
    /// Matched tier.
    pub tier: TierInfo,
    /// Selected item.
    pub selected_item: ItemInfo,
    /// Draw time (Unix epoch milliseconds).
    pub timestamp: i64,
    /// Flavor text of the selected item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl DrawResult {
    /// Build a result from table entries.
    pub fn new(roll: u8, tier: &PrizeTier, item: &SubItem, timestamp: i64) -> Self {
        Self {
            roll,
            tier: TierInfo::from(tier),
            selected_item: ItemInfo::from(item),
            timestamp,
            comment: Some(item.flavor_text.clone()),
        }
    }

    /// Whether the presentation layer should celebrate this result.
    pub fn is_rare(&self) -> bool {
        self.tier.kind.is_rare()
    }
}
