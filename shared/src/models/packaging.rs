//! Packaging Rule Model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One consumable a packaging rule calls for
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackagingRuleItem {
    pub consumable_id: Uuid,
    pub name: String,
    pub qty: i64,
    pub unit: String,
}

/// Rule mapping a card-count range to a packaging recipe.
///
/// A sale of N cards picks the most specific rule whose range covers N,
/// falling back to the default rule when none match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackagingRule {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
    /// Lower bound of the card-count range (inclusive)
    pub card_count_min: i64,
    /// Upper bound (inclusive); None means unbounded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_count_max: Option<i64>,
    pub items: Vec<PackagingRuleItem>,
}

impl PackagingRule {
    /// Whether this rule's range covers the given card count
    pub fn covers(&self, card_count: i64) -> bool {
        card_count >= self.card_count_min
            && self.card_count_max.is_none_or(|max| card_count <= max)
    }
}
