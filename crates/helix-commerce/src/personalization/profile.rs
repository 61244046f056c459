//! Visitor personalization profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ProductId, UserId};

/// Mutable record of one visitor's personalization-relevant behavior.
///
/// `previous_purchases` never holds duplicates, and `is_new_user` turns
/// false the moment a purchase is recorded. Removing purchases never turns
/// it back on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizationProfile {
    pub user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub previous_purchases: Vec<ProductId>,
    #[serde(default = "default_new_user")]
    pub is_new_user: bool,
    #[serde(default = "default_visit_count")]
    pub visit_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visit: Option<DateTime<Utc>>,
}

fn default_new_user() -> bool {
    true
}

fn default_visit_count() -> u32 {
    1
}

impl Default for PersonalizationProfile {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonalizationProfile {
    /// Fresh profile for a first-time visitor.
    pub fn new() -> Self {
        Self {
            user_id: UserId::generate(),
            category: None,
            previous_purchases: Vec::new(),
            is_new_user: true,
            visit_count: 1,
            last_visit: Some(Utc::now()),
        }
    }

    /// Replace the category interest. The string is not validated.
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = Some(category.into());
    }

    /// Set the category only if none is known yet. Returns whether it changed.
    pub fn observe_category(&mut self, category: &str) -> bool {
        if self.category.is_some() {
            return false;
        }
        self.category = Some(category.to_string());
        true
    }

    /// Record a purchase. Returns `false` if it was already recorded.
    pub fn add_purchase(&mut self, product_id: ProductId) -> bool {
        if self.has_purchased(&product_id) {
            return false;
        }
        self.previous_purchases.push(product_id);
        self.is_new_user = false;
        true
    }

    /// Forget a purchase. Returns `false` if it was not recorded.
    pub fn remove_purchase(&mut self, product_id: &ProductId) -> bool {
        let before = self.previous_purchases.len();
        self.previous_purchases.retain(|id| id != product_id);
        self.previous_purchases.len() != before
    }

    /// Count another visit and stamp its time.
    pub fn record_visit(&mut self) {
        self.visit_count = self.visit_count.saturating_add(1);
        self.last_visit = Some(Utc::now());
    }

    pub fn has_purchased(&self, product_id: &ProductId) -> bool {
        self.previous_purchases.contains(product_id)
    }

    pub fn purchase_count(&self) -> usize {
        self.previous_purchases.len()
    }

    /// Repair a profile read from storage so the invariants hold again.
    pub(crate) fn normalize(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.previous_purchases.retain(|id| seen.insert(id.clone()));
        if !self.previous_purchases.is_empty() {
            self.is_new_user = false;
        }
        self.visit_count = self.visit_count.max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profile_defaults() {
        let profile = PersonalizationProfile::new();
        assert!(profile.is_new_user);
        assert_eq!(profile.visit_count, 1);
        assert!(profile.previous_purchases.is_empty());
        assert!(profile.category.is_none());
        assert!(profile.user_id.as_str().starts_with("user_"));
    }

    #[test]
    fn test_add_purchase_is_idempotent() {
        let mut profile = PersonalizationProfile::new();
        assert!(profile.add_purchase("prod-001".into()));
        assert!(!profile.add_purchase("prod-001".into()));
        assert_eq!(profile.previous_purchases, vec![ProductId::new("prod-001")]);
        assert!(!profile.is_new_user);
    }

    #[test]
    fn test_remove_purchase_keeps_returning_status() {
        let mut profile = PersonalizationProfile::new();
        profile.add_purchase("prod-001".into());
        assert!(profile.remove_purchase(&"prod-001".into()));
        assert!(!profile.remove_purchase(&"prod-001".into()));
        assert!(profile.previous_purchases.is_empty());
        assert!(!profile.is_new_user);
    }

    #[test]
    fn test_observe_category_only_fills_gap() {
        let mut profile = PersonalizationProfile::new();
        assert!(profile.observe_category("Electronics"));
        assert!(!profile.observe_category("Accessories"));
        assert_eq!(profile.category.as_deref(), Some("Electronics"));

        profile.set_category("Accessories");
        assert_eq!(profile.category.as_deref(), Some("Accessories"));
    }

    #[test]
    fn test_record_visit() {
        let mut profile = PersonalizationProfile::new();
        profile.record_visit();
        profile.record_visit();
        assert_eq!(profile.visit_count, 3);
    }

    #[test]
    fn test_stored_shape() {
        let json = r#"{
            "userId": "user_abc123xyz",
            "category": "Electronics",
            "previousPurchases": ["prod-001", "prod-001", "prod-002"],
            "isNewUser": true,
            "visitCount": 0,
            "lastVisit": "2024-05-01T10:00:00.000Z",
            "personalizationRules": [{"id": "rule-new-user"}]
        }"#;
        let mut profile: PersonalizationProfile = serde_json::from_str(json).unwrap();
        profile.normalize();

        assert_eq!(profile.user_id, "user_abc123xyz");
        assert_eq!(profile.previous_purchases.len(), 2);
        assert!(!profile.is_new_user);
        assert_eq!(profile.visit_count, 1);
        assert!(profile.last_visit.is_some());
    }

    #[test]
    fn test_serialized_field_names() {
        let profile = PersonalizationProfile::new();
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["isNewUser"], true);
        assert_eq!(json["visitCount"], 1);
        assert!(json["previousPurchases"].as_array().unwrap().is_empty());
    }
}
