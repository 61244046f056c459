//! Personalization variants and the rule table that selects them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::RuleId;
use crate::personalization::PersonalizationProfile;

/// Tag selecting which personalized content a visitor sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    Premium,
    #[default]
    Standard,
    Budget,
    NewUser,
    ReturningCustomer,
}

impl Variant {
    /// Every variant, in declaration order.
    pub const ALL: [Variant; 5] = [
        Variant::Premium,
        Variant::Standard,
        Variant::Budget,
        Variant::NewUser,
        Variant::ReturningCustomer,
    ];

    /// Selection priority; lower wins.
    pub fn priority(&self) -> u8 {
        match self {
            Variant::Premium => 1,
            Variant::NewUser => 2,
            Variant::ReturningCustomer => 3,
            Variant::Budget => 4,
            Variant::Standard => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Premium => "premium",
            Variant::Standard => "standard",
            Variant::Budget => "budget",
            Variant::NewUser => "new-user",
            Variant::ReturningCustomer => "returning-customer",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| CommerceError::UnknownVariant(s.to_string()))
    }
}

/// The closed set of conditions a rule can test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RuleCondition {
    /// Still new and has visited at most `max_visits` times.
    NewVisitor { max_visits: u32 },
    /// No longer new and has visited more than `min_visits` times.
    ReturningVisitor { min_visits: u32 },
    /// Has bought more than `min_purchases` distinct products.
    FrequentBuyer { min_purchases: usize },
    /// Shops in `category` (exact match) or has bought at most
    /// `max_purchases` products.
    BudgetShopper {
        category: String,
        max_purchases: usize,
    },
}

impl RuleCondition {
    /// Pure predicate over a profile snapshot.
    pub fn evaluate(&self, profile: &PersonalizationProfile) -> bool {
        match self {
            RuleCondition::NewVisitor { max_visits } => {
                profile.is_new_user && profile.visit_count <= *max_visits
            }
            RuleCondition::ReturningVisitor { min_visits } => {
                !profile.is_new_user && profile.visit_count > *min_visits
            }
            RuleCondition::FrequentBuyer { min_purchases } => {
                profile.purchase_count() > *min_purchases
            }
            RuleCondition::BudgetShopper {
                category,
                max_purchases,
            } => {
                profile.category.as_deref() == Some(category.as_str())
                    || profile.purchase_count() <= *max_purchases
            }
        }
    }
}

/// A named condition mapped to the variant it votes for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalizationRule {
    pub id: RuleId,
    pub name: String,
    pub condition: RuleCondition,
    pub variant: Variant,
}

impl PersonalizationRule {
    pub fn new(
        id: impl Into<RuleId>,
        name: impl Into<String>,
        condition: RuleCondition,
        variant: Variant,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            condition,
            variant,
        }
    }

    pub fn applies_to(&self, profile: &PersonalizationProfile) -> bool {
        self.condition.evaluate(profile)
    }
}

/// Immutable, ordered rule table.
///
/// Order only matters between applicable rules whose variants share a
/// priority: the earliest one wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    rules: Vec<PersonalizationRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<PersonalizationRule>) -> Self {
        Self { rules }
    }

    /// Empty table; every profile resolves to [`Variant::Standard`].
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rules(&self) -> &[PersonalizationRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules whose condition holds, in declaration order.
    pub fn applicable<'a>(
        &'a self,
        profile: &'a PersonalizationProfile,
    ) -> impl Iterator<Item = &'a PersonalizationRule> + 'a {
        self.rules.iter().filter(move |rule| rule.applies_to(profile))
    }

    /// The applicable rule that decides the variant, if any.
    ///
    /// Folds from [`Variant::Standard`] and only moves to a strictly better
    /// priority, so the first rule reaching a given priority keeps it.
    pub fn deciding_rule<'a>(
        &'a self,
        profile: &'a PersonalizationProfile,
    ) -> Option<&'a PersonalizationRule> {
        self.applicable(profile)
            .fold(None, |best: Option<&PersonalizationRule>, rule| {
                let best_priority =
                    best.map_or(Variant::Standard.priority(), |b| b.variant.priority());
                if rule.variant.priority() < best_priority {
                    Some(rule)
                } else {
                    best
                }
            })
    }

    /// Fold the applicable rules down to one variant.
    pub fn resolve(&self, profile: &PersonalizationProfile) -> Variant {
        self.deciding_rule(profile)
            .map_or(Variant::Standard, |rule| rule.variant)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new(vec![
            PersonalizationRule::new(
                "rule-new-user",
                "New User",
                RuleCondition::NewVisitor { max_visits: 2 },
                Variant::NewUser,
            ),
            PersonalizationRule::new(
                "rule-returning-customer",
                "Returning Customer",
                RuleCondition::ReturningVisitor { min_visits: 5 },
                Variant::ReturningCustomer,
            ),
            PersonalizationRule::new(
                "rule-premium-buyer",
                "Premium Buyer",
                RuleCondition::FrequentBuyer { min_purchases: 3 },
                Variant::Premium,
            ),
            PersonalizationRule::new(
                "rule-budget-conscious",
                "Budget Conscious",
                RuleCondition::BudgetShopper {
                    category: "Accessories".to_string(),
                    max_purchases: 1,
                },
                Variant::Budget,
            ),
        ])
    }
}
