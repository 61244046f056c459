//! Visitor personalization.
//!
//! A [`PersonalizationProfile`] records what a visitor has done, a
//! [`RuleSet`] turns that into votes for content variants, and the
//! [`PersonalizationResolver`] ties both to a persistent store.

mod profile;
mod resolver;
mod rules;

pub use profile::PersonalizationProfile;
pub use resolver::{PersonalizationResolver, PROFILE_KEY};
pub use rules::{PersonalizationRule, RuleCondition, RuleSet, Variant};
