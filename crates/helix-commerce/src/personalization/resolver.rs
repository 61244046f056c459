//! Personalization service: owns the profile, persists it, resolves variants.

use helix_cache::Cache;

use crate::ids::ProductId;
use crate::personalization::{PersonalizationProfile, PersonalizationRule, RuleSet, Variant};

/// Storage key holding the serialized profile.
pub const PROFILE_KEY: &str = "personalization_data";

/// Owns one visitor's profile and maps it to exactly one [`Variant`].
///
/// Every mutation writes the profile through the injected [`Cache`] before
/// returning. Persistence failures are logged and otherwise ignored: the
/// in-memory profile stays authoritative.
///
/// # Example
///
/// ```rust
/// use helix_cache::Cache;
/// use helix_commerce::personalization::{PersonalizationResolver, Variant};
///
/// let mut resolver = PersonalizationResolver::load(Cache::in_memory());
/// assert_eq!(resolver.current_variant(), Variant::NewUser);
///
/// for id in ["prod-001", "prod-002", "prod-003", "prod-004"] {
///     resolver.add_purchase(id);
/// }
/// assert_eq!(resolver.current_variant(), Variant::Premium);
/// ```
#[derive(Debug)]
pub struct PersonalizationResolver {
    profile: PersonalizationProfile,
    rules: RuleSet,
    cache: Cache,
}

impl PersonalizationResolver {
    /// Read the stored profile, falling back to a fresh one.
    ///
    /// Fresh defaults are not written until the first mutation.
    pub fn load(cache: Cache) -> Self {
        let profile = match cache.get::<PersonalizationProfile>(PROFILE_KEY) {
            Ok(Some(mut profile)) => {
                profile.normalize();
                tracing::debug!(user_id = %profile.user_id, "loaded personalization profile");
                profile
            }
            Ok(None) => PersonalizationProfile::new(),
            Err(e) => {
                tracing::warn!(error = %e, "stored profile unreadable, starting fresh");
                PersonalizationProfile::new()
            }
        };
        Self::with_profile(profile, cache)
    }

    /// Wrap an explicit profile without touching storage.
    pub fn with_profile(profile: PersonalizationProfile, cache: Cache) -> Self {
        Self {
            profile,
            rules: RuleSet::default(),
            cache,
        }
    }

    /// Swap the rule table.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn profile(&self) -> &PersonalizationProfile {
        &self.profile
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Replace the category interest.
    pub fn update_category(&mut self, category: impl Into<String>) {
        self.profile.set_category(category);
        self.persist();
    }

    /// Adopt `category` only when no interest is recorded yet.
    pub fn observe_category(&mut self, category: &str) -> bool {
        let changed = self.profile.observe_category(category);
        if changed {
            self.persist();
        }
        changed
    }

    /// Record a purchase; a repeat is a no-op. Returns whether it changed.
    pub fn add_purchase(&mut self, product_id: impl Into<ProductId>) -> bool {
        let changed = self.profile.add_purchase(product_id.into());
        if changed {
            self.persist();
        }
        changed
    }

    /// Forget a purchase. `is_new_user` is left as it is.
    pub fn remove_purchase(&mut self, product_id: impl Into<ProductId>) -> bool {
        let changed = self.profile.remove_purchase(&product_id.into());
        if changed {
            self.persist();
        }
        changed
    }

    /// Count a new visit.
    pub fn record_visit(&mut self) {
        self.profile.record_visit();
        self.persist();
    }

    /// Rules that hold for the current profile, in declaration order.
    pub fn applicable_rules(&self) -> Vec<&PersonalizationRule> {
        self.rules.applicable(&self.profile).collect()
    }

    /// The rule that decided [`Self::current_variant`], if any applied.
    pub fn deciding_rule(&self) -> Option<&PersonalizationRule> {
        self.rules.deciding_rule(&self.profile)
    }

    /// Resolve the profile to a single variant.
    pub fn current_variant(&self) -> Variant {
        let variant = self.rules.resolve(&self.profile);
        tracing::debug!(user_id = %self.profile.user_id, %variant, "resolved variant");
        variant
    }

    /// Replace the profile with fresh defaults under a new user id.
    pub fn reset(&mut self) {
        self.profile = PersonalizationProfile::new();
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.cache.set(PROFILE_KEY, &self.profile) {
            tracing::warn!(error = %e, "failed to persist personalization profile");
        }
    }
}
