//! Personalization profile management.

use anyhow::Result;
use dialoguer::Confirm;
use helix_commerce::personalization::PersonalizationResolver;
use helix_commerce::ProductId;
use serde_json::json;

use super::{ProfileArgs, ProfileCommand};
use crate::context::Context;
use crate::output::variant_badge;

/// Run the profile command.
pub async fn run(args: ProfileArgs, ctx: &Context) -> Result<()> {
    let mut resolver = ctx.resolver()?;

    match args.command.unwrap_or(ProfileCommand::Show) {
        ProfileCommand::Show => {}
        ProfileCommand::Category { category } => {
            resolver.update_category(category.as_str());
            ctx.output.success(&format!("Category set to {}", category));
        }
        ProfileCommand::Purchase { product_id } => {
            warn_if_unknown(&product_id, ctx)?;
            if resolver.add_purchase(product_id.as_str()) {
                ctx.output.success(&format!("Recorded purchase of {}", product_id));
            } else {
                ctx.output.info(&format!("{} was already recorded", product_id));
            }
        }
        ProfileCommand::Unpurchase { product_id } => {
            if resolver.remove_purchase(product_id.as_str()) {
                ctx.output.success(&format!("Removed purchase of {}", product_id));
            } else {
                ctx.output.info(&format!("{} was not a recorded purchase", product_id));
            }
        }
        ProfileCommand::Visit => {
            resolver.record_visit();
            ctx.output.success(&format!(
                "Visit recorded ({} total)",
                resolver.profile().visit_count
            ));
        }
        ProfileCommand::Reset { yes } => {
            if !yes && !ctx.output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt("Discard the current profile and start fresh?")
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.warn("Reset cancelled");
                    return Ok(());
                }
            }
            resolver.reset();
            ctx.output.success(&format!(
                "Profile reset; new user id {}",
                resolver.profile().user_id
            ));
        }
    }

    show(&resolver, ctx);
    Ok(())
}

fn warn_if_unknown(product_id: &str, ctx: &Context) -> Result<()> {
    if ctx.catalog()?.get_product_by_id(product_id).is_none() {
        ctx.output
            .warn(&format!("{} is not in the catalog; recording it anyway", product_id));
    }
    Ok(())
}

fn show(resolver: &PersonalizationResolver, ctx: &Context) {
    let profile = resolver.profile();
    let variant = resolver.current_variant();
    let deciding = resolver.deciding_rule();

    if ctx.output.is_json() {
        let applicable: Vec<&str> = resolver
            .applicable_rules()
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        ctx.output.json(&json!({
            "profile": profile,
            "variant": variant,
            "applicableRules": applicable,
            "decidingRule": deciding.map(|r| r.id.as_str()),
        }));
        return;
    }

    ctx.output.header("Personalization profile");
    ctx.output.kv("User", profile.user_id.as_str());
    ctx.output.kv("Variant", &variant_badge(variant));
    ctx.output
        .kv("Category", profile.category.as_deref().unwrap_or("(none)"));
    ctx.output.kv("New user", if profile.is_new_user { "yes" } else { "no" });
    ctx.output.kv("Visits", &profile.visit_count.to_string());
    let last_visit = profile
        .last_visit
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "(never)".to_string());
    ctx.output.kv("Last visit", &last_visit);

    let purchases: Vec<&str> = profile
        .previous_purchases
        .iter()
        .map(ProductId::as_str)
        .collect();
    let purchases = if purchases.is_empty() {
        "(none)".to_string()
    } else {
        purchases.join(", ")
    };
    ctx.output.kv("Purchases", &purchases);

    ctx.output.header("Rules");
    for rule in resolver.rules().rules() {
        let marker = match deciding {
            Some(d) if d.id == rule.id => "=>",
            _ if rule.applies_to(profile) => "+ ",
            _ => "  ",
        };
        ctx.output.list_item(&format!(
            "{} {} ({}) -> {}",
            marker, rule.name, rule.id, rule.variant
        ));
    }
}
