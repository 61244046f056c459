//! Catalog and product detail page rendering.

use anyhow::{anyhow, Result};
use helix_api::ProductSource;
use helix_commerce::catalog::DEFAULT_RECOMMENDATION_LIMIT;
use helix_commerce::page::{CatalogPage, CatalogSettings, CatalogView, ProductDetail};
use helix_commerce::personalization::PersonalizationResolver;
use serde_json::json;

use super::PageArgs;
use crate::context::Context;
use crate::output::{stars, variant_badge};

/// Run the page command.
pub async fn run(args: PageArgs, ctx: &Context) -> Result<()> {
    let mut resolver = ctx.resolver()?;

    match args.product.as_deref() {
        Some(id) => detail(id, &resolver, ctx),
        None => catalog(&args, &mut resolver, ctx).await,
    }
}

async fn catalog(
    args: &PageArgs,
    resolver: &mut PersonalizationResolver,
    ctx: &Context,
) -> Result<()> {
    let source = ctx.source()?;

    let spinner = ctx.output.spinner("Loading catalog...");
    let products = source.get_products(None).await?;
    spinner.finish_and_clear();

    // First product shown seeds the visitor's interest.
    if let Some(first) = products.first() {
        resolver.observe_category(&first.category);
    }

    let settings = CatalogSettings::from_fields(&ctx.config.page.to_fields());
    let mut page = CatalogPage::new(products, settings);

    let filters = &args.filters;
    if let Some(category) = &filters.category {
        page.toggle_category(category);
    }
    if filters.min_price.is_some() || filters.max_price.is_some() {
        page.set_price_range(filters.min_price, filters.max_price);
    }
    if filters.in_stock {
        page.toggle_in_stock();
    }
    let landed = page.go_to_page(args.page);
    if landed != args.page {
        ctx.output
            .debug(&format!("Page {} out of range, showing {}", args.page, landed));
    }

    let variant = resolver.current_variant();
    let view = page.view();

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "variant": variant, "page": view }));
        return Ok(());
    }

    ctx.output.header(if view.heading.is_empty() {
        "Products"
    } else {
        view.heading
    });
    if !view.description.is_empty() {
        println!("  {}", view.description);
    }
    ctx.output.kv("Variant", &variant_badge(variant));

    if view.show_filters {
        render_filters(&view, ctx);
    }

    ctx.output.header("Results");
    ctx.output.products(&view.items, view.show_ratings);

    let pagination = view.pagination;
    if pagination.total > 0 {
        ctx.output.kv(
            "Showing",
            &format!(
                "{}-{} of {}",
                pagination.start_item(),
                pagination.end_item(),
                pagination.total
            ),
        );
    }
    if pagination.shows_controls() {
        let pages: Vec<String> = pagination
            .page_numbers(5)
            .into_iter()
            .map(|n| {
                if n == pagination.page {
                    format!("[{}]", n)
                } else {
                    n.to_string()
                }
            })
            .collect();
        ctx.output.kv(
            "Pages",
            &format!(
                "{} {} {}",
                if pagination.has_prev { "<" } else { " " },
                pages.join(" "),
                if pagination.has_next { ">" } else { " " }
            ),
        );
    }
    Ok(())
}

fn render_filters(view: &CatalogView<'_>, ctx: &Context) {
    ctx.output.header("Filters");
    let active = view.filters.category.as_deref();
    let categories: Vec<String> = view
        .categories
        .iter()
        .map(|c| {
            if active.is_some_and(|a| a.eq_ignore_ascii_case(c)) {
                format!("[{}]", c)
            } else {
                c.clone()
            }
        })
        .collect();
    ctx.output.kv("Categories", &categories.join("  "));

    let min = view.filters.min_price.unwrap_or(view.price_range.min);
    let max = view.filters.max_price.unwrap_or(view.price_range.max);
    ctx.output.kv(
        "Price",
        &format!(
            "${:.0} - ${:.0} (range ${:.0} - ${:.0})",
            min, max, view.price_range.min, view.price_range.max
        ),
    );
    ctx.output.kv(
        "In stock only",
        if view.filters.in_stock == Some(true) {
            "yes"
        } else {
            "no"
        },
    );
}

fn detail(id: &str, resolver: &PersonalizationResolver, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let detail = ProductDetail::build(&catalog, id)
        .ok_or_else(|| anyhow!("Product with ID {} not found", id))?;
    let recommendations = detail.personalized_recommendations(
        &catalog,
        resolver.profile(),
        DEFAULT_RECOMMENDATION_LIMIT,
    );

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "product": detail.product,
            "related": detail.related,
            "recommendations": recommendations,
            "variant": resolver.current_variant(),
        }));
        return Ok(());
    }

    let product = detail.product;
    ctx.output.header(&product.name);
    ctx.output.kv("Price", &product.display_price());
    ctx.output.kv("Rating", &stars(product));
    ctx.output.kv("Category", &product.category);
    ctx.output.kv("SKU", &product.sku);
    ctx.output.kv(
        "Availability",
        if product.is_available() {
            "In stock"
        } else {
            "Out of stock"
        },
    );
    println!("  {}", product.description);

    ctx.output.header("Related products");
    ctx.output.products(&detail.related, true);

    ctx.output.header("Recommended for you");
    ctx.output.products(&recommendations, true);
    Ok(())
}
