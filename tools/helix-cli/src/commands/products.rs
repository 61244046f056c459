//! Catalog queries.

use anyhow::{bail, Result};
use helix_api::{InMemorySource, ProductSource};
use helix_commerce::catalog::{Product, RecommendationContext};

use super::{FilterArgs, ProductsArgs, ProductsCommand};
use crate::context::Context;
use crate::output::stars;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let source = ctx.source()?;

    match args.command {
        ProductsCommand::List(filters) => list(&source, &filters, ctx).await,
        ProductsCommand::Get { id } => get(&source, &id, ctx).await,
        ProductsCommand::Categories => categories(&source, ctx).await,
        ProductsCommand::Recommend {
            category,
            limit,
            personal,
        } => recommend(&source, category, limit, personal, ctx).await,
    }
}

async fn list(source: &InMemorySource, filters: &FilterArgs, ctx: &Context) -> Result<()> {
    let filter = filters.to_filter();

    let spinner = ctx.output.spinner("Fetching products...");
    let products = source.get_products(Some(&filter)).await?;
    spinner.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&format!("Products ({})", products.len()));
    let refs: Vec<&Product> = products.iter().collect();
    ctx.output.products(&refs, true);
    Ok(())
}

async fn get(source: &InMemorySource, id: &str, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner(&format!("Fetching {}...", id));
    let product = source.get_product_by_id(id).await?;
    spinner.finish_and_clear();

    let Some(product) = product else {
        bail!("Product with ID {} not found", id);
    };

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("ID", product.id.as_str());
    ctx.output.kv("SKU", &product.sku);
    ctx.output.kv("Category", &product.category);
    ctx.output.kv("Price", &product.display_price());
    ctx.output.kv("Rating", &stars(&product));
    ctx.output.kv(
        "Availability",
        if product.is_available() {
            "In stock"
        } else {
            "Out of stock"
        },
    );
    ctx.output.kv("Image", &product.image);
    ctx.output.kv("Description", &product.description);
    Ok(())
}

async fn categories(source: &InMemorySource, ctx: &Context) -> Result<()> {
    let categories = source.get_categories().await?;

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    for category in &categories {
        ctx.output.list_item(category);
    }
    Ok(())
}

async fn recommend(
    source: &InMemorySource,
    category: Option<String>,
    limit: usize,
    personal: bool,
    ctx: &Context,
) -> Result<()> {
    let context = if personal {
        let resolver = ctx.resolver()?;
        let profile = resolver.profile();
        RecommendationContext {
            category: category.or_else(|| profile.category.clone()),
            previous_purchases: profile.previous_purchases.clone(),
        }
    } else {
        RecommendationContext {
            category,
            previous_purchases: Vec::new(),
        }
    };
    ctx.output.debug(&format!("Recommendation context: {:?}", context));

    let products = source.get_recommendations(Some(&context), limit).await?;

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header("Recommended for you");
    let refs: Vec<&Product> = products.iter().collect();
    ctx.output.products(&refs, true);
    Ok(())
}
