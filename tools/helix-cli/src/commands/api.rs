//! Replay a request against the product endpoint.

use anyhow::{Context as _, Result};
use helix_api::ProductApi;
use http::Method;
use serde_json::json;

use super::ApiArgs;
use crate::context::Context;

/// Run the api command.
pub async fn run(args: ApiArgs, ctx: &Context) -> Result<()> {
    let method = Method::from_bytes(args.method.to_ascii_uppercase().as_bytes())
        .with_context(|| format!("Invalid HTTP method: {}", args.method))?;

    let api = ProductApi::new(ctx.source()?);

    let spinner = ctx.output.spinner(&format!("{} /api/products?{}", method, args.query));
    let reply = api.handle(&method, &args.query).await;
    spinner.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "status": reply.status.as_u16(),
            "body": reply.body,
        }));
        return Ok(());
    }

    let status = reply.status.to_string();
    if reply.is_success() {
        ctx.output.success(&status);
    } else {
        ctx.output.warn(&status);
    }
    ctx.output.json(&reply.body);
    Ok(())
}
