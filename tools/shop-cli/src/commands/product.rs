//! Show one product.

use anyhow::{bail, Result};
use shop_commerce::ProductId;
use shop_state::{Load, ProductDetail};

use super::ProductArgs;
use crate::context::Context;
use crate::screens;

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    let detail = ProductDetail::new();
    let id = ProductId::new(args.id);

    let spinner = ctx.output.spinner("Loading product...");
    let load = detail.mount(store.api(), store.notifier(), &id).await;
    spinner.finish_and_clear();

    match load {
        Load::Applied | Load::Stale => {}
        Load::NotFound => bail!("No product with ID {}", id),
        Load::Failed => bail!("Could not load product {}", id),
    }

    detail.select_quantity(args.qty)?;
    if let Some(product) = detail.product() {
        screens::product_detail(&ctx.output, &product, detail.quantity());
    }

    if args.add {
        detail.add_to_cart(&store).await?;
        ctx.output.debug(&format!(
            "cart now holds {} item(s)",
            store.snapshot().item_count()
        ));
    }
    Ok(())
}
