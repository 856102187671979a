//! List the catalog.

use anyhow::{bail, Result};
use shop_state::{Load, ProductList};

use super::ProductsArgs;
use crate::context::Context;
use crate::screens;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    let list = ProductList::new();

    let spinner = ctx.output.spinner("Loading products...");
    let load = list.mount(store.api(), store.notifier()).await;
    spinner.finish_and_clear();

    if load == Load::Failed {
        bail!("Could not load the catalog");
    }

    let mut products = list.products();
    if let Some(category) = &args.category {
        products.retain(|p| p.category.eq_ignore_ascii_case(category));
    }
    screens::product_list(&ctx.output, &products);
    Ok(())
}
