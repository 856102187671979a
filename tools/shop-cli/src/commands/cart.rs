//! Cart commands.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use shop_commerce::{CartItemId, ProductId, Quantity};
use shop_state::ShopError;

use super::{CartArgs, CartCommand};
use crate::context::{Context, Store};
use crate::screens;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let store = ctx.store()?;

    let spinner = ctx.output.spinner("Loading cart...");
    let loaded = store.refresh().await;
    spinner.finish_and_clear();
    loaded.context("Could not load the cart")?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add { product_id, qty } => {
            let qty = Quantity::selectable(qty)?;
            store.add_item(&ProductId::new(product_id), qty).await?;
        }
        CartCommand::Set { line, qty } => {
            store
                .update_item(&CartItemId::new(line), Quantity::new(qty)?)
                .await?;
        }
        CartCommand::Inc { line } => store.increment(&CartItemId::new(line)).await?,
        CartCommand::Dec { line } => decrement(&store, CartItemId::new(line)).await?,
        CartCommand::Remove { line } => store.remove_item(&CartItemId::new(line)).await?,
        CartCommand::Clear { yes } => {
            if store.snapshot().is_empty() {
                ctx.output.info("Cart is already empty");
                return Ok(());
            }
            if !yes && !confirm(ctx, "Remove every item from the cart?")? {
                ctx.output.info("Cancelled");
                return Ok(());
            }
            store.clear().await?;
        }
    }

    screens::cart(&ctx.output, &store.snapshot());
    Ok(())
}

async fn decrement(store: &Store, line: CartItemId) -> Result<()> {
    match store.decrement(&line).await {
        Err(ShopError::AtMinimumQuantity) => {
            bail!("Line {} is at one unit; use `shop cart remove {}` instead", line, line)
        }
        other => Ok(other?),
    }
}

pub(crate) fn confirm(ctx: &Context, prompt: &str) -> Result<bool> {
    if !ctx.output.is_interactive() {
        bail!("Confirmation required; pass --yes to run non-interactively");
    }
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
