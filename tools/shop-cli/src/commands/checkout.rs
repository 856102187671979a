//! Checkout: fill in the order form and place the order.

use anyhow::{bail, Context as _, Result};
use dialoguer::Input;
use shop_state::{submit_order, CheckoutForm, Field, ShopError};

use super::cart::confirm;
use super::CheckoutArgs;
use crate::context::{Context, Store};
use crate::output::money;
use crate::screens;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    store.refresh().await.context("Could not load the cart")?;

    let snapshot = store.snapshot();
    if snapshot.is_empty() {
        bail!("Your cart is empty; add something with `shop cart add <product>` first");
    }
    screens::cart(&ctx.output, &snapshot);

    let mut form = CheckoutForm::new();
    let given = [
        (Field::Email, args.email),
        (Field::Name, args.name),
        (Field::Tel, args.tel),
        (Field::Address, args.address),
        (Field::Message, args.message),
    ];
    for (field, value) in given {
        if let Some(value) = value {
            form.set(field, value);
            form.touch(field);
        }
    }

    fill_form(ctx, &mut form)?;

    if !args.yes
        && !confirm(
            ctx,
            &format!("Place order for {}?", money(snapshot.final_total())),
        )?
    {
        ctx.output.info("Cancelled");
        return Ok(());
    }

    place(ctx, &store, &mut form).await
}

/// Prompt for every field that is missing or invalid.
pub(crate) fn fill_form(ctx: &Context, form: &mut CheckoutForm) -> Result<()> {
    let interactive = ctx.output.is_interactive();

    for field in Field::ALL {
        if !interactive {
            form.touch(field);
            continue;
        }

        if !field.is_required() {
            if !form.is_touched(field) {
                let note: String = Input::new()
                    .with_prompt(format!("{} (optional)", field.display_name()))
                    .allow_empty(true)
                    .interact_text()?;
                form.set(field, note);
                form.touch(field);
            }
            continue;
        }

        if field.validate(form.value(field)).is_none() {
            continue;
        }
        if let Some(message) = form.error(field) {
            ctx.output.warn(message);
        }
        let value: String = Input::new()
            .with_prompt(field.display_name())
            .with_initial_text(form.value(field).to_string())
            .validate_with(move |input: &String| -> Result<(), &'static str> {
                match field.validate(input) {
                    Some(message) => Err(message),
                    None => Ok(()),
                }
            })
            .interact_text()?;
        form.set(field, value);
        form.touch(field);
    }

    let errors = form.visible_errors();
    if !errors.is_empty() {
        for (field, message) in errors.iter() {
            ctx.output.error(&format!("--{}: {}", field, message));
        }
        bail!("Checkout form is incomplete");
    }
    Ok(())
}

pub(crate) async fn place(ctx: &Context, store: &Store, form: &mut CheckoutForm) -> Result<()> {
    let spinner = ctx.output.spinner("Placing order...");
    let result = submit_order(form, store).await;
    spinner.finish_and_clear();

    match result {
        Ok(receipt) => {
            screens::receipt(&ctx.output, &receipt);
            Ok(())
        }
        Err(ShopError::InvalidForm(errors)) => bail!("Checkout form is invalid: {}", errors),
        Err(err) => Err(err).context("Order was not placed; your cart is unchanged"),
    }
}
