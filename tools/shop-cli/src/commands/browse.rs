//! Interactive storefront.
//!
//! Each loop renders the screen for the current route, then offers the
//! actions that screen has plus the navigation bar. Screens fetch when
//! they become active; actions inside a screen refetch only what changed.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::{bail, Result};
use console::style;
use dialoguer::{Input, Select};
use shop_commerce::{CartItemId, Product, ProductId, Quantity};
use shop_state::{quick_add, CheckoutForm, Load, ProductDetail, ProductList, ProductModal, Route};

use super::BrowseArgs;
use crate::context::{Context, Store};
use crate::screens;

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    if !ctx.output.is_interactive() {
        bail!("browse needs a terminal; use `shop open <fragment>` instead");
    }

    let mut session = Session::new(ctx)?;
    let _ = session.store.refresh().await;
    session.navigate(Route::parse(&args.start));

    loop {
        session.render().await;
        let choices = session.choices();
        let labels: Vec<&str> = choices.iter().map(|(label, _)| label.as_str()).collect();

        let picked = Select::new()
            .with_prompt(format!("{}  {}", session.nav_bar(), style("(Esc quits)").dim()))
            .items(&labels)
            .default(0)
            .interact_opt()?;

        let Some(index) = picked else { break };
        let Some((_, choice)) = choices.into_iter().nth(index) else { break };
        if !session.apply(choice).await? {
            break;
        }
    }
    Ok(())
}

/// Render the screen behind a fragment once, without prompting.
pub(crate) async fn render_once(ctx: &Context, route: Route) -> Result<()> {
    let mut session = Session::new(ctx)?;
    session.navigate(route);
    session.render().await;
    Ok(())
}

enum Choice {
    Go(Route),
    Link,
    Quit,
    SeeMore(Product),
    QuickAdd(ProductId),
    PickQuantity,
    AddSelected,
    CloseModal,
    Inc(CartItemId),
    Dec(CartItemId),
    Remove(CartItemId),
    Clear,
    Checkout,
}

struct Session<'a> {
    ctx: &'a Context,
    store: Store,
    route: Route,
    mounted: bool,
    list: ProductList,
    detail: ProductDetail,
    modal: ProductModal,
    cart_count: Rc<Cell<u32>>,
}

impl<'a> Session<'a> {
    fn new(ctx: &'a Context) -> Result<Self> {
        let store = ctx.store()?;
        let cart_count = Rc::new(Cell::new(0));
        let badge = Rc::clone(&cart_count);
        store.subscribe(move |cart| badge.set(cart.item_count()));

        Ok(Self {
            ctx,
            store,
            route: Route::Home,
            mounted: false,
            list: ProductList::new(),
            detail: ProductDetail::new(),
            modal: ProductModal::new(),
            cart_count,
        })
    }

    fn navigate(&mut self, route: Route) {
        tracing::debug!(to = %route, "navigate");
        self.route = route;
        self.mounted = false;
        self.modal.close();
    }

    fn nav_bar(&self) -> String {
        let cart = format!("Cart ({})", self.cart_count.get());
        let items = [
            (Route::Home, "Home".to_string()),
            (Route::Products, "Products".to_string()),
            (Route::Cart, cart),
        ];
        items
            .into_iter()
            .map(|(route, label)| {
                let active = route == self.route
                    || (route == Route::Products && matches!(self.route, Route::ProductDetail(_)));
                if active {
                    style(label).bold().underlined().to_string()
                } else {
                    label
                }
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// Fetch-on-mount, then draw.
    async fn render(&mut self) {
        let ctx = self.ctx;
        let out = &ctx.output;
        let first = !self.mounted;
        self.mounted = true;

        match &self.route {
            Route::Home => screens::home(out),
            Route::Products => {
                if first {
                    self.list.mount(self.store.api(), self.store.notifier()).await;
                }
                if let Some(product) = self.modal.product().filter(|_| self.modal.is_open()) {
                    screens::product_detail(out, product, self.modal.quantity());
                } else {
                    screens::product_list(out, &self.list.products());
                }
            }
            Route::ProductDetail(id) => {
                if first {
                    let load = self.detail.mount(self.store.api(), self.store.notifier(), id).await;
                    if load == Load::NotFound {
                        screens::not_found(out, &self.route.fragment());
                        return;
                    }
                }
                match self.detail.product() {
                    Some(product) => screens::product_detail(out, &product, self.detail.quantity()),
                    None => out.warn("Product unavailable"),
                }
            }
            Route::Cart => {
                if first {
                    let _ = self.store.refresh().await;
                }
                screens::cart(out, &self.store.snapshot());
            }
            Route::NotFound(path) => screens::not_found(out, path),
        }
    }

    fn choices(&self) -> Vec<(String, Choice)> {
        let mut choices = Vec::new();

        match &self.route {
            Route::Products if self.modal.is_open() => {
                choices.push((format!("Quantity: {}", self.modal.quantity()), Choice::PickQuantity));
                choices.push(("Add to cart".to_string(), Choice::AddSelected));
                if let Some(product) = self.modal.product() {
                    choices.push((
                        "Open product page".to_string(),
                        Choice::Go(Route::ProductDetail(product.id.clone())),
                    ));
                }
                choices.push(("Close".to_string(), Choice::CloseModal));
            }
            Route::Products => {
                for product in self.list.products() {
                    choices.push((
                        format!("Add 1: {}", product.title),
                        Choice::QuickAdd(product.id.clone()),
                    ));
                    choices.push((format!("See more: {}", product.title), Choice::SeeMore(product)));
                }
            }
            Route::ProductDetail(_) if self.detail.product().is_some() => {
                choices.push((format!("Quantity: {}", self.detail.quantity()), Choice::PickQuantity));
                choices.push(("Add to cart".to_string(), Choice::AddSelected));
            }
            Route::Cart => {
                let snapshot = self.store.snapshot();
                for row in snapshot.rows() {
                    choices.push((format!("+ {}", row.title), Choice::Inc(row.id.clone())));
                    if row.can_decrement {
                        choices.push((format!("- {}", row.title), Choice::Dec(row.id.clone())));
                    }
                    choices.push((format!("Remove {}", row.title), Choice::Remove(row.id)));
                }
                if snapshot.can_checkout() {
                    choices.push(("Clear cart".to_string(), Choice::Clear));
                    choices.push(("Checkout".to_string(), Choice::Checkout));
                }
            }
            _ => {}
        }

        for route in Route::nav() {
            if route != self.route {
                choices.push((format!("Go to {}", route.title()), Choice::Go(route)));
            }
        }
        choices.push(("Open link...".to_string(), Choice::Link));
        choices.push(("Quit".to_string(), Choice::Quit));
        choices
    }

    /// Returns `false` to leave the loop.
    async fn apply(&mut self, choice: Choice) -> Result<bool> {
        // Store operations report their own failures through the notifier.
        let outcome = match choice {
            Choice::Quit => return Ok(false),
            Choice::Go(route) => {
                self.navigate(route);
                Ok(())
            }
            Choice::Link => {
                let fragment: String = Input::new()
                    .with_prompt("Link (e.g. #/products)")
                    .interact_text()?;
                self.navigate(Route::parse(&fragment));
                Ok(())
            }
            Choice::SeeMore(product) => {
                self.modal.open(product);
                Ok(())
            }
            Choice::CloseModal => {
                self.modal.close();
                Ok(())
            }
            Choice::QuickAdd(id) => quick_add(&self.store, &id).await,
            Choice::PickQuantity => {
                let qty = pick_quantity()?;
                if self.modal.is_open() {
                    self.modal.select_quantity(qty)?;
                } else {
                    self.detail.select_quantity(qty)?;
                }
                Ok(())
            }
            Choice::AddSelected => {
                if self.modal.is_open() {
                    self.modal.add_to_cart(&self.store).await
                } else {
                    self.detail.add_to_cart(&self.store).await
                }
            }
            Choice::Inc(line) => self.store.increment(&line).await,
            Choice::Dec(line) => self.store.decrement(&line).await,
            Choice::Remove(line) => self.store.remove_item(&line).await,
            Choice::Clear => self.store.clear().await,
            Choice::Checkout => {
                self.checkout().await?;
                Ok(())
            }
        };

        if let Err(err) = outcome {
            tracing::debug!(error = %err, "action failed");
        }
        Ok(true)
    }

    async fn checkout(&mut self) -> Result<()> {
        let mut form = CheckoutForm::new();
        if super::checkout::fill_form(self.ctx, &mut form).is_err() {
            return Ok(());
        }
        if super::checkout::place(self.ctx, &self.store, &mut form).await.is_ok() {
            self.navigate(Route::Home);
        }
        Ok(())
    }
}

fn pick_quantity() -> Result<u32> {
    let options: Vec<String> = Quantity::selector_options().map(|q| q.to_string()).collect();
    let index = Select::new()
        .with_prompt("Quantity")
        .items(&options)
        .default(0)
        .interact()?;
    Ok(Quantity::selector_options()
        .nth(index)
        .map(Quantity::get)
        .unwrap_or(Quantity::MIN))
}
