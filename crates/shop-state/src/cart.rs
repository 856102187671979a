//! Shared cart store.
//!
//! The server owns the cart. The store keeps the last snapshot it fetched,
//! hands it to every screen, and refetches after each mutation. The old
//! snapshot stays visible until the new one lands.
//!
//! ```text
//! mutation ──▶ API call ──▶ refresh ──▶ token check ──▶ snapshot ──▶ subscribers
//!                  │                         │
//!                  └─ failure: one notice    └─ stale: discarded
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use shop_client::StorefrontApi;
use shop_commerce::{Amount, Cart, CartItem, CartItemId, ProductId, Quantity};

use crate::error::ShopError;
use crate::notify::{Action, Notice, Notifier};
use crate::sequence::{RequestSequence, RequestToken};

/// Success message after adding to the cart.
pub const ADDED_TO_CART: &str = "Added to cart";

/// Outcome of a cart refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// The response replaced the snapshot.
    Applied,
    /// A newer response had already landed; this one was dropped.
    Stale,
}

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The cart as last fetched from the server.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartSnapshot {
    cart: Cart,
    loaded: bool,
}

impl CartSnapshot {
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// True until a fetch returns at least one line.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Checkout needs a non-empty cart.
    pub fn can_checkout(&self) -> bool {
        !self.is_empty()
    }

    /// Whether any fetch has been applied yet.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn total(&self) -> Amount {
        self.cart.total
    }

    pub fn final_total(&self) -> Amount {
        self.cart.payable_total()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    pub fn line(&self, id: &CartItemId) -> Option<&CartItem> {
        self.cart.line(id)
    }

    /// Display rows for the cart table.
    pub fn rows(&self) -> Vec<CartRow> {
        self.cart.carts.iter().map(CartRow::from).collect()
    }
}

/// One row of the cart table.
#[derive(Debug, Clone, PartialEq)]
pub struct CartRow {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub title: String,
    pub unit: String,
    pub image_url: String,
    pub qty: Quantity,
    pub unit_price: Amount,
    pub total: Amount,
    /// The "-" control is disabled at one unit.
    pub can_decrement: bool,
}

impl From<&CartItem> for CartRow {
    fn from(line: &CartItem) -> Self {
        Self {
            id: line.id.clone(),
            product_id: line.product_id.clone(),
            title: line.product.title.clone(),
            unit: line.product.unit.clone(),
            image_url: line.product.image_url.clone(),
            qty: line.qty,
            unit_price: line.product.price,
            total: line.total,
            can_decrement: line.can_decrement(),
        }
    }
}

type Subscriber = Rc<dyn Fn(&CartSnapshot)>;

#[derive(Default)]
struct StoreState {
    snapshot: CartSnapshot,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

/// Cart state shared by every screen.
///
/// Cloning is cheap and every clone sees the same snapshot. Borrows of
/// the inner state never span an `.await`, so overlapping operations on
/// the same store are fine.
pub struct CartStore<A> {
    api: Rc<A>,
    notifier: Rc<dyn Notifier>,
    sequence: Rc<RequestSequence>,
    state: Rc<RefCell<StoreState>>,
}

impl<A> Clone for CartStore<A> {
    fn clone(&self) -> Self {
        Self {
            api: Rc::clone(&self.api),
            notifier: Rc::clone(&self.notifier),
            sequence: Rc::clone(&self.sequence),
            state: Rc::clone(&self.state),
        }
    }
}

impl<A: StorefrontApi> CartStore<A> {
    pub fn new(api: Rc<A>, notifier: Rc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            sequence: Rc::new(RequestSequence::new()),
            state: Rc::new(RefCell::new(StoreState::default())),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> CartSnapshot {
        self.state.borrow().snapshot.clone()
    }

    /// Call `f` with every newly applied snapshot.
    pub fn subscribe(&self, f: impl Fn(&CartSnapshot) + 'static) -> SubscriptionId {
        let mut state = self.state.borrow_mut();
        state.next_subscription += 1;
        let id = SubscriptionId(state.next_subscription);
        state.subscribers.push((id, Rc::new(f)));
        id
    }

    /// Stop notifying a subscriber. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.subscribers.len();
        state.subscribers.retain(|(sid, _)| *sid != id);
        state.subscribers.len() != before
    }

    /// Fetch the cart and publish it unless a newer fetch already landed.
    ///
    /// A failing fetch whose token is already stale is dropped silently and
    /// reported as [`Refresh::Stale`].
    pub async fn refresh(&self) -> Result<Refresh, ShopError> {
        let token = self.sequence.issue();
        tracing::debug!(token = token.get(), "refreshing cart");

        match self.api.get_cart().await {
            Ok(cart) => Ok(self.apply(token, cart)),
            Err(_) if self.sequence.is_stale(token) => {
                tracing::debug!(token = token.get(), "dropping failed stale cart fetch");
                Ok(Refresh::Stale)
            }
            Err(err) => {
                tracing::warn!(error = %err, "cart fetch failed");
                self.notifier.notify(Notice::failure(Action::LoadCart));
                Err(err.into())
            }
        }
    }

    fn apply(&self, token: RequestToken, cart: Cart) -> Refresh {
        if !self.sequence.try_apply(token) {
            tracing::debug!(token = token.get(), "discarding stale cart response");
            return Refresh::Stale;
        }

        let (snapshot, subscribers) = {
            let mut state = self.state.borrow_mut();
            state.snapshot = CartSnapshot { cart, loaded: true };
            let subscribers: Vec<Subscriber> =
                state.subscribers.iter().map(|(_, f)| Rc::clone(f)).collect();
            (state.snapshot.clone(), subscribers)
        };

        tracing::debug!(
            token = token.get(),
            lines = snapshot.cart.line_count(),
            "cart snapshot applied"
        );

        // Subscribers may read the store again, so the borrow is released first.
        for subscriber in subscribers {
            subscriber(&snapshot);
        }
        Refresh::Applied
    }

    /// Add a product, then refetch.
    pub async fn add_item(&self, product_id: &ProductId, qty: Quantity) -> Result<(), ShopError> {
        self.api
            .add_item(product_id, qty)
            .await
            .map_err(|err| self.report(Action::AddItem, err))?;

        tracing::info!(product_id = %product_id, qty = qty.get(), "added to cart");
        self.notifier.notify(Notice::success(ADDED_TO_CART));
        self.settle().await;
        Ok(())
    }

    /// Set the quantity of a line, then refetch.
    pub async fn update_item(&self, line_id: &CartItemId, qty: Quantity) -> Result<(), ShopError> {
        let product_id = self.line_product(line_id)?;
        self.api
            .update_item(line_id, &product_id, qty)
            .await
            .map_err(|err| self.report(Action::UpdateItem, err))?;

        tracing::info!(line = %line_id, qty = qty.get(), "cart line updated");
        self.settle().await;
        Ok(())
    }

    /// One more unit of a line.
    pub async fn increment(&self, line_id: &CartItemId) -> Result<(), ShopError> {
        let qty = self.line_qty(line_id)?;
        self.update_item(line_id, qty.incremented()).await
    }

    /// One fewer unit of a line. Refused at one unit.
    pub async fn decrement(&self, line_id: &CartItemId) -> Result<(), ShopError> {
        let qty = self.line_qty(line_id)?;
        let lower = qty.decremented().ok_or(ShopError::AtMinimumQuantity)?;
        self.update_item(line_id, lower).await
    }

    /// Drop a line, then refetch.
    pub async fn remove_item(&self, line_id: &CartItemId) -> Result<(), ShopError> {
        self.api
            .remove_item(line_id)
            .await
            .map_err(|err| self.report(Action::RemoveItem, err))?;

        tracing::info!(line = %line_id, "cart line removed");
        self.settle().await;
        Ok(())
    }

    /// Empty the cart, then refetch.
    pub async fn clear(&self) -> Result<(), ShopError> {
        self.api
            .clear_cart()
            .await
            .map_err(|err| self.report(Action::ClearCart, err))?;

        tracing::info!("cart cleared");
        self.settle().await;
        Ok(())
    }

    /// Refetch after a successful mutation. A failed refetch has already
    /// been reported and does not undo the mutation.
    async fn settle(&self) {
        if let Err(err) = self.refresh().await {
            tracing::debug!(error = %err, "refresh after mutation failed");
        }
    }

    fn report(&self, action: Action, err: shop_client::FetchError) -> ShopError {
        tracing::warn!(?action, error = %err, "cart operation failed");
        self.notifier.notify(Notice::failure(action));
        err.into()
    }

    fn line_product(&self, line_id: &CartItemId) -> Result<ProductId, ShopError> {
        self.state
            .borrow()
            .snapshot
            .line(line_id)
            .map(|line| line.product_id.clone())
            .ok_or_else(|| ShopError::UnknownLine(line_id.clone()))
    }

    fn line_qty(&self, line_id: &CartItemId) -> Result<Quantity, ShopError> {
        self.state
            .borrow()
            .snapshot
            .line(line_id)
            .map(|line| line.qty)
            .ok_or_else(|| ShopError::UnknownLine(line_id.clone()))
    }
}
