//! Product screens: the list, the detail page and the "see more" modal.

use std::cell::{Cell, RefCell};

use shop_client::{FetchError, StorefrontApi};
use shop_commerce::{CommerceError, Product, ProductId, Quantity};

use crate::cart::CartStore;
use crate::error::ShopError;
use crate::notify::{Action, Notice, Notifier};
use crate::sequence::RequestSequence;

/// Outcome of a screen fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Load {
    /// Fresh data is on screen.
    Applied,
    /// Superseded by a later fetch.
    Stale,
    /// The product does not exist.
    NotFound,
    /// The fetch failed; a previous value for the same id stays.
    Failed,
}

/// Products list screen.
#[derive(Debug, Default)]
pub struct ProductList {
    sequence: RequestSequence,
    products: RefCell<Vec<Product>>,
}

impl ProductList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the catalog. Called each time the screen is shown.
    pub async fn mount<A>(&self, api: &A, notifier: &dyn Notifier) -> Load
    where
        A: StorefrontApi + ?Sized,
    {
        let token = self.sequence.issue();
        match api.list_products().await {
            Ok(products) => {
                if !self.sequence.try_apply(token) {
                    return Load::Stale;
                }
                tracing::debug!(count = products.len(), "products loaded");
                *self.products.borrow_mut() = products;
                Load::Applied
            }
            Err(_) if self.sequence.is_stale(token) => Load::Stale,
            Err(err) => {
                tracing::warn!(error = %err, "product list fetch failed");
                notifier.notify(Notice::failure(Action::LoadProducts));
                Load::Failed
            }
        }
    }

    pub fn products(&self) -> Vec<Product> {
        self.products.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.products.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.borrow().is_empty()
    }

    pub fn find(&self, id: &ProductId) -> Option<Product> {
        self.products.borrow().iter().find(|p| &p.id == id).cloned()
    }
}

/// Quick "add 1" from the list.
pub async fn quick_add<A: StorefrontApi>(
    store: &CartStore<A>,
    product_id: &ProductId,
) -> Result<(), ShopError> {
    store.add_item(product_id, Quantity::ONE).await
}

/// Single product screen.
#[derive(Debug, Default)]
pub struct ProductDetail {
    sequence: RequestSequence,
    product: RefCell<Option<Product>>,
    quantity: Cell<Quantity>,
}

impl ProductDetail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch one product and reset the selector to 1.
    ///
    /// A later mount supersedes an earlier one still in flight. After a
    /// failed fetch only a product with the requested id stays shown.
    pub async fn mount<A>(&self, api: &A, notifier: &dyn Notifier, id: &ProductId) -> Load
    where
        A: StorefrontApi + ?Sized,
    {
        let token = self.sequence.issue();
        self.quantity.set(Quantity::ONE);

        let result = api.get_product(id).await;
        if self.sequence.is_stale(token) {
            tracing::debug!(product_id = %id, "discarding stale product response");
            return Load::Stale;
        }

        match result {
            Ok(product) => {
                self.sequence.try_apply(token);
                *self.product.borrow_mut() = Some(product);
                Load::Applied
            }
            Err(err) => {
                tracing::warn!(product_id = %id, error = %err, "product fetch failed");
                notifier.notify(Notice::failure(Action::LoadProduct));
                // Older responses still in flight must not land after this one.
                self.sequence.try_apply(token);
                let mut shown = self.product.borrow_mut();
                if matches!(err, FetchError::NotFound(_)) {
                    *shown = None;
                    Load::NotFound
                } else {
                    // Keep the previous value only if it is the same product.
                    if shown.as_ref().is_some_and(|p| &p.id != id) {
                        *shown = None;
                    }
                    Load::Failed
                }
            }
        }
    }

    pub fn product(&self) -> Option<Product> {
        self.product.borrow().clone()
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity.get()
    }

    /// Pick a quantity from the 1–10 selector.
    pub fn select_quantity(&self, qty: u32) -> Result<Quantity, CommerceError> {
        let qty = Quantity::selectable(qty)?;
        self.quantity.set(qty);
        Ok(qty)
    }

    /// Add the selected quantity of the shown product.
    pub async fn add_to_cart<A: StorefrontApi>(&self, store: &CartStore<A>) -> Result<(), ShopError> {
        let id = self
            .product
            .borrow()
            .as_ref()
            .map(|p| p.id.clone())
            .ok_or(ShopError::NoProduct)?;
        store.add_item(&id, self.quantity.get()).await
    }
}

/// Product "see more" modal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductModal {
    product: Option<Product>,
    quantity: Quantity,
    open: bool,
}

impl ProductModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a product with the selector back at 1.
    pub fn open(&mut self, product: Product) {
        self.product = Some(product);
        self.quantity = Quantity::ONE;
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn select_quantity(&mut self, qty: u32) -> Result<Quantity, CommerceError> {
        self.quantity = Quantity::selectable(qty)?;
        Ok(self.quantity)
    }

    /// Add the selected quantity. The modal stays open.
    pub async fn add_to_cart<A: StorefrontApi>(&self, store: &CartStore<A>) -> Result<(), ShopError> {
        let product = self.product.as_ref().ok_or(ShopError::NoProduct)?;
        store.add_item(&product.id, self.quantity).await
    }
}
