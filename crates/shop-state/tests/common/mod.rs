//! In-memory shop used by the integration tests.
//!
//! Behaves like the remote API: adding a product already in the cart
//! merges the lines, the server prices every line, and a placed order
//! empties the cart. Individual operations can be made to fail, and
//! fetches can be held open to control response order.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use shop_client::{FetchError, StorefrontApi};
use shop_commerce::{
    Amount, Cart, CartItem, CartItemId, OrderId, OrderReceipt, OrderSubmission, Product,
    ProductId, Quantity,
};
use shop_state::{CartStore, Notifier, RecordingNotifier};

/// Operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    ListProducts,
    GetProduct,
    GetCart,
    AddItem,
    UpdateItem,
    RemoveItem,
    ClearCart,
    PlaceOrder,
}

#[derive(Default)]
struct ServerCart {
    lines: Vec<CartItem>,
    next_line: u32,
}

pub struct FakeShop {
    products: Vec<Product>,
    cart: RefCell<ServerCart>,
    failing: RefCell<HashSet<Op>>,
    calls: RefCell<Vec<String>>,
    orders: RefCell<Vec<OrderSubmission>>,
    empties_cart_on_order: Cell<bool>,
    hold: Cell<bool>,
    gates: RefCell<Vec<Option<oneshot::Sender<()>>>>,
}

pub fn product(id: &str, title: &str, price: u32) -> Product {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "title": title,
        "category": "tea",
        "price": price,
        "origin_price": price + 50,
        "unit": "box",
    }))
    .unwrap()
}

impl FakeShop {
    pub fn new() -> Self {
        Self {
            products: vec![
                product("1", "Green tea", 100),
                product("2", "Black tea", 250),
                product("3", "Oolong", 480),
            ],
            cart: RefCell::new(ServerCart::default()),
            failing: RefCell::new(HashSet::new()),
            calls: RefCell::new(Vec::new()),
            orders: RefCell::new(Vec::new()),
            empties_cart_on_order: Cell::new(true),
            hold: Cell::new(false),
            gates: RefCell::new(Vec::new()),
        }
    }

    pub fn price_of(&self, id: &str) -> f64 {
        self.products
            .iter()
            .find(|p| p.id.as_str() == id)
            .map(|p| p.price.value())
            .unwrap()
    }

    pub fn fail(&self, op: Op) {
        self.failing.borrow_mut().insert(op);
    }

    pub fn recover(&self, op: Op) {
        self.failing.borrow_mut().remove(&op);
    }

    /// Keep the server cart after an order, so the client must clear it.
    pub fn keep_cart_after_order(&self) {
        self.empties_cart_on_order.set(false);
    }

    /// Hold every following cart and product fetch until released.
    pub fn hold_fetches(&self) {
        self.hold.set(true);
    }

    /// Let the n-th held fetch (0-based) answer.
    pub fn release(&self, n: usize) {
        if let Some(tx) = self.gates.borrow_mut()[n].take() {
            let _ = tx.send(());
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn orders(&self) -> Vec<OrderSubmission> {
        self.orders.borrow().clone()
    }

    /// Server cart as it stands now.
    pub fn server_cart(&self) -> Cart {
        let lines = self.cart.borrow().lines.clone();
        let total = Amount::new(lines.iter().map(|l| l.total.value()).sum());
        Cart {
            carts: lines,
            total,
            final_total: Some(total),
        }
    }

    /// Change a line behind the client's back.
    pub fn set_server_qty(&self, line: &str, qty: u32) {
        let price = {
            let cart = self.cart.borrow();
            let item = cart.lines.iter().find(|l| l.id.as_str() == line).unwrap();
            item.product.price.value()
        };
        let mut cart = self.cart.borrow_mut();
        let item = cart.lines.iter_mut().find(|l| l.id.as_str() == line).unwrap();
        item.qty = Quantity::new(qty).unwrap();
        item.total = Amount::new(price * f64::from(qty));
        item.final_total = Some(item.total);
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }

    fn check(&self, op: Op) -> Result<(), FetchError> {
        if self.failing.borrow().contains(&op) {
            return Err(FetchError::Rejected(format!("{op:?} refused")));
        }
        Ok(())
    }

    async fn gate(&self) -> Result<(), FetchError> {
        if !self.hold.get() {
            return Ok(());
        }
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().push(Some(tx));
        rx.await
            .map_err(|_| FetchError::Request("gate dropped".to_string()))
    }

    fn find_product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }
}

#[async_trait(?Send)]
impl StorefrontApi for FakeShop {
    async fn list_products(&self) -> Result<Vec<Product>, FetchError> {
        self.record("GET /products");
        self.check(Op::ListProducts)?;
        Ok(self.products.clone())
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, FetchError> {
        self.record(format!("GET /product/{id}"));
        let result = self.check(Op::GetProduct).and_then(|_| {
            self.find_product(id)
                .cloned()
                .ok_or_else(|| FetchError::NotFound(format!("product {id}")))
        });
        self.gate().await?;
        result
    }

    async fn get_cart(&self) -> Result<Cart, FetchError> {
        self.record("GET /cart");
        let result = self.check(Op::GetCart).map(|_| self.server_cart());
        self.gate().await?;
        result
    }

    async fn add_item(&self, product_id: &ProductId, qty: Quantity) -> Result<(), FetchError> {
        self.record(format!("POST /cart {product_id} x{}", qty.get()));
        self.check(Op::AddItem)?;
        let product = self
            .find_product(product_id)
            .cloned()
            .ok_or_else(|| FetchError::Rejected("unknown product".to_string()))?;

        let mut cart = self.cart.borrow_mut();
        if let Some(line) = cart.lines.iter_mut().find(|l| &l.product_id == product_id) {
            let merged = line.qty.get() + qty.get();
            line.qty = Quantity::new(merged).unwrap();
            line.total = Amount::new(product.price.value() * f64::from(merged));
            line.final_total = Some(line.total);
            return Ok(());
        }

        cart.next_line += 1;
        let total = Amount::new(product.price.value() * f64::from(qty.get()));
        let id = CartItemId::new(format!("line-{}", cart.next_line));
        cart.lines.push(CartItem {
            id,
            product_id: product_id.clone(),
            qty,
            product,
            total,
            final_total: Some(total),
        });
        Ok(())
    }

    async fn update_item(
        &self,
        line_id: &CartItemId,
        product_id: &ProductId,
        qty: Quantity,
    ) -> Result<(), FetchError> {
        self.record(format!("PUT /cart/{line_id} {product_id} x{}", qty.get()));
        self.check(Op::UpdateItem)?;
        let mut cart = self.cart.borrow_mut();
        let line = cart
            .lines
            .iter_mut()
            .find(|l| &l.id == line_id)
            .ok_or_else(|| FetchError::Rejected("unknown line".to_string()))?;
        line.qty = qty;
        line.total = Amount::new(line.product.price.value() * f64::from(qty.get()));
        line.final_total = Some(line.total);
        Ok(())
    }

    async fn remove_item(&self, line_id: &CartItemId) -> Result<(), FetchError> {
        self.record(format!("DELETE /cart/{line_id}"));
        self.check(Op::RemoveItem)?;
        self.cart.borrow_mut().lines.retain(|l| &l.id != line_id);
        Ok(())
    }

    async fn clear_cart(&self) -> Result<(), FetchError> {
        self.record("DELETE /carts");
        self.check(Op::ClearCart)?;
        self.cart.borrow_mut().lines.clear();
        Ok(())
    }

    async fn place_order(&self, order: &OrderSubmission) -> Result<OrderReceipt, FetchError> {
        self.record("POST /order");
        self.check(Op::PlaceOrder)?;
        let cart = self.server_cart();
        if cart.is_empty() {
            return Err(FetchError::Rejected("cart is empty".to_string()));
        }
        self.orders.borrow_mut().push(order.clone());
        let number = self.orders.borrow().len();
        if self.empties_cart_on_order.get() {
            self.cart.borrow_mut().lines.clear();
        }
        Ok(OrderReceipt {
            order_id: OrderId::new(format!("order-{number}")),
            total: cart.total,
            create_at: 1_700_000_000,
        })
    }
}

/// A store over a fresh shop, plus handles to inspect both ends.
pub fn setup() -> (Rc<FakeShop>, Rc<RecordingNotifier>, CartStore<FakeShop>) {
    let shop = Rc::new(FakeShop::new());
    let notifier = Rc::new(RecordingNotifier::new());
    let store = CartStore::new(Rc::clone(&shop), Rc::clone(&notifier) as Rc<dyn Notifier>);
    (shop, notifier, store)
}

pub fn line_id(id: &str) -> CartItemId {
    CartItemId::new(id)
}

pub fn qty(n: u32) -> Quantity {
    Quantity::new(n).unwrap()
}
