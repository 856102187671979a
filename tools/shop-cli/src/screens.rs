//! Terminal renderings of the storefront screens.

use shop_commerce::{OrderReceipt, Product, Quantity};
use shop_state::{CartSnapshot, Route};

use crate::output::{format_timestamp, money, price_label, truncate, Output};

const ID_WIDTH: usize = 22;
const TITLE_WIDTH: usize = 28;

/// Landing screen.
pub fn home(out: &Output) {
    out.header("Welcome to the tea shop");
    out.text("Browse the products, fill your cart and check out.");
    out.kv("products", &Route::Products.fragment());
    out.kv("cart", &Route::Cart.fragment());
}

/// Product table.
pub fn product_list(out: &Output, products: &[Product]) {
    if out.is_json() {
        out.json(&products);
        return;
    }

    out.header("Products");
    if products.is_empty() {
        out.info("No products available");
        return;
    }

    let widths = [ID_WIDTH, TITLE_WIDTH, 10, 24];
    out.table_header(&["ID", "TITLE", "CATEGORY", "PRICE"], &widths);
    for product in products {
        let title = truncate(&product.title, TITLE_WIDTH);
        let price = format!("{} / {}", price_label(product), product.unit);
        out.table_row(
            &[product.id.as_str(), &title, &product.category, &price],
            &widths,
        );
    }
}

/// Product detail with the current selector value.
pub fn product_detail(out: &Output, product: &Product, qty: Quantity) {
    if out.is_json() {
        out.json(product);
        return;
    }

    out.header(&product.title);
    out.kv("id", product.id.as_str());
    out.kv("category", &product.category);
    out.kv("price", &format!("{} / {}", price_label(product), product.unit));
    if !product.image_url.is_empty() {
        out.kv("image", &product.image_url);
    }
    out.kv("link", &product.detail_fragment());
    out.kv("quantity", &qty.to_string());
    if !product.description.is_empty() {
        println!();
        out.text(&product.description);
    }
    if !product.content.is_empty() {
        println!();
        out.text(&product.content);
    }
}

/// Cart table with totals.
pub fn cart(out: &Output, snapshot: &CartSnapshot) {
    if out.is_json() {
        out.json(snapshot.cart());
        return;
    }

    out.header("Cart");
    if snapshot.is_empty() {
        out.info("Your cart is empty");
        return;
    }

    let widths = [ID_WIDTH, TITLE_WIDTH, 6, 12];
    out.table_header(&["LINE", "PRODUCT", "QTY", "TOTAL"], &widths);
    for row in snapshot.rows() {
        let title = truncate(&row.title, TITLE_WIDTH);
        let qty = if row.can_decrement {
            row.qty.to_string()
        } else {
            format!("{} (min)", row.qty)
        };
        out.table_row(&[row.id.as_str(), &title, &qty, &money(row.total)], &widths);
    }
    println!();
    out.kv("items", &snapshot.item_count().to_string());
    out.kv("total", &money(snapshot.total()));
    if snapshot.final_total() != snapshot.total() {
        out.kv("after discounts", &money(snapshot.final_total()));
    }
}

/// Confirmation after an order.
pub fn receipt(out: &Output, receipt: &OrderReceipt) {
    if out.is_json() {
        out.json(receipt);
        return;
    }

    out.header("Order placed");
    out.kv("order", receipt.order_id.as_str());
    out.kv("total", &money(receipt.total));
    out.kv("created", &format_timestamp(receipt.create_at));
}

/// Unknown location.
pub fn not_found(out: &Output, path: &str) {
    out.header("Page not found");
    out.warn(&format!("Nothing lives at {}", path));
    out.kv("back home", &Route::Home.fragment());
}
