//! Hash-fragment routing.
//!
//! | Fragment           | Screen         |
//! |--------------------|----------------|
//! | `#/`               | home           |
//! | `#/products`       | product list   |
//! | `#/products/:id`   | product detail |
//! | `#/cart`           | cart           |
//!
//! Anything else is [`Route::NotFound`].

use std::fmt;

use shop_commerce::ProductId;

/// A storefront screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Route {
    #[default]
    Home,
    Products,
    ProductDetail(ProductId),
    Cart,
    /// Unmatched path, kept for display.
    NotFound(String),
}

impl Route {
    /// Resolve a location fragment. The leading `#` is optional, a
    /// trailing slash and a query string are ignored.
    pub fn parse(fragment: &str) -> Route {
        let path = fragment.strip_prefix('#').unwrap_or(fragment);
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["products"] => Route::Products,
            ["products", id] => Route::ProductDetail(ProductId::new(percent_decode(id))),
            ["cart"] => Route::Cart,
            _ => Route::NotFound(normalize(path)),
        }
    }

    /// Canonical fragment, including the leading `#`.
    pub fn fragment(&self) -> String {
        match self {
            Route::Home => "#/".to_string(),
            Route::Products => "#/products".to_string(),
            Route::ProductDetail(id) => format!("#/products/{}", percent_encode(id.as_str())),
            Route::Cart => "#/cart".to_string(),
            Route::NotFound(path) => format!("#{path}"),
        }
    }

    /// Navigation label.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Products => "Products",
            Route::ProductDetail(_) => "Product",
            Route::Cart => "Cart",
            Route::NotFound(_) => "Not found",
        }
    }

    /// Routes shown in the navigation bar.
    pub fn nav() -> [Route; 3] {
        [Route::Home, Route::Products, Route::Cart]
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Route::NotFound(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fragment())
    }
}

impl From<&str> for Route {
    fn from(fragment: &str) -> Self {
        Route::parse(fragment)
    }
}

fn normalize(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

fn percent_decode(segment: &str) -> String {
    let bytes = segment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

fn percent_encode(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
