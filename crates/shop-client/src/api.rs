//! Shop API operations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shop_commerce::{
    Cart, CartItemId, OrderReceipt, OrderSubmission, Product, ProductId, Quantity,
};

use crate::request::encode_path_segment;
use crate::{ApiConfig, FetchClient, FetchError, ReqwestTransport, Transport};

/// The operations the storefront needs from the remote shop.
///
/// Mutations return nothing useful on purpose: the caller re-fetches the
/// cart afterwards instead of trusting a partial answer.
#[async_trait(?Send)]
pub trait StorefrontApi {
    /// List the catalog.
    async fn list_products(&self) -> Result<Vec<Product>, FetchError>;

    /// Get one product; unknown ids yield [`FetchError::NotFound`].
    async fn get_product(&self, id: &ProductId) -> Result<Product, FetchError>;

    /// Get the current cart.
    async fn get_cart(&self) -> Result<Cart, FetchError>;

    /// Add a product to the cart.
    async fn add_item(&self, product_id: &ProductId, qty: Quantity) -> Result<(), FetchError>;

    /// Set the quantity of a cart line.
    async fn update_item(
        &self,
        line_id: &CartItemId,
        product_id: &ProductId,
        qty: Quantity,
    ) -> Result<(), FetchError>;

    /// Remove a cart line.
    async fn remove_item(&self, line_id: &CartItemId) -> Result<(), FetchError>;

    /// Remove every cart line.
    async fn clear_cart(&self) -> Result<(), FetchError>;

    /// Place an order for the current cart.
    async fn place_order(&self, order: &OrderSubmission) -> Result<OrderReceipt, FetchError>;
}

/// Request bodies are wrapped as `{"data": ...}`.
#[derive(Serialize)]
struct Data<T> {
    data: T,
}

#[derive(Serialize)]
struct CartLinePayload<'a> {
    product_id: &'a ProductId,
    qty: Quantity,
}

#[derive(Deserialize)]
struct ProductsBody {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Deserialize)]
struct ProductBody {
    product: Product,
}

#[derive(Deserialize)]
struct CartBody {
    #[serde(default)]
    data: Cart,
}

/// [`StorefrontApi`] over HTTP.
pub struct ShopClient<T = ReqwestTransport> {
    fetch: FetchClient<T>,
}

impl ShopClient<ReqwestTransport> {
    /// Create a client using the `reqwest` transport.
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new(config.timeout))
    }
}

impl<T: Transport> ShopClient<T> {
    /// Create a client over any transport.
    pub fn with_transport(config: &ApiConfig, transport: T) -> Self {
        Self {
            fetch: FetchClient::new(config.api_root(), transport),
        }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        self.fetch.transport()
    }

    /// The endpoint root.
    pub fn api_root(&self) -> &str {
        self.fetch.base_url()
    }
}

#[async_trait(?Send)]
impl<T: Transport> StorefrontApi for ShopClient<T> {
    async fn list_products(&self) -> Result<Vec<Product>, FetchError> {
        let response = self.fetch.execute(self.fetch.get("/products").build()).await?;
        Ok(response.json::<ProductsBody>()?.products)
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, FetchError> {
        let path = format!("/product/{}", encode_path_segment(id.as_str()));
        let response = match self.fetch.execute(self.fetch.get(&path).build()).await {
            Ok(response) => response,
            Err(FetchError::Rejected(_)) | Err(FetchError::NotFound(_)) => {
                return Err(FetchError::NotFound(format!("product {}", id)))
            }
            Err(e) => return Err(e),
        };
        Ok(response.json::<ProductBody>()?.product)
    }

    async fn get_cart(&self) -> Result<Cart, FetchError> {
        let response = self.fetch.execute(self.fetch.get("/cart").build()).await?;
        Ok(response.json::<CartBody>()?.data)
    }

    async fn add_item(&self, product_id: &ProductId, qty: Quantity) -> Result<(), FetchError> {
        let request = self
            .fetch
            .post("/cart")
            .json(&Data {
                data: CartLinePayload { product_id, qty },
            })?
            .build();
        self.fetch.execute(request).await?;
        Ok(())
    }

    async fn update_item(
        &self,
        line_id: &CartItemId,
        product_id: &ProductId,
        qty: Quantity,
    ) -> Result<(), FetchError> {
        let path = format!("/cart/{}", encode_path_segment(line_id.as_str()));
        let request = self
            .fetch
            .put(&path)
            .json(&Data {
                data: CartLinePayload { product_id, qty },
            })?
            .build();
        self.fetch.execute(request).await?;
        Ok(())
    }

    async fn remove_item(&self, line_id: &CartItemId) -> Result<(), FetchError> {
        let path = format!("/cart/{}", encode_path_segment(line_id.as_str()));
        self.fetch.execute(self.fetch.delete(&path).build()).await?;
        Ok(())
    }

    async fn clear_cart(&self) -> Result<(), FetchError> {
        self.fetch.execute(self.fetch.delete("/carts").build()).await?;
        Ok(())
    }

    async fn place_order(&self, order: &OrderSubmission) -> Result<OrderReceipt, FetchError> {
        let request = self.fetch.post("/order").json(&Data { data: order })?.build();
        let response = self.fetch.execute(request).await?;
        response.json()
    }
}
