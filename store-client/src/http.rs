//! HTTP client for network-based API calls
//!
//! Every mutation returns an explicit `ClientResult`; nothing retries on
//! its own. Callers decide whether to retry, and checkout de-duplication
//! rides on the order payload's idempotency key.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{ClientConfig, ClientError, ClientResult};
use shared::models::{
    AppConfig, AppConfigUpsert, CartItem, CartItemCreate, Order, OrderCreate, OrderStatus,
    Product,
};

/// Pincode serviceability answer
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PincodeCheck {
    pub serviceable: bool,
    /// Minutes, absent when not serviceable
    pub estimated_delivery: Option<i32>,
    pub message: String,
}

/// Cart mutation acknowledgement
#[derive(Debug, Clone, Deserialize)]
pub struct CartAck {
    pub success: bool,
}

/// HTTP client for making network requests to the store server
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Make a GET request
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.put(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a PATCH request with JSON body
    async fn patch<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.patch(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.delete(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            return match status {
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(text)),
                StatusCode::UNPROCESSABLE_ENTITY => Err(ClientError::BusinessRule(text)),
                _ => Err(ClientError::Internal(text)),
            };
        }

        response.json().await.map_err(Into::into)
    }

    // ========== Catalog API ==========

    /// List products, optionally filtered by category
    pub async fn products(&self, category: Option<&str>) -> ClientResult<Vec<Product>> {
        match category {
            Some(category) => {
                self.get(&format!("/api/products?category={category}")).await
            }
            None => self.get("/api/products").await,
        }
    }

    /// Fetch a single product
    pub async fn product(&self, id: i64) -> ClientResult<Product> {
        self.get(&format!("/api/products/{id}")).await
    }

    /// Storefront-visible categories
    pub async fn categories(&self) -> ClientResult<Vec<String>> {
        self.get("/api/categories").await
    }

    // ========== Cart API ==========

    /// A session's cart, enriched with catalog products
    pub async fn cart_items(&self, session_id: &str) -> ClientResult<Vec<CartItem>> {
        self.get(&format!("/api/cart/{session_id}")).await
    }

    /// Add an item to the server-side cart mirror (merges duplicates)
    pub async fn add_to_cart(&self, item: &CartItemCreate) -> ClientResult<CartItem> {
        self.post("/api/cart", item).await
    }

    /// Update a cart entry's quantity (`<= 0` removes it)
    pub async fn update_cart_quantity(
        &self,
        session_id: &str,
        product_id: i64,
        quantity: i32,
    ) -> ClientResult<CartAck> {
        self.patch(
            &format!("/api/cart/{session_id}/{product_id}"),
            &serde_json::json!({ "quantity": quantity }),
        )
        .await
    }

    /// Remove a cart entry
    pub async fn remove_from_cart(
        &self,
        session_id: &str,
        product_id: i64,
    ) -> ClientResult<CartAck> {
        self.delete(&format!("/api/cart/{session_id}/{product_id}")).await
    }

    /// Clear a session's cart
    pub async fn clear_cart(&self, session_id: &str) -> ClientResult<CartAck> {
        self.delete(&format!("/api/cart/{session_id}")).await
    }

    // ========== Order API ==========

    /// Place an order. On success the server clears the session's cart
    /// mirror; the local store must be cleared by the caller afterwards.
    pub async fn create_order(&self, order: &OrderCreate) -> ClientResult<Order> {
        self.post("/api/orders", order).await
    }

    /// A session's orders, newest first
    pub async fn session_orders(&self, session_id: &str) -> ClientResult<Vec<Order>> {
        self.get(&format!("/api/orders/{session_id}")).await
    }

    /// All orders (admin), newest first, optionally filtered
    pub async fn admin_orders(
        &self,
        status: Option<OrderStatus>,
        date: Option<&str>,
    ) -> ClientResult<Vec<Order>> {
        let mut params: Vec<String> = Vec::new();
        if let Some(status) = status {
            params.push(format!("status={}", status.as_str()));
        }
        if let Some(date) = date {
            params.push(format!("date={date}"));
        }
        let path = if params.is_empty() {
            "/api/admin/orders".to_string()
        } else {
            format!("/api/admin/orders?{}", params.join("&"))
        };
        self.get(&path).await
    }

    /// Overwrite an order's status (admin)
    pub async fn update_order_status(
        &self,
        id: i64,
        status: OrderStatus,
    ) -> ClientResult<Order> {
        self.put(
            &format!("/api/orders/{id}/status"),
            &serde_json::json!({ "status": status }),
        )
        .await
    }

    // ========== Admin Config API ==========

    /// All config entries
    pub async fn configs(&self) -> ClientResult<Vec<AppConfig>> {
        self.get("/api/admin/config").await
    }

    /// Single config entry
    pub async fn config(&self, key: &str) -> ClientResult<AppConfig> {
        self.get(&format!("/api/admin/config/{key}")).await
    }

    /// Upsert a config entry (last write wins)
    pub async fn upsert_config(&self, config: &AppConfigUpsert) -> ClientResult<AppConfig> {
        self.post("/api/admin/config", config).await
    }

    // ========== Delivery Area API ==========

    /// Check whether a pincode is serviceable
    pub async fn check_pincode(&self, pincode: &str) -> ClientResult<PincodeCheck> {
        self.post(
            "/api/pincode/check",
            &serde_json::json!({ "pincode": pincode }),
        )
        .await
    }
}
