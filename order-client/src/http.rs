//! HTTP client for the order API

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::Client;
use serde::de::DeserializeOwned;

use shared::models::{
    CreateOrderRequest, EditItemsRequest, Order, OrderStatus, UpdateStatusRequest,
};

/// HTTP client for making network requests to the order server
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
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

    /// Make a DELETE request (no response body expected)
    async fn delete(&self, path: &str) -> ClientResult<()> {
        let response = self.client.delete(self.url(path)).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::error_from_body(status.as_u16(), response).await)
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_from_body(status.as_u16(), response).await);
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Extract the server's error message from a failed response
    ///
    /// Error bodies are `{"code": "E0002", "message": "..."}`; fall back to
    /// raw text for anything else.
    async fn error_from_body(status: u16, response: reqwest::Response) -> ClientError {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str().map(String::from)))
            .unwrap_or(text);
        ClientError::api(status, message)
    }

    // ========== Orders API ==========

    /// List orders, newest first, optionally filtered by status
    pub async fn list_orders(&self, status: Option<OrderStatus>) -> ClientResult<Vec<Order>> {
        match status {
            Some(status) => {
                self.get(&format!("/api/orders?status={}", status.as_str()))
                    .await
            }
            None => self.get("/api/orders").await,
        }
    }

    /// Fetch a single order
    pub async fn get_order(&self, id: &str) -> ClientResult<Order> {
        self.get(&format!("/api/orders/{id}")).await
    }

    /// Place a new order
    pub async fn place_order(&self, request: &CreateOrderRequest) -> ClientResult<Order> {
        self.post("/api/orders", request).await
    }

    /// Change an order's status
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> ClientResult<Order> {
        self.put(
            &format!("/api/orders/{id}/status"),
            &UpdateStatusRequest { status },
        )
        .await
    }

    /// Replace an order's item list
    pub async fn edit_items(&self, id: &str, request: &EditItemsRequest) -> ClientResult<Order> {
        self.put(&format!("/api/orders/{id}/edit-items"), request)
            .await
    }

    /// Delete every order for one table
    pub async fn clear_table(&self, table_number: &str) -> ClientResult<()> {
        self.delete(&format!("/api/orders/table/{table_number}"))
            .await
    }

    /// Delete all orders (administrative reset)
    pub async fn clear_all(&self) -> ClientResult<()> {
        self.delete("/api/orders/clear-all/all").await
    }
}
