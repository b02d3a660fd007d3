//! HTTP market client.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;

use super::client::MarketApi;
use super::models::{resolve_image, ApiErrorBody, ApiListResponse};
use crate::domain::{Item, OrderConfirmation, OrderSnapshot, Result, StorefrontError};
use crate::Config;

/// [`MarketApi`] over the storefront's JSON HTTP backend.
///
/// - `GET {api_url}/product` returns `{ total, items }`
/// - `POST {api_url}/order` takes an [`OrderSnapshot`] and returns `{ id, total }`
///
/// Any non-2xx response becomes [`StorefrontError::Api`] carrying the
/// backend's `error` text when the body has one.
#[derive(Debug, Clone)]
pub struct HttpMarket {
    client: Client,
    api_url: String,
    cdn_url: String,
}

impl HttpMarket {
    /// Builds a client with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Http`] if the TLS backend cannot be
    /// initialised, or [`StorefrontError::Config`] for an empty `api_url`.
    pub fn new(api_url: impl Into<String>, cdn_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let api_url = api_url.into();
        if api_url.trim().is_empty() {
            return Err(StorefrontError::Config("api_url must not be empty".to_string()));
        }

        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            cdn_url: cdn_url.into(),
        })
    }

    /// Builds a client from the `api_url`, `cdn_url` and
    /// `request_timeout_secs` settings.
    ///
    /// # Errors
    ///
    /// See [`HttpMarket::new`].
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.api_url.clone(),
            config.cdn_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    /// Decodes a successful body or turns an error status into
    /// [`StorefrontError::Api`].
    fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>()?);
        }

        let text = response.text().unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&text).map_or_else(
            |_| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            },
            |body| body.error,
        );
        tracing::warn!(status = status.as_u16(), %message, "backend returned an error");
        Err(StorefrontError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl MarketApi for HttpMarket {
    fn fetch_catalog(&self) -> Result<Vec<Item>> {
        let url = self.endpoint("product");
        let _span = tracing::debug_span!("http_fetch_catalog", url = %url).entered();

        let response = self.client.get(&url).send()?;
        let list: ApiListResponse<Item> = Self::decode(response)?;

        let items: Vec<Item> = list
            .items
            .into_iter()
            .map(|item| Item {
                image: resolve_image(&self.cdn_url, &item.image),
                ..item
            })
            .collect();

        tracing::debug!(total = list.total, received = items.len(), "catalog fetched");
        Ok(items)
    }

    fn submit_order(&mut self, order: &OrderSnapshot) -> Result<OrderConfirmation> {
        let url = self.endpoint("order");
        let _span = tracing::debug_span!("http_submit_order",
            url = %url,
            items = order.items.len(),
            total = order.total
        ).entered();

        let response = self.client.post(&url).json(order).send()?;
        let confirmation: OrderConfirmation = Self::decode(response)?;

        tracing::debug!(order_id = %confirmation.id, "order accepted");
        Ok(confirmation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_with_single_slash() {
        let market = HttpMarket::new("http://localhost:3000/api/weblarek/", "", Duration::from_secs(1)).unwrap();
        assert_eq!(market.endpoint("product"), "http://localhost:3000/api/weblarek/product");
        assert_eq!(market.endpoint("/order"), "http://localhost:3000/api/weblarek/order");
    }

    #[test]
    fn empty_api_url_is_a_config_error() {
        let err = HttpMarket::new("  ", "", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, StorefrontError::Config(_)));
    }
}
