//! Shopify Storefront API cart client.

use std::sync::Arc;

use graphql_client::{QueryBody, Response};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::config::ShopifyStorefrontConfig;
use crate::shopify::types::{CartSummary, GetCartData};
use crate::shopify::{GraphQLError, ShopifyError};

const GET_CART_QUERY: &str = r"
query GetCart($cartId: ID!) {
  cart(id: $cartId) {
    id
    checkoutUrl
    totalQuantity
    cost {
      totalAmount { amount currencyCode }
    }
    lines(first: 100) {
      nodes {
        id
        quantity
        cost {
          totalAmount { amount currencyCode }
        }
        merchandise {
          ... on ProductVariant {
            title
            product { title }
          }
        }
      }
    }
  }
}
";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GetCartVariables<'a> {
    cart_id: &'a str,
}

/// Client for reading carts from the Shopify Storefront API.
#[derive(Clone)]
pub struct CartClient {
    inner: Arc<CartClientInner>,
}

struct CartClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl CartClient {
    /// Create a new Storefront API client.
    #[must_use]
    pub fn new(config: &ShopifyStorefrontConfig) -> Self {
        let endpoint = format!(
            "https://{}/api/{}/graphql.json",
            config.store, config.api_version
        );

        Self {
            inner: Arc::new(CartClientInner {
                client: reqwest::Client::new(),
                endpoint,
                access_token: config.storefront_private_token.expose_secret().to_string(),
            }),
        }
    }

    /// Execute a GraphQL query.
    async fn execute<V, D>(&self, body: &QueryBody<V>) -> Result<D, ShopifyError>
    where
        V: Serialize,
        D: DeserializeOwned,
    {
        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            // Private access tokens use a different header than public tokens
            .header(
                "Shopify-Storefront-Private-Token",
                &self.inner.access_token,
            )
            .json(body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        // Read as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Shopify API returned non-success status"
            );
            return Err(ShopifyError::GraphQL(vec![GraphQLError {
                message: format!(
                    "HTTP {status}: {}",
                    response_text.chars().take(200).collect::<String>()
                ),
                path: vec![],
            }]));
        }

        let response: Response<D> = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %response_text.chars().take(500).collect::<String>(),
                "Failed to parse Shopify GraphQL response"
            );
            ShopifyError::Parse(e)
        })?;

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            tracing::debug!(errors = ?errors, "GraphQL errors in response");

            return Err(ShopifyError::GraphQL(
                errors
                    .into_iter()
                    .map(|e| GraphQLError {
                        message: e.message,
                        path: e.path.map_or_else(Vec::new, |p| {
                            p.into_iter().map(|fragment| fragment.to_string()).collect()
                        }),
                    })
                    .collect(),
            ));
        }

        response
            .data
            .ok_or_else(|| ShopifyError::NotFound("No data in response".to_string()))
    }

    /// Get a cart by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the cart does not exist.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn get_cart(&self, cart_id: &str) -> Result<CartSummary, ShopifyError> {
        let body = QueryBody {
            variables: GetCartVariables { cart_id },
            query: GET_CART_QUERY,
            operation_name: "GetCart",
        };

        let data: GetCartData = self.execute(&body).await?;

        data.cart
            .map(CartSummary::from)
            .ok_or_else(|| ShopifyError::NotFound(format!("Cart not found: {cart_id}")))
    }
}
