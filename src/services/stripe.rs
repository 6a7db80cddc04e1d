// src/services/stripe.rs
//
// Thin client for Stripe's hosted checkout. Stripe's v1 API is
// form-encoded with bracketed keys, so requests are built as flat
// key/value lists rather than JSON bodies.
use serde::Deserialize;
use std::collections::HashMap;

use crate::dtos::checkout::CheckoutCartItem;
use crate::error::AppError;

const BASE_URL: &str = "https://api.stripe.com/v1";

/// Countries the shop ships to.
const ALLOWED_COUNTRIES: [&str; 7] = ["BE", "NL", "DE", "FR", "LU", "GB", "US"];

const DEFAULT_DESCRIPTION: &str = "Beautiful jewelry piece from Juweeltjes Lies";

#[derive(Clone)]
pub struct StripeClient {
    client: reqwest::Client,
    secret_key: String,
}

/// A line item ready to be sent to the session-creation endpoint.
/// `unit_amount` is in minor currency units (euro cents).
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub name: String,
    pub description: String,
    pub unit_amount: i64,
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub payment_status: Option<String>,
    pub amount_total: Option<i64>,
    pub customer_email: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    pub line_items: Option<LineItemList>,
    pub shipping_details: Option<serde_json::Value>,
    pub customer_details: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct LineItemList {
    pub data: Vec<SessionLineItem>,
}

#[derive(Debug, Deserialize)]
pub struct SessionLineItem {
    pub description: Option<String>,
    pub quantity: Option<i64>,
    pub amount_total: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: Option<StripeErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
}

/// Convert cart items to Stripe line items, prices in euro cents.
pub fn format_line_items(cart_items: &[CheckoutCartItem]) -> Vec<LineItem> {
    cart_items
        .iter()
        .map(|item| LineItem {
            name: item.name.clone(),
            description: item
                .description
                .clone()
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            unit_amount: eur_cents(item.price),
            quantity: item.quantity,
        })
        .collect()
}

/// Minor-unit conversion used for Stripe unit amounts.
pub fn eur_cents(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

fn session_params(
    line_items: &[LineItem],
    customer_email: &str,
    success_url: &str,
    cancel_url: &str,
) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = vec![
        ("payment_method_types[0]".into(), "card".into()),
        ("mode".into(), "payment".into()),
        ("customer_email".into(), customer_email.into()),
        ("success_url".into(), success_url.into()),
        ("cancel_url".into(), cancel_url.into()),
        ("metadata[user_email]".into(), customer_email.into()),
        ("billing_address_collection".into(), "auto".into()),
    ];

    for (i, country) in ALLOWED_COUNTRIES.iter().enumerate() {
        params.push((
            format!("shipping_address_collection[allowed_countries][{i}]"),
            (*country).to_string(),
        ));
    }

    for (i, item) in line_items.iter().enumerate() {
        params.push((format!("line_items[{i}][price_data][currency]"), "eur".into()));
        params.push((
            format!("line_items[{i}][price_data][product_data][name]"),
            item.name.clone(),
        ));
        params.push((
            format!("line_items[{i}][price_data][product_data][description]"),
            item.description.clone(),
        ));
        params.push((
            format!("line_items[{i}][price_data][unit_amount]"),
            item.unit_amount.to_string(),
        ));
        params.push((format!("line_items[{i}][quantity]"), item.quantity.to_string()));
    }

    params
}

impl StripeClient {
    pub fn new(secret_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            secret_key,
        }
    }

    /// Create a hosted checkout session and return it. The caller redirects
    /// the browser using the returned session id.
    #[tracing::instrument(skip(self, line_items))]
    pub async fn create_checkout_session(
        &self,
        line_items: &[LineItem],
        customer_email: &str,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSession, AppError> {
        let params = session_params(line_items, customer_email, success_url, cancel_url);

        let response = self
            .client
            .post(format!("{BASE_URL}/checkout/sessions"))
            .bearer_auth(&self.secret_key)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::payment(format!("Stripe request failed: {e}")))?;

        Self::handle_response(response).await
    }

    /// Retrieve a session with its line items and customer details expanded.
    #[tracing::instrument(skip(self))]
    pub async fn retrieve_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSession, AppError> {
        let response = self
            .client
            .get(format!("{BASE_URL}/checkout/sessions/{session_id}"))
            .bearer_auth(&self.secret_key)
            .query(&[("expand[]", "line_items"), ("expand[]", "customer_details")])
            .send()
            .await
            .map_err(|e| AppError::payment(format!("Stripe request failed: {e}")))?;

        Self::handle_response(response).await
    }

    async fn handle_response(response: reqwest::Response) -> Result<CheckoutSession, AppError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<CheckoutSession>()
                .await
                .map_err(|e| AppError::payment(format!("Invalid Stripe response: {e}")));
        }

        let message = response
            .json::<StripeErrorBody>()
            .await
            .ok()
            .and_then(|b| b.error)
            .and_then(|e| e.message)
            .unwrap_or_else(|| format!("Stripe returned {status}"));

        tracing::warn!(%status, %message, "Stripe API error");

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::validation(message));
        }
        Err(AppError::payment(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart_item(name: &str, price: f64, quantity: i32) -> CheckoutCartItem {
        CheckoutCartItem {
            id: Some(1),
            name: name.to_string(),
            price,
            description: None,
            quantity,
        }
    }

    #[test]
    fn eur_cents_rounds_to_minor_units() {
        assert_eq!(eur_cents(19.99), 1999);
        assert_eq!(eur_cents(10.0), 1000);
        // 0.1 + 0.2 style float noise must still land on the right cent
        assert_eq!(eur_cents(0.30000000000000004), 30);
    }

    #[test]
    fn format_line_items_converts_prices_and_defaults_description() {
        let items = format_line_items(&[cart_item("Gouden ring", 49.99, 2)]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].unit_amount, 4999);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn format_line_items_keeps_given_description() {
        let mut item = cart_item("Ring", 10.0, 1);
        item.description = Some("Handmade".to_string());
        let items = format_line_items(&[item]);
        assert_eq!(items[0].description, "Handmade");
    }

    #[test]
    fn session_params_cover_line_items_and_shipping() {
        let line_items = format_line_items(&[cart_item("Ring", 12.5, 3)]);
        let params = session_params(&line_items, "k@example.com", "https://s/ok", "https://s/cart");

        let get = |key: &str| {
            params
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(get("mode"), Some("payment"));
        assert_eq!(get("customer_email"), Some("k@example.com"));
        assert_eq!(get("metadata[user_email]"), Some("k@example.com"));
        assert_eq!(get("line_items[0][price_data][unit_amount]"), Some("1250"));
        assert_eq!(get("line_items[0][quantity]"), Some("3"));
        assert_eq!(
            get("shipping_address_collection[allowed_countries][0]"),
            Some("BE")
        );
    }
}
