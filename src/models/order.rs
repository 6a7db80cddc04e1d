use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Order lifecycle. Wire strings match what the storefront shows in its
/// status dropdown, including the spaced "in the making".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "confirmed")]
    Confirmed,
    #[serde(rename = "in the making")]
    InTheMaking,
    #[serde(rename = "ready")]
    Ready,
    #[serde(rename = "shipped")]
    Shipped,
    #[serde(rename = "completed")]
    Completed,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::InTheMaking => "in the making",
            OrderStatus::Ready => "ready",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "confirmed" => Some(OrderStatus::Confirmed),
            "in the making" => Some(OrderStatus::InTheMaking),
            "ready" => Some(OrderStatus::Ready),
            "shipped" => Some(OrderStatus::Shipped),
            "completed" => Some(OrderStatus::Completed),
            _ => None,
        }
    }

    /// The next step in the natural lifecycle, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            OrderStatus::Confirmed => Some(OrderStatus::InTheMaking),
            OrderStatus::InTheMaking => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Shipped),
            OrderStatus::Shipped => Some(OrderStatus::Completed),
            OrderStatus::Completed => None,
        }
    }

    /// Transitions are restricted to the natural chain; setting the same
    /// status again is a no-op and always allowed.
    pub fn can_transition_to(self, target: Self) -> bool {
        self == target || self.next() == Some(target)
    }
}

#[derive(Debug, FromRow)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub status: String,
    pub total_amount: f64,
    pub order_items: serde_json::Value,
    pub shipping_address: Option<serde_json::Value>,
    pub stripe_session_id: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_strings_round_trip() {
        for s in ["confirmed", "in the making", "ready", "shipped", "completed"] {
            assert_eq!(OrderStatus::parse(s).unwrap().as_str(), s);
        }
        assert!(OrderStatus::parse("cancelled").is_none());
    }

    #[test]
    fn transitions_follow_the_chain() {
        assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::InTheMaking));
        assert!(OrderStatus::InTheMaking.can_transition_to(OrderStatus::Ready));
        assert!(OrderStatus::Ready.can_transition_to(OrderStatus::Shipped));
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Completed));
    }

    #[test]
    fn skipping_or_reversing_is_rejected() {
        assert!(!OrderStatus::Confirmed.can_transition_to(OrderStatus::Shipped));
        assert!(!OrderStatus::Ready.can_transition_to(OrderStatus::Confirmed));
        assert!(!OrderStatus::Completed.can_transition_to(OrderStatus::Confirmed));
    }

    #[test]
    fn same_status_is_a_no_op() {
        assert!(OrderStatus::Ready.can_transition_to(OrderStatus::Ready));
    }

    #[test]
    fn completed_is_terminal() {
        assert_eq!(OrderStatus::Completed.next(), None);
    }
}
