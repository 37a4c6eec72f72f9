//! Order Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order status
///
/// Normal flow runs pending → confirmed → preparing → out_for_delivery →
/// delivered, with cancelled reachable from any non-terminal state. The
/// admin surface may overwrite the status with any value unless the server
/// runs with strict transitions enabled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Terminal states accept no further transitions in strict mode.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// The single forward successor in the normal flow.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::OutForDelivery),
            OrderStatus::OutForDelivery => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    /// Strict transition table: the forward successor, or cancellation of a
    /// non-terminal order. Only consulted when the server enforces it.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        if next == OrderStatus::Cancelled {
            return !self.is_terminal();
        }
        self.next() == Some(next)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = InvalidOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "preparing" => Ok(OrderStatus::Preparing),
            "out_for_delivery" => Ok(OrderStatus::OutForDelivery),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(InvalidOrderStatus(other.to_string())),
        }
    }
}

/// Unknown status string on the wire
#[derive(Debug, thiserror::Error)]
#[error("Invalid order status: {0}")]
pub struct InvalidOrderStatus(pub String);

/// Payment method selected at checkout (simulated, no gateway behind it)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Upi,
    Card,
    Cod,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Upi => "upi",
            PaymentMethod::Card => "card",
            PaymentMethod::Cod => "cod",
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = InvalidPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upi" => Ok(PaymentMethod::Upi),
            "card" => Ok(PaymentMethod::Card),
            "cod" => Ok(PaymentMethod::Cod),
            other => Err(InvalidPaymentMethod(other.to_string())),
        }
    }
}

/// Unknown payment method string on the wire
#[derive(Debug, thiserror::Error)]
#[error("Invalid payment method: {0}")]
pub struct InvalidPaymentMethod(pub String);

/// Immutable order line captured from the cart at checkout.
///
/// Decoupled from the live Product so historical orders stay stable when
/// the catalog changes later.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Product id at checkout time
    pub id: i64,
    pub name: String,
    pub brand: String,
    /// Decimal string, e.g. "299"
    pub price: String,
    pub quantity: i32,
    pub image: String,
}

/// Free-text delivery address + contact phone
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryAddress {
    pub address: String,
    pub phone: String,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub session_id: String,
    pub items: Vec<OrderItem>,
    /// Decimal string, stored as submitted
    pub total: String,
    pub payment_method: PaymentMethod,
    pub delivery_address: DeliveryAddress,
    pub status: OrderStatus,
    /// Estimated delivery in minutes
    pub estimated_delivery: i32,
    /// RFC 3339 creation timestamp
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

/// Create order payload (checkout)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub session_id: String,
    pub items: Vec<OrderItem>,
    pub total: String,
    pub payment_method: PaymentMethod,
    pub delivery_address: DeliveryAddress,
    pub estimated_delivery: i32,
    /// Optional de-duplication key; resubmitting the same key returns the
    /// already-created order instead of a second one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

/// Status overwrite payload (admin)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// Sum of price × quantity over the given lines.
///
/// Unparsable price strings count as zero, matching the storefront's
/// `parseFloat || 0` arithmetic.
pub fn compute_total(items: &[OrderItem]) -> Decimal {
    items
        .iter()
        .map(|item| {
            let price: Decimal = item.price.parse().unwrap_or_default();
            price * Decimal::from(item.quantity)
        })
        .sum()
}
