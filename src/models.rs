use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::AppError;

/// A catalog entry. Prices are integer cents. Catalog products are defined at
/// build time and never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: i64,
    pub description: String,
    pub category: String,
    pub image: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    Pickup,
    Delivery,
}

impl DeliveryMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMethod::Pickup => "pickup",
            DeliveryMethod::Delivery => "delivery",
        }
    }

    /// Parse the client-sent method string. Unknown values are a validation
    /// failure, not a deserialization failure, so the 400 body keeps the
    /// documented shape.
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "pickup" => Ok(DeliveryMethod::Pickup),
            "delivery" => Ok(DeliveryMethod::Delivery),
            other => Err(AppError::Validation(format!(
                "Invalid delivery method: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// A persisted order as exposed to the admin dashboard: the header row with
/// its item rows nested.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AdminOrder {
    pub id: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub delivery_method: String,
    pub special_notes: String,
    pub total_amount: i64,
    pub status: String,
    pub order_date: DateTime<Utc>,
    #[sqlx(skip)]
    pub items: Vec<AdminOrderItem>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AdminOrderItem {
    pub product_name: String,
    pub price: i64,
    pub quantity: i32,
    pub subtotal: i64,
}
