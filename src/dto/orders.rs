use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Customer block of an order submission. Delivery method is kept as a raw
/// string on the wire and parsed during validation, so bad values produce the
/// documented 400 body instead of a deserialization error.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub delivery_method: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub notes: String,
}

/// One cart line snapshotted at checkout. Name and price are captured at
/// submission time and stay decoupled from later catalog changes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItemInput {
    pub id: i32,
    pub name: String,
    pub price: i64,
    pub quantity: i32,
}

/// Body of `POST /orders`. The client-sent total is advisory: the server
/// recomputes it from the items and rejects a disagreeing value.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitOrderRequest {
    pub customer: CustomerInfo,
    pub items: Vec<OrderItemInput>,
    pub total: i64,
}
