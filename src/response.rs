use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{AdminOrder, Product};

/// Body returned by `POST /orders` on success.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitOrderResponse {
    pub success: bool,
    #[serde(rename = "orderId")]
    pub order_id: i64,
    pub message: String,
}

impl SubmitOrderResponse {
    pub fn placed(order_id: i64) -> Self {
        Self {
            success: true,
            order_id,
            message: "Order placed successfully".to_string(),
        }
    }
}

/// Body returned by `GET /orders` on success. Zero orders is a valid
/// empty state, not an error.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrdersResponse {
    pub success: bool,
    pub orders: Vec<AdminOrder>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductsResponse {
    pub success: bool,
    pub products: Vec<Product>,
}
