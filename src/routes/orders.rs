use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::orders::SubmitOrderRequest,
    error::AppResult,
    response::{OrdersResponse, SubmitOrderResponse},
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(submit_order).get(list_orders))
}

#[utoipa::path(
    post,
    path = "/orders",
    request_body = SubmitOrderRequest,
    responses(
        (status = 200, description = "Order placed", body = SubmitOrderResponse),
        (status = 400, description = "Validation failure"),
        (status = 500, description = "Persistence failure"),
    ),
    tag = "Orders"
)]
pub async fn submit_order(
    State(state): State<AppState>,
    Json(payload): Json<SubmitOrderRequest>,
) -> AppResult<Json<SubmitOrderResponse>> {
    let order_id = order_service::submit_order(&state, payload).await?;
    Ok(Json(SubmitOrderResponse::placed(order_id)))
}

#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "All orders, newest first", body = OrdersResponse),
        (status = 500, description = "Persistence failure"),
    ),
    tag = "Orders"
)]
pub async fn list_orders(State(state): State<AppState>) -> AppResult<Json<OrdersResponse>> {
    let orders = order_service::list_orders(&state).await?;
    Ok(Json(OrdersResponse {
        success: true,
        orders,
    }))
}
