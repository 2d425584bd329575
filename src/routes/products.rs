use axum::{Json, Router, routing::get};

use crate::{catalog, response::ProductsResponse, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_products))
}

#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "The bakery menu", body = ProductsResponse),
    ),
    tag = "Products"
)]
pub async fn list_products() -> Json<ProductsResponse> {
    Json(ProductsResponse {
        success: true,
        products: catalog::products().to_vec(),
    })
}
