use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::orders::{CustomerInfo, OrderItemInput, SubmitOrderRequest},
    models::{AdminOrder, AdminOrderItem, DeliveryMethod, OrderStatus, Product},
    response::{OrdersResponse, ProductsResponse, SubmitOrderResponse},
    routes::{health, orders, products},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        orders::submit_order,
        orders::list_orders,
    ),
    components(
        schemas(
            Product,
            DeliveryMethod,
            OrderStatus,
            CustomerInfo,
            OrderItemInput,
            SubmitOrderRequest,
            SubmitOrderResponse,
            AdminOrder,
            AdminOrderItem,
            OrdersResponse,
            ProductsResponse,
            health::HealthData,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Read-only bakery menu"),
        (name = "Orders", description = "Order submission and admin listing"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
