//! Order store write path and reader.
//!
//! The write path is all-or-nothing: the header and its item rows go through
//! one SeaORM transaction, so a failure mid-insert leaves zero rows for that
//! order. The read path reconstructs full orders over the sqlx pool.

use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, Set, TransactionTrait};

use crate::{
    checkout,
    dto::orders::SubmitOrderRequest,
    entity::{order_items::ActiveModel as OrderItemActive, orders::ActiveModel as OrderActive},
    error::AppResult,
    models::{AdminOrder, AdminOrderItem, OrderStatus},
    state::AppState,
};

/// Persist a validated submission and return the new order id.
///
/// Validation runs before any transaction opens, with the same routine the
/// assembler uses. Status is forced to `pending` and the timestamp is assigned
/// here regardless of anything the client sent. Each subtotal and the order
/// total are recomputed server-side.
pub async fn submit_order(state: &AppState, payload: SubmitOrderRequest) -> AppResult<i64> {
    let checked = checkout::validate_submission(&payload)?;
    let customer = &payload.customer;

    let txn = state.orm.begin().await?;

    let order = OrderActive {
        id: NotSet,
        customer_name: Set(customer.name.trim().to_string()),
        customer_email: Set(customer.email.trim().to_string()),
        customer_phone: Set(customer.phone.trim().to_string()),
        delivery_address: Set(customer.address.trim().to_string()),
        delivery_method: Set(checked.delivery_method.as_str().to_string()),
        special_notes: Set(customer.notes.trim().to_string()),
        total_amount: Set(checked.total),
        status: Set(OrderStatus::Pending.as_str().to_string()),
        order_date: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await?;

    for item in &payload.items {
        OrderItemActive {
            id: NotSet,
            order_id: Set(order.id),
            product_id: Set(item.id),
            product_name: Set(item.name.clone()),
            price: Set(item.price),
            quantity: Set(item.quantity),
            subtotal: Set(checkout::line_subtotal(item)),
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    state
        .notifier
        .order_placed(order.id, payload.customer.clone(), checked.total);

    Ok(order.id)
}

/// Fetch every order with its items nested, newest first. Full-table scan,
/// no pagination. A header with zero items yields an empty list.
pub async fn list_orders(state: &AppState) -> AppResult<Vec<AdminOrder>> {
    let mut orders = sqlx::query_as::<_, AdminOrder>(
        r#"
        SELECT id, customer_name, customer_email, customer_phone,
               delivery_address, delivery_method, special_notes,
               total_amount, status, order_date
        FROM orders
        ORDER BY order_date DESC
        "#,
    )
    .fetch_all(&state.pool)
    .await?;

    for order in &mut orders {
        order.items = sqlx::query_as::<_, AdminOrderItem>(
            r#"
            SELECT product_name, price, quantity, subtotal
            FROM order_items
            WHERE order_id = $1
            ORDER BY id
            "#,
        )
        .bind(order.id)
        .fetch_all(&state.pool)
        .await?;
    }

    Ok(orders)
}
