//! Order assembly and submission validation.
//!
//! One validation routine serves both sides of the checkout: the assembler
//! runs it before handing the payload to the client transport, and the order
//! store runs it again at its boundary before opening a transaction. Keeping
//! a single routine avoids the two paths drifting apart.

use crate::cart::{Cart, CartStore};
use crate::dto::orders::{CustomerInfo, OrderItemInput, SubmitOrderRequest};
use crate::error::{AppError, AppResult};
use crate::models::DeliveryMethod;

/// Outcome of validating a submission: the parsed delivery method and the
/// total recomputed from the item snapshots.
#[derive(Debug, Clone, Copy)]
pub struct CheckedSubmission {
    pub delivery_method: DeliveryMethod,
    pub total: i64,
}

/// Snapshot a cart plus customer details into an order submission. The item
/// records are copies; later cart mutations do not affect the payload. The
/// total is computed from the snapshot, never taken from elsewhere.
pub fn assemble<S: CartStore>(
    cart: &Cart<S>,
    customer: CustomerInfo,
) -> AppResult<SubmitOrderRequest> {
    let items: Vec<OrderItemInput> = cart
        .lines()
        .iter()
        .map(|line| OrderItemInput {
            id: line.product_id,
            name: line.name.clone(),
            price: line.price,
            quantity: line.quantity,
        })
        .collect();

    let submission = SubmitOrderRequest {
        customer,
        total: order_total(&items),
        items,
    };
    validate_submission(&submission)?;
    Ok(submission)
}

/// Validate an order submission and recompute its total.
pub fn validate_submission(request: &SubmitOrderRequest) -> AppResult<CheckedSubmission> {
    let customer = &request.customer;

    require(&customer.name, "name")?;
    require(&customer.email, "email")?;
    require(&customer.phone, "phone")?;
    require(&customer.delivery_method, "deliveryMethod")?;

    if !is_valid_email(customer.email.trim()) {
        return Err(AppError::Validation("Invalid email format".to_string()));
    }

    let delivery_method = DeliveryMethod::parse(customer.delivery_method.trim())?;
    if delivery_method == DeliveryMethod::Delivery && customer.address.trim().is_empty() {
        return Err(AppError::Validation(
            "Delivery address is required for delivery orders".to_string(),
        ));
    }

    if request.items.is_empty() {
        return Err(AppError::Validation(
            "Order must contain at least one item".to_string(),
        ));
    }
    for item in &request.items {
        if item.name.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "Item {} is missing a name",
                item.id
            )));
        }
        if item.quantity < 1 {
            return Err(AppError::Validation(format!(
                "Item {} has an invalid quantity",
                item.id
            )));
        }
        if item.price < 0 {
            return Err(AppError::Validation(format!(
                "Item {} has a negative price",
                item.id
            )));
        }
    }

    // Never trust the client-sent total: recompute from the snapshot and
    // reject a disagreeing value.
    let total = order_total(&request.items);
    if request.total != total {
        return Err(AppError::Validation(
            "Order total does not match its items".to_string(),
        ));
    }

    Ok(CheckedSubmission {
        delivery_method,
        total,
    })
}

pub fn order_total(items: &[OrderItemInput]) -> i64 {
    items.iter().map(line_subtotal).sum()
}

pub fn line_subtotal(item: &OrderItemInput) -> i64 {
    item.price * i64::from(item.quantity)
}

fn require(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!(
            "Missing required customer field: {field}"
        )));
    }
    Ok(())
}

fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
