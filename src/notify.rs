//! Best-effort order notifications. Dispatch happens after the order
//! transaction commits, on a spawned task the submitter never awaits: a
//! notification failure is logged and swallowed, never surfaced to the
//! customer and never able to roll back the order.

use thiserror::Error;

use crate::dto::orders::CustomerInfo;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("invalid recipient address: {0}")]
    InvalidRecipient(String),
}

#[derive(Debug, Clone)]
pub struct Notifier {
    bakery_email: String,
}

impl Notifier {
    pub fn new(bakery_email: impl Into<String>) -> Self {
        Self {
            bakery_email: bakery_email.into(),
        }
    }

    /// Fire-and-forget dispatch for a newly placed order.
    pub fn order_placed(&self, order_id: i64, customer: CustomerInfo, total: i64) {
        let bakery_email = self.bakery_email.clone();
        tokio::spawn(async move {
            if let Err(err) = send_customer_confirmation(&customer, order_id, total).await {
                tracing::warn!(error = %err, order_id, "customer confirmation failed");
            }
            if let Err(err) =
                send_bakery_notification(&bakery_email, &customer, order_id, total).await
            {
                tracing::warn!(error = %err, order_id, "bakery notification failed");
            }
        });
    }
}

/// Development placeholder delivery: the message is composed and logged.
/// A mail transport hooks in here.
async fn send_customer_confirmation(
    customer: &CustomerInfo,
    order_id: i64,
    total: i64,
) -> Result<(), NotificationError> {
    let recipient = valid_recipient(&customer.email)?;
    let body = confirmation_body(&customer.name, order_id, total);
    tracing::info!(
        recipient,
        subject = %format!("Order Confirmation #{order_id} - Sweet Haven Bakery"),
        %body,
        "customer confirmation queued"
    );
    Ok(())
}

async fn send_bakery_notification(
    bakery_email: &str,
    customer: &CustomerInfo,
    order_id: i64,
    total: i64,
) -> Result<(), NotificationError> {
    let recipient = valid_recipient(bakery_email)?;
    tracing::info!(
        recipient,
        order_id,
        customer = %customer.name,
        total,
        "bakery notification queued"
    );
    Ok(())
}

fn valid_recipient(email: &str) -> Result<&str, NotificationError> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(NotificationError::InvalidRecipient(email.to_string()));
    }
    Ok(email)
}

fn confirmation_body(name: &str, order_id: i64, total: i64) -> String {
    format!(
        "Dear {name},\n\n\
         Thank you for your order!\n\n\
         Order #: {order_id}\n\
         Total: {}\n\n\
         We'll contact you shortly to confirm your order.\n\n\
         Best regards,\nSweet Haven Bakery",
        format_cents(total)
    )
}

fn format_cents(total: i64) -> String {
    format!("${}.{:02}", total / 100, total % 100)
}
