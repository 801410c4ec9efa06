//! Pre-flight guards. Each returns the message shown to the caller and makes
//! the operation short-circuit without contacting the remote API.

use medistore_api_types::{CreateOrder, CreateReview, Payload, ReplyReview, UpdateOrderStatus};

use super::error::DomainError;
use super::session::Session;

pub const RATING_MIN: i32 = 1;
pub const RATING_MAX: i32 = 5;

pub fn require_id<'a>(entity: &'static str, id: &'a str) -> Result<&'a str, DomainError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(DomainError::validation(format!("{entity} ID is required")));
    }
    Ok(id)
}

pub fn require_session(session: Option<&Session>) -> Result<&Session, DomainError> {
    session.ok_or(DomainError::Unauthenticated)
}

/// Create payloads must carry a non-empty `name`.
pub fn require_name(entity: &'static str, payload: &Payload) -> Result<(), DomainError> {
    match payload.get("name").and_then(Payload::as_str) {
        Some(name) if !name.trim().is_empty() => Ok(()),
        _ => Err(DomainError::validation(format!("{entity} name is required"))),
    }
}

pub fn validate_review(review: &CreateReview) -> Result<(), DomainError> {
    if review.medicine_id.trim().is_empty() {
        return Err(DomainError::validation("Medicine ID is required"));
    }
    if !(RATING_MIN..=RATING_MAX).contains(&review.rating) {
        return Err(DomainError::validation(format!(
            "Rating must be between {RATING_MIN} and {RATING_MAX}"
        )));
    }
    Ok(())
}

pub fn validate_reply(reply: &ReplyReview) -> Result<(), DomainError> {
    if reply.comment.trim().is_empty() {
        return Err(DomainError::validation("Reply comment cannot be empty"));
    }
    Ok(())
}

pub fn validate_order(order: &CreateOrder) -> Result<(), DomainError> {
    if order.items.is_empty() {
        return Err(DomainError::validation(
            "Order must contain at least one item",
        ));
    }
    for item in &order.items {
        require_id("Medicine", &item.medicine_id)?;
        if item.quantity <= 0 {
            return Err(DomainError::validation(
                "Item quantity must be greater than zero",
            ));
        }
        if item.price.is_nan() || item.price <= 0.0 {
            return Err(DomainError::validation(
                "Item price must be greater than zero",
            ));
        }
    }
    if order.shipping_address.trim().is_empty() {
        return Err(DomainError::validation("Shipping address is required"));
    }
    Ok(())
}

pub fn validate_status(update: &UpdateOrderStatus) -> Result<(), DomainError> {
    if update.status.trim().is_empty() {
        return Err(DomainError::validation("Order status is required"));
    }
    Ok(())
}
