//! Order validation, assembly and dispatch.
//!
//! Validation order is fixed: the cart is checked before the contact
//! fields, and the address is deliberately not required here (a captured
//! location may have auto-filled it upstream; only name and phone are
//! enforced). On success the payload goes out fire-and-forget: dispatch
//! failures are logged and captured but never fail the submission.

use apiary_core::{ContactDetails, Coordinates, OrderPayload, ValidationError};

use crate::cart::CartLedger;
use crate::host::OrderChannel;

/// Check a submission against the current ledger and contact form.
///
/// # Errors
///
/// [`ValidationError::EmptyCart`] when the ledger holds no items, regardless
/// of the contact fields; [`ValidationError::IncompleteContact`] when name or
/// phone is blank after trimming.
pub fn validate(ledger: &CartLedger, contact: &ContactDetails) -> Result<(), ValidationError> {
    if ledger.is_empty() {
        return Err(ValidationError::EmptyCart);
    }
    if contact.name.trim().is_empty() || contact.phone.trim().is_empty() {
        return Err(ValidationError::IncompleteContact);
    }
    Ok(())
}

/// Assemble the payload from a validated ledger snapshot.
#[must_use]
pub fn build_payload(
    ledger: &CartLedger,
    contact: &ContactDetails,
    location: Option<Coordinates>,
) -> OrderPayload {
    OrderPayload::new(ledger.to_order_items(), contact, location)
}

/// Validate, assemble and dispatch an order.
///
/// Returns the assembled payload on success; the cart and form state are
/// untouched either way, so a rejected submission can be corrected and
/// resubmitted as-is.
///
/// # Errors
///
/// Propagates [`ValidationError`]; dispatch itself never fails the call.
pub fn submit(
    ledger: &CartLedger,
    contact: &ContactDetails,
    location: Option<Coordinates>,
    channel: &OrderChannel,
) -> Result<OrderPayload, ValidationError> {
    validate(ledger, contact)?;
    let payload = build_payload(ledger, contact, location);
    dispatch(channel.clone(), &payload);
    Ok(payload)
}

/// Hand the payload to the outbound channel without awaiting delivery.
fn dispatch(channel: OrderChannel, payload: &OrderPayload) {
    match serde_json::to_string(payload) {
        Ok(json) => {
            tokio::spawn(async move {
                if let Err(e) = channel.send(&json).await {
                    sentry::capture_error(&e);
                    tracing::error!(error = %e, "order dispatch failed");
                }
            });
        }
        Err(e) => {
            sentry::capture_error(&e);
            tracing::error!(error = %e, "order payload serialization failed");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use apiary_core::{Coordinates, OrderItem};

    fn contact(name: &str, phone: &str) -> ContactDetails {
        ContactDetails {
            name: name.to_owned(),
            phone: phone.to_owned(),
            address: String::new(),
        }
    }

    fn filled_cart() -> CartLedger {
        let mut cart = CartLedger::new();
        cart.increment(&"a".into());
        cart.increment(&"a".into());
        cart.increment(&"b".into());
        cart
    }

    #[test]
    fn empty_cart_fails_regardless_of_contact_fields() {
        let cart = CartLedger::new();
        let err = validate(&cart, &contact("Aziz", "+998901234567")).unwrap_err();
        assert_eq!(err, ValidationError::EmptyCart);
    }

    #[test]
    fn blank_name_fails_after_trimming() {
        let cart = filled_cart();
        let err = validate(&cart, &contact("   ", "998901234567")).unwrap_err();
        assert_eq!(err, ValidationError::IncompleteContact);
    }

    #[test]
    fn blank_phone_fails_after_trimming() {
        let cart = filled_cart();
        let err = validate(&cart, &contact("Aziz", "")).unwrap_err();
        assert_eq!(err, ValidationError::IncompleteContact);
    }

    #[test]
    fn empty_cart_is_reported_before_contact_problems() {
        let cart = CartLedger::new();
        let err = validate(&cart, &contact("", "")).unwrap_err();
        assert_eq!(err, ValidationError::EmptyCart);
    }

    #[test]
    fn address_is_not_required() {
        let cart = filled_cart();
        assert!(validate(&cart, &contact("Aziz", "998901234567")).is_ok());
    }

    #[tokio::test]
    async fn submit_assembles_the_snapshot_payload() {
        let cart = filled_cart();
        let channel = OrderChannel::from_config(None).unwrap();
        let payload = submit(
            &cart,
            &contact(" Aziz ", "+998901234567"),
            Some(Coordinates::new(41.3, 69.2)),
            &channel,
        )
        .unwrap();

        assert_eq!(payload.name, "Aziz");
        assert_eq!(payload.lat, Some(41.3));
        assert_eq!(payload.lon, Some(69.2));
        assert_eq!(
            payload.items,
            vec![
                OrderItem {
                    id: "a".into(),
                    qty: 2
                },
                OrderItem {
                    id: "b".into(),
                    qty: 1
                },
            ]
        );
    }
}
