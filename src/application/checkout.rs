//! The order commit coordinator.
//!
//! Sequencing per commit: validate, generate an order number, run the
//! store's all-or-nothing commit (order + items + addresses + inventory
//! decrements), then attempt a best-effort confirmation. An order-number
//! collision restarts the commit with a fresh number, up to
//! [`ORDER_NUMBER_ATTEMPTS`] times.

use chrono::Utc;
use uuid::Uuid;

use crate::domain::checkout::CheckoutDraft;
use crate::domain::errors::DomainError;
use crate::domain::order::{OrderView, Requester};
use crate::domain::ports::{ConfirmationSender, OrderStore};

/// Commit attempts before an order-number collision is surfaced. The
/// number carries a millisecond timestamp plus a random suffix, so a
/// second collision in a row already means something is off.
const ORDER_NUMBER_ATTEMPTS: u32 = 3;

pub struct CheckoutService<S, N> {
    store: S,
    notifier: N,
}

impl<S: OrderStore, N: ConfirmationSender> CheckoutService<S, N> {
    pub fn new(store: S, notifier: N) -> Self {
        Self { store, notifier }
    }

    /// Validate and durably commit a checkout submission.
    ///
    /// `requester` is the authenticated identity, if any; a guest
    /// checkout leaves the order and its addresses without a user link.
    /// The confirmation send happens after the transaction has
    /// committed and can no longer affect its outcome.
    pub fn place_order(
        &self,
        draft: CheckoutDraft,
        requester: Option<Requester>,
    ) -> Result<OrderView, DomainError> {
        // Handlers validate at the boundary already; re-run here so the
        // coordinator never trusts its caller with an unchecked payload.
        let request = draft
            .validate()
            .map_err(|violations| DomainError::ValidationFailed { violations })?;
        let user_id = requester.map(|r| r.user_id);

        for attempt in 1..=ORDER_NUMBER_ATTEMPTS {
            let order_number = generate_order_number();
            match self.store.commit(&order_number, &request, user_id) {
                Ok(order) => {
                    if let Err(e) = self.notifier.send_confirmation(&order) {
                        log::warn!(
                            "order {} committed but confirmation failed: {}",
                            order.order_number,
                            e
                        );
                    }
                    return Ok(order);
                }
                Err(DomainError::DuplicateOrderNumber) => {
                    log::warn!(
                        "order number {} collided (attempt {}/{}), regenerating",
                        order_number,
                        attempt,
                        ORDER_NUMBER_ATTEMPTS
                    );
                }
                Err(other) => return Err(other),
            }
        }
        Err(DomainError::DuplicateOrderNumber)
    }
}

/// `ORD-<millis>-<suffix>`: a high-resolution timestamp plus a random
/// three-digit suffix. Collisions stay possible; the unique constraint
/// on `orders.order_number` is the real guarantor.
pub fn generate_order_number() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = Uuid::new_v4().as_u128() % 1000;
    format!("ORD-{millis}-{suffix:03}")
}
