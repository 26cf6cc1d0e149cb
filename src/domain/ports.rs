use std::sync::Arc;
use uuid::Uuid;

use super::checkout::CheckoutRequest;
use super::errors::{DomainError, NotificationError};
use super::order::{OrderPage, OrderStatus, OrderView};

/// Narrowing applied when listing orders. `user_id` restricts results to
/// one owner (visibility rule for non-privileged requesters).
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderFilter {
    pub user_id: Option<Uuid>,
    pub status: Option<OrderStatus>,
}

/// Persistence boundary for the checkout workflow.
///
/// `commit` must be all-or-nothing: the order, its items, its addresses
/// and the per-product inventory decrements either all take effect or
/// none do. Implementations must decrement conditionally (never below
/// zero) and report an order-number collision as
/// [`DomainError::DuplicateOrderNumber`] so the coordinator can retry
/// with a fresh number.
pub trait OrderStore: Send + Sync + 'static {
    fn commit(
        &self,
        order_number: &str,
        request: &CheckoutRequest,
        user_id: Option<Uuid>,
    ) -> Result<OrderView, DomainError>;

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError>;

    fn list(&self, filter: OrderFilter, page: i64, limit: i64) -> Result<OrderPage, DomainError>;
}

/// Best-effort order-confirmation delivery. Implementations must bound
/// their own send time; the coordinator logs failures and moves on.
pub trait ConfirmationSender: Send + Sync + 'static {
    fn send_confirmation(&self, order: &OrderView) -> Result<(), NotificationError>;
}

impl<T: OrderStore + ?Sized> OrderStore for Arc<T> {
    fn commit(
        &self,
        order_number: &str,
        request: &CheckoutRequest,
        user_id: Option<Uuid>,
    ) -> Result<OrderView, DomainError> {
        (**self).commit(order_number, request, user_id)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        (**self).find_by_id(id)
    }

    fn list(&self, filter: OrderFilter, page: i64, limit: i64) -> Result<OrderPage, DomainError> {
        (**self).list(filter, page, limit)
    }
}

impl<T: ConfirmationSender + ?Sized> ConfirmationSender for Arc<T> {
    fn send_confirmation(&self, order: &OrderView) -> Result<(), NotificationError> {
        (**self).send_confirmation(order)
    }
}
