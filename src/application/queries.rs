//! Read side of the order workflow: listing and fetching committed
//! orders under the role-based visibility rules.

use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{OrderPage, OrderStatus, OrderView, Requester};
use crate::domain::ports::{OrderFilter, OrderStore};

pub const MAX_PAGE_SIZE: i64 = 100;

pub struct OrderQueryService<S> {
    store: S,
}

impl<S: OrderStore> OrderQueryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// List orders newest-first, one page at a time.
    ///
    /// Unauthenticated callers are rejected. A customer only ever sees
    /// orders linked to their own user id; managers and admins see all,
    /// optionally narrowed by `status`.
    pub fn list_orders(
        &self,
        requester: Option<Requester>,
        status: Option<OrderStatus>,
        page: i64,
        limit: i64,
    ) -> Result<OrderPage, DomainError> {
        let requester = requester.ok_or(DomainError::Unauthorized)?;
        let page = page.max(1);
        let limit = limit.clamp(1, MAX_PAGE_SIZE);

        let filter = OrderFilter {
            user_id: (!requester.role.is_privileged()).then_some(requester.user_id),
            status,
        };
        self.store.list(filter, page, limit)
    }

    /// Fetch a single order. Owners and privileged roles only; anyone
    /// else gets `Forbidden` even when the order exists.
    pub fn get_order(&self, requester: Option<Requester>, id: Uuid) -> Result<OrderView, DomainError> {
        let requester = requester.ok_or(DomainError::Unauthorized)?;
        let order = self.store.find_by_id(id)?.ok_or(DomainError::NotFound)?;

        if requester.role.is_privileged() || order.user_id == Some(requester.user_id) {
            Ok(order)
        } else {
            Err(DomainError::Forbidden)
        }
    }
}
