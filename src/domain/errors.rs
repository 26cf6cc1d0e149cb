use thiserror::Error;
use uuid::Uuid;

/// One rejected field of a checkout payload, addressed by its JSON path
/// as the client sent it (e.g. `items[0].quantity`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A product whose available inventory could not cover the requested
/// quantity at commit time. A missing product reports `available: 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortage {
    pub product_id: Uuid,
    pub requested: i32,
    pub available: i32,
}

#[derive(Debug, Error)]
pub enum DomainError {
    /// The checkout payload broke one or more intake rules. Nothing was
    /// persisted; `violations` lists every offending field.
    #[error("checkout payload failed validation ({} violation(s))", .violations.len())]
    ValidationFailed { violations: Vec<Violation> },

    /// One or more line items asked for more stock than is available.
    /// The whole commit was rolled back.
    #[error("insufficient inventory for {} product(s)", .shortages.len())]
    InsufficientInventory { shortages: Vec<Shortage> },

    /// A generated order number collided with an existing order. The
    /// coordinator retries with a fresh number; callers only see this
    /// once retries are exhausted, and may safely resubmit.
    #[error("order number already in use")]
    DuplicateOrderNumber,

    #[error("order not found")]
    NotFound,

    #[error("authentication required")]
    Unauthorized,

    #[error("not allowed to access this order")]
    Forbidden,

    /// The storage layer could not be reached or the transaction failed
    /// for reasons unrelated to business rules. Nothing was committed.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Failure of a best-effort confirmation send. Logged by the
/// coordinator, never surfaced as a commit failure.
#[derive(Debug, Error)]
#[error("confirmation not sent: {0}")]
pub struct NotificationError(pub String);
