pub mod orders;

use actix_web::HttpRequest;
use uuid::Uuid;

use crate::application::checkout::CheckoutService;
use crate::application::queries::OrderQueryService;
use crate::domain::order::{Requester, Role};
use crate::errors::AppError;

/// Shared application state, injected per worker via `web::Data`.
pub struct AppState<S, N> {
    pub checkout: CheckoutService<S, N>,
    pub queries: OrderQueryService<S>,
}

/// Resolve the caller's identity from the gateway-set headers.
///
/// Session handling lives upstream; by the time a request reaches this
/// service the gateway has translated the session into `x-user-id` and
/// `x-user-role`. No `x-user-id` means guest. A present-but-garbled
/// header is a client error, not a guest.
pub fn requester_from(req: &HttpRequest) -> Result<Option<Requester>, AppError> {
    let Some(raw_id) = req.headers().get("x-user-id") else {
        return Ok(None);
    };
    let user_id = raw_id
        .to_str()
        .ok()
        .and_then(|s| Uuid::parse_str(s.trim()).ok())
        .ok_or_else(|| AppError::BadRequest("x-user-id must be a UUID".into()))?;

    let role = match req.headers().get("x-user-role") {
        Some(raw_role) => raw_role
            .to_str()
            .ok()
            .and_then(|s| s.trim().parse::<Role>().ok())
            .ok_or_else(|| {
                AppError::BadRequest("x-user-role must be CUSTOMER, MANAGER or ADMIN".into())
            })?,
        None => Role::Customer,
    };

    Ok(Some(Requester { user_id, role }))
}
