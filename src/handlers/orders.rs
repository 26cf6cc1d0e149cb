use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::queries::MAX_PAGE_SIZE;
use crate::domain::checkout::{AddressDraft, CheckoutDraft, CheckoutItemDraft};
use crate::domain::order::{AddressView, OrderItemView, OrderStatus, OrderView};
use crate::domain::ports::{ConfirmationSender, OrderStore};
use crate::errors::AppError;

use super::{requester_from, AppState};

// ── Request DTOs ─────────────────────────────────────────────────────────────
//
// The wire format is the storefront's camelCase JSON; conversion into the
// domain drafts happens before any validation runs.

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: Uuid,
    pub quantity: i64,
    pub price: f64,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    pub first_name: String,
    pub last_name: String,
    pub address1: String,
    #[serde(default)]
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItemRequest>,
    pub subtotal: f64,
    pub tax: f64,
    pub shipping_cost: f64,
    pub total: f64,
    pub shipping_address: AddressRequest,
    #[serde(default)]
    pub billing_address: Option<AddressRequest>,
    pub email: String,
    pub payment_method: String,
    #[serde(default)]
    pub payment_ref: Option<String>,
}

impl From<AddressRequest> for AddressDraft {
    fn from(a: AddressRequest) -> Self {
        AddressDraft {
            first_name: a.first_name,
            last_name: a.last_name,
            address1: a.address1,
            address2: a.address2,
            city: a.city,
            state: a.state,
            postal_code: a.postal_code,
            country: a.country,
            phone: a.phone,
        }
    }
}

impl CreateOrderRequest {
    fn into_draft(self) -> CheckoutDraft {
        CheckoutDraft {
            items: self
                .items
                .into_iter()
                .map(|item| CheckoutItemDraft {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    price: item.price,
                    name: item.name,
                    image: item.image,
                })
                .collect(),
            subtotal: self.subtotal,
            tax: self.tax,
            shipping_cost: self.shipping_cost,
            total: self.total,
            shipping_address: self.shipping_address.into(),
            billing_address: self.billing_address.map(Into::into),
            email: self.email,
            payment_method: self.payment_method,
            payment_ref: self.payment_ref,
        }
    }
}

// ── Response DTOs ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub phone: Option<String>,
    pub kind: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub image: Option<String>,
    /// Decimal amount as a string, e.g. "599.99"
    pub price: String,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: Uuid,
    pub order_number: String,
    pub user_id: Option<Uuid>,
    pub email: String,
    pub status: String,
    pub payment_status: String,
    pub subtotal: String,
    pub tax: String,
    pub shipping_cost: String,
    pub total: String,
    pub payment_method: String,
    pub payment_ref: Option<String>,
    pub carrier: Option<String>,
    pub tracking_number: Option<String>,
    pub created_at: String,
    pub items: Vec<OrderItemResponse>,
    pub shipping_address: AddressResponse,
    pub billing_address: Option<AddressResponse>,
}

impl From<&AddressView> for AddressResponse {
    fn from(a: &AddressView) -> Self {
        AddressResponse {
            id: a.id,
            first_name: a.first_name.clone(),
            last_name: a.last_name.clone(),
            address1: a.address1.clone(),
            address2: a.address2.clone(),
            city: a.city.clone(),
            state: a.state.clone(),
            postal_code: a.postal_code.clone(),
            country: a.country.clone(),
            phone: a.phone.clone(),
            kind: a.kind.as_str().to_string(),
        }
    }
}

impl From<&OrderItemView> for OrderItemResponse {
    fn from(item: &OrderItemView) -> Self {
        OrderItemResponse {
            id: item.id,
            product_id: item.product_id,
            name: item.name.clone(),
            image: item.image.clone(),
            price: item.price.to_string(),
            quantity: item.quantity,
        }
    }
}

impl From<&OrderView> for OrderResponse {
    fn from(order: &OrderView) -> Self {
        OrderResponse {
            id: order.id,
            order_number: order.order_number.clone(),
            user_id: order.user_id,
            email: order.email.clone(),
            status: order.status.to_string(),
            payment_status: order.payment_status.to_string(),
            subtotal: order.subtotal.to_string(),
            tax: order.tax.to_string(),
            shipping_cost: order.shipping_cost.to_string(),
            total: order.total.to_string(),
            payment_method: order.payment_method.clone(),
            payment_ref: order.payment_ref.clone(),
            carrier: order.carrier.clone(),
            tracking_number: order.tracking_number.clone(),
            created_at: order.created_at.to_rfc3339(),
            items: order.items.iter().map(Into::into).collect(),
            shipping_address: (&order.shipping_address).into(),
            billing_address: order.billing_address.as_ref().map(Into::into),
        }
    }
}

// ── Pagination ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListOrdersParams {
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page. Defaults to 10, maximum 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Optional status filter, e.g. PENDING or SHIPPED.
    #[serde(default)]
    pub status: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListOrdersResponse {
    pub orders: Vec<OrderResponse>,
    pub pagination: PaginationMeta,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Validates and commits a checkout submission. The order, its line
/// items, both addresses, the inventory decrements and the outbox event
/// are one transaction; the confirmation send happens after commit and
/// cannot fail the request.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order committed", body = OrderResponse),
        (status = 400, description = "Payload failed validation"),
        (status = 409, description = "Insufficient inventory for one or more items"),
        (status = 503, description = "Order number allocation failed, safe to retry"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order<S: OrderStore, N: ConfirmationSender>(
    state: web::Data<AppState<S, N>>,
    req: HttpRequest,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let requester = requester_from(&req)?;
    let draft = body.into_inner().into_draft();

    let order = web::block(move || state.checkout.place_order(draft, requester))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(OrderResponse::from(&order)))
}

/// GET /orders
///
/// Paginated order listing, newest first. Customers see their own
/// orders; managers and admins see everything, optionally filtered by
/// status.
#[utoipa::path(
    get,
    path = "/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 10, max 100)"),
        ("status" = Option<String>, Query, description = "Filter by order status"),
    ),
    responses(
        (status = 200, description = "Paginated list of orders", body = ListOrdersResponse),
        (status = 400, description = "Unknown status filter"),
        (status = 401, description = "Authentication required"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders<S: OrderStore, N: ConfirmationSender>(
    state: web::Data<AppState<S, N>>,
    req: HttpRequest,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let requester = requester_from(&req)?;
    let params = query.into_inner();
    let page = params.page.max(1);
    let limit = params.limit.clamp(1, MAX_PAGE_SIZE);
    let status = params
        .status
        .as_deref()
        .map(|s| s.parse::<OrderStatus>())
        .transpose()
        .map_err(AppError::BadRequest)?;

    let result = web::block(move || state.queries.list_orders(requester, status, page, limit))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let pages = if result.total == 0 { 0 } else { (result.total + limit - 1) / limit };
    Ok(HttpResponse::Ok().json(ListOrdersResponse {
        orders: result.items.iter().map(Into::into).collect(),
        pagination: PaginationMeta {
            page,
            limit,
            total: result.total,
            pages,
        },
    }))
}

/// GET /orders/{id}
///
/// Returns one order with its line items and addresses. Owners and
/// privileged roles only.
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Order belongs to someone else"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order<S: OrderStore, N: ConfirmationSender>(
    state: web::Data<AppState<S, N>>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let requester = requester_from(&req)?;
    let order_id = path.into_inner();

    let order = web::block(move || state.queries.get_order(requester, order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(&order)))
}
