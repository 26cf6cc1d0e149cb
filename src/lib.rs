pub mod application;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::checkout::CheckoutService;
use application::queries::OrderQueryService;
use domain::ports::{ConfirmationSender, OrderStore};
use handlers::AppState;
use infrastructure::notify::LoggingConfirmationSender;
use infrastructure::order_store::DieselOrderStore;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::orders::create_order,
        handlers::orders::list_orders,
        handlers::orders::get_order,
    ),
    components(schemas(
        handlers::orders::CreateOrderRequest,
        handlers::orders::OrderItemRequest,
        handlers::orders::AddressRequest,
        handlers::orders::OrderResponse,
        handlers::orders::OrderItemResponse,
        handlers::orders::AddressResponse,
        handlers::orders::ListOrdersResponse,
        handlers::orders::PaginationMeta,
    )),
    tags((name = "orders", description = "Checkout and order queries"))
)]
pub struct ApiDoc;

/// Mount the order routes for any store/notifier pair. Tests register
/// the same routes over in-memory implementations of the ports.
pub fn configure_routes<S: OrderStore, N: ConfirmationSender>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("", web::post().to(handlers::orders::create_order::<S, N>))
            .route("", web::get().to(handlers::orders::list_orders::<S, N>))
            .route("/{id}", web::get().to(handlers::orders::get_order::<S, N>)),
    );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let store = Arc::new(DieselOrderStore::new(pool));
    let notifier = Arc::new(LoggingConfirmationSender);
    let state = web::Data::new(AppState {
        checkout: CheckoutService::new(store.clone(), notifier),
        queries: OrderQueryService::new(store),
    });

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(configure_routes::<Arc<DieselOrderStore>, Arc<LoggingConfirmationSender>>)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
