pub mod models;
pub mod notify;
pub mod order_store;
