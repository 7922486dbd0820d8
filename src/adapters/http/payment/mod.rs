//! Payment HTTP module (order creation and callback verification).

mod dto;
mod handlers;
mod routes;

pub use routes::payment_router;
