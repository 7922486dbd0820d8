//! Admin HTTP module (moderation decisions and the dashboard).

mod dto;
mod handlers;
mod routes;

pub use routes::admin_router;
