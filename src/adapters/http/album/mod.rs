//! Album HTTP module.

mod dto;
mod handlers;
mod routes;

pub use routes::album_router;
