//! Media HTTP module (upload, listing, reporting, review queue).

mod dto;
mod handlers;
mod routes;

pub use dto::MediaResponse;
pub use routes::media_router;
