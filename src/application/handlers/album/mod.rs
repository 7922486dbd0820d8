//! Album command/query handlers.

mod create_album;
mod get_album;
mod list_albums;
mod update_album;

#[cfg(test)]
pub(crate) mod test_support;

pub use create_album::{CreateAlbumCommand, CreateAlbumHandler};
pub use get_album::{GetAlbumHandler, GetAlbumQuery};
pub use list_albums::{ListAlbumsHandler, ListAlbumsQuery};
pub use update_album::{UpdateAlbumCommand, UpdateAlbumHandler};
