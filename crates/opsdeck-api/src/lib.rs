// opsdeck-api: Async Rust client for the ops record store.

pub mod auth;
pub mod client;
pub mod collection;
pub mod error;
pub mod params;
pub mod transport;

pub use auth::RawProfile;
pub use client::RecordClient;
pub use collection::Collection;
pub use error::Error;
pub use params::{ListPage, ListParams};
pub use transport::TransportConfig;
