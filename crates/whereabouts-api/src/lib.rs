// whereabouts-api: Async Rust client for the randomuser.me user-generator API

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{DEFAULT_ENDPOINT, RandomUserClient, UserQuery};
pub use error::Error;
pub use transport::TransportConfig;
