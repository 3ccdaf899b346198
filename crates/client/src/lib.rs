//! Cycle Bazaar client library.
//!
//! Everything that talks to the outside world lives here: the REST client
//! for the remote Cycle Bazaar API, the durable-storage capability that
//! mirrors session state across restarts, and the two shared state
//! containers ([`SessionStore`] and [`CartStore`]) the screens read through.
//!
//! The remote API owns all persistence, authentication, and business rules;
//! this crate renders nothing and decides nothing - it issues requests and
//! replaces local state wholesale with whatever the server answers.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod config;
pub mod error;
pub mod session;
pub mod storage;
pub mod types;

pub use api::ApiClient;
pub use cart::CartStore;
pub use config::ClientConfig;
pub use error::ApiError;
pub use session::SessionStore;
pub use storage::{DurableStore, FileStore, MemoryStore, StorageError};
