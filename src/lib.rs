//! SQLite-backed parcel tracking store.
//!
//! # Intention
//!
//! - Provide typed accessors over the single `parcel` table.
//! - Encapsulate SQLite-specific logic, types, and error handling.
//!
//! # Architectural Boundaries
//!
//! - The caller owns the [`rusqlite::Connection`]; the store only borrows it.
//! - Status workflow lives in [`service`], not in the store.

pub mod config;
pub mod error;
pub mod parcel;
pub mod schema;
pub mod service;
pub mod sqlite;

pub use config::ParcelStoreConfig;
pub use error::{ParcelError, Result};
pub use parcel::{Parcel, ParcelStatus};
pub use service::ParcelService;
pub use sqlite::ParcelStore;
