//! Harvester engine: remote client, game store and the harvest driver.
mod client;
mod harvester;
mod store;
mod types;

pub use client::{GameSource, RemoteSettings, WooglesClient, DEFAULT_BASE_URL};
pub use harvester::Harvester;
pub use store::{GameStore, StorageError};
pub use types::{FailureKind, GameRecord, NetworkError};
