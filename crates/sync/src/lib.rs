// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! leavn-sync: offline sync engine for the Leavn app
//!
//! Mutations made while disconnected are persisted by [`lv_core::DurableStore`]
//! and replayed against a [`RemoteMutationService`] once the network returns.
//! Passages can be downloaded for offline reading through a
//! [`PassageProvider`]. [`OfflineSync`] ties both together for one storage
//! root.

pub mod cache;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod logging;
pub mod offline;
pub mod provider;
pub mod remote;
pub mod status;
pub mod sync;

#[cfg(test)]
mod test_helpers;

pub use cache::OfflineCache;
pub use config::SyncConfig;
pub use connectivity::{
    classify, ConnectionType, ConnectivityMonitor, InterfaceKind, NetworkPath, Transition,
};
pub use error::{Error, Result};
pub use offline::OfflineSync;
pub use provider::{PassageProvider, ProviderError, ProviderFuture, ProviderResult};
pub use remote::{dispatch, RemoteError, RemoteFuture, RemoteMutationService, RemoteResult};
pub use status::{StatusPublisher, StatusReceiver, StatusSnapshot, SyncStatus};
pub use sync::{PassReport, SyncEngine, SyncHandle};
