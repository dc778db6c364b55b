// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Network reachability tracking.
//!
//! The platform shim owns the OS path callback and forwards each update as a
//! [`NetworkPath`]. The monitor classifies it and reports how the state moved.

use serde::{Deserialize, Serialize};

/// Interface types an OS path update can list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterfaceKind {
    Wifi,
    Cellular,
    WiredEthernet,
    Loopback,
    Other,
}

/// A single OS network path update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NetworkPath {
    /// Whether the path can currently reach the network.
    pub satisfied: bool,
    /// Interfaces the path uses, in OS order.
    pub interfaces: Vec<InterfaceKind>,
}

impl NetworkPath {
    pub fn offline() -> Self {
        NetworkPath::default()
    }

    pub fn online(interface: InterfaceKind) -> Self {
        NetworkPath {
            satisfied: true,
            interfaces: vec![interface],
        }
    }
}

/// Connection type published to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    Wifi,
    Cellular,
    Ethernet,
    #[default]
    Unknown,
}

/// Picks the connection type for a path: wifi, then ethernet, then cellular.
pub fn classify(path: &NetworkPath) -> ConnectionType {
    let uses = |kind| path.interfaces.contains(&kind);
    if uses(InterfaceKind::Wifi) {
        ConnectionType::Wifi
    } else if uses(InterfaceKind::WiredEthernet) {
        ConnectionType::Ethernet
    } else if uses(InterfaceKind::Cellular) {
        ConnectionType::Cellular
    } else {
        ConnectionType::Unknown
    }
}

/// How an update changed the monitor's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    CameOnline,
    WentOffline,
    /// Still online, over a different interface.
    InterfaceChanged,
    Unchanged,
}

/// Tracks the last known reachability. Starts offline.
#[derive(Debug, Default)]
pub struct ConnectivityMonitor {
    online: bool,
    connection_type: ConnectionType,
}

impl ConnectivityMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a path update and reports the transition.
    pub fn observe(&mut self, path: &NetworkPath) -> Transition {
        let was_online = self.online;
        let previous_type = self.connection_type;

        self.online = path.satisfied;
        self.connection_type = if path.satisfied {
            classify(path)
        } else {
            ConnectionType::Unknown
        };

        match (was_online, self.online) {
            (false, true) => Transition::CameOnline,
            (true, false) => Transition::WentOffline,
            (true, true) if previous_type != self.connection_type => Transition::InterfaceChanged,
            _ => Transition::Unchanged,
        }
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    pub fn connection_type(&self) -> ConnectionType {
        self.connection_type
    }
}

#[cfg(test)]
#[path = "connectivity_tests.rs"]
mod tests;
