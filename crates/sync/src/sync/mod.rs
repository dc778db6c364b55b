// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync queue, pass processor and the engine actor.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐ commands ┌─────────────┐  spawn  ┌───────────────┐
//! │ SyncHandle  │─────────►│ SyncEngine  │────────►│ SyncProcessor │
//! │  (clone)    │◄─────────│   (actor)   │◄────────│    (pass)     │
//! └─────────────┘  status  └─────────────┘ outcome └───────────────┘
//!                                 │                        │
//!                                 ▼                        ▼
//!                          ┌─────────────┐         ┌──────────────┐
//!                          │  SyncQueue  │         │ Remote + disk│
//!                          └─────────────┘         └──────────────┘
//! ```

mod engine;
mod processor;
mod queue;

pub use engine::{SyncEngine, SyncHandle};
pub use processor::{PassOutcome, PassReport, RetryPolicy, SyncProcessor};
pub use queue::SyncQueue;
