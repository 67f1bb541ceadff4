// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Session models
//!
//! A [`Session`] is an owned handle to one engine connection plus the
//! bookkeeping the pool needs to retire it. A [`SessionSlot`] is the
//! per-worker cache a session lives in between uses: one slot per worker,
//! checked out exclusively for that worker's lifetime, never shared.

use std::fmt;
use std::time::Instant;
use uuid::Uuid;

use crate::engine::EngineConnection;

/// Identity of the execution unit that owns a session slot
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkerId(String);

impl WorkerId {
    /// The orchestrator's own driving thread
    pub fn driver() -> Self {
        Self("driver".to_string())
    }

    /// A pool worker by index
    pub fn worker(index: usize) -> Self {
        Self(format!("worker-{}", index))
    }

    pub fn named(name: &str) -> Self {
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An owned, stateful engine session
///
/// Exclusively owned by the worker that created it until retired; the pool
/// never hands the same session to two workers.
pub struct Session {
    /// Unique id for log correlation
    pub session_id: Uuid,
    /// The underlying engine connection
    pub conn: Box<dyn EngineConnection>,
    /// When the session was established
    pub created_at: Instant,
    /// Number of acquisitions served so far
    pub use_count: u32,
    /// The worker that created and owns this session
    pub owner: WorkerId,
}

impl Session {
    pub fn new(conn: Box<dyn EngineConnection>, owner: WorkerId, created_at: Instant) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            conn,
            created_at,
            use_count: 0,
            owner,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("session_id", &self.session_id)
            .field("use_count", &self.use_count)
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

/// Per-worker session cache with an explicit checkout protocol
///
/// The slot belongs to exactly one worker; passing `&mut SessionSlot` into
/// pool and executor calls is what enforces single-owner access, no locking
/// on the session itself is needed.
#[derive(Debug)]
pub struct SessionSlot {
    owner: WorkerId,
    pub(crate) cached: Option<Session>,
}

impl SessionSlot {
    pub fn new(owner: WorkerId) -> Self {
        Self {
            owner,
            cached: None,
        }
    }

    /// Slot for the orchestrator's driving thread
    pub fn driver() -> Self {
        Self::new(WorkerId::driver())
    }

    pub fn owner(&self) -> &WorkerId {
        &self.owner
    }

    /// Whether a session is currently cached in this slot
    pub fn is_populated(&self) -> bool {
        self.cached.is_some()
    }
}
