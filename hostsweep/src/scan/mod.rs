// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Keyset pagination over the host dimension

pub mod keyset;
pub mod spec;

pub use keyset::{KeysetPaginator, PageCursor, Pages, ScanError};
pub use spec::ScanSpec;
