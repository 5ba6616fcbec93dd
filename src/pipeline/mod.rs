// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! End-to-end orchestration
//!
//! ```text
//! Idle → Fetching → Extracting → (Normalizing → Rendering)? → Done | Failed
//! ```
//!
//! Nothing is cached: each operation fetches and extracts the source page
//! again, and a failure in any stage fails the whole call.

pub mod orchestrator;
pub mod types;

pub use orchestrator::Pipeline;
pub use types::{CrawledItem, ItemCloud, PipelineError, PipelineStage};
