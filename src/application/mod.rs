//! Application layer containing the use-case orchestration.
//!
//! This module defines the `PaymentService`, the primary entry point for
//! creating, querying and transitioning payments. It sequences store access
//! and entity logic and stays free of any transport concern.

pub mod service;
