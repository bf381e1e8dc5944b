//! Internal utilities for openai-client
//!
//! This module contains implementation details that are not part of the public API.
//! `RetryPolicy` is re-exported through `lib.rs` for public use.

pub mod retry;
