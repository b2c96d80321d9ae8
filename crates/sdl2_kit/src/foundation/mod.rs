//! Foundation module - Core utilities and types
//!
//! This module provides the pieces every wrapper is built from:
//! - Exclusive handle ownership and non-owning views
//! - Plain geometry and color values shared with the native layer
//! - Logging utilities

pub mod geometry;
pub mod handle;
pub mod logging;
