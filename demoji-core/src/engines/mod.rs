// demoji-core/src/engines/mod.rs
//! This module contains the detection engine implementations.
//!
//! Each engine is a separate file within this directory and implements the
//! `DetectionEngine` trait. `emoji_engine` is the canonical implementation;
//! callers should depend on the trait rather than on the concrete type.

pub mod emoji_engine;
