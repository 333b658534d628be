//! Display abstraction and renderer for the LeafSOC display
//!
//! This crate provides:
//! - `DisplayBackend` trait implemented by panel drivers
//! - Screen layout for a 128x64 monochrome panel
//! - `render_frame` turning a composed `DisplayFrame` into draw calls
//! - `render_splash` for the boot screen
//!
//! # Architecture
//!
//! The composer in `leafsoc-core` decides *what* to show. This crate decides
//! *where* it goes on the panel. Drivers only know how to put pixels on
//! glass, so the same renderer works with any backend.

#![cfg_attr(not(test), no_std)]

pub mod backend;
pub mod layout;
pub mod renderer;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError, TextSize};
pub use renderer::{render_frame, render_splash};
