//! Cordwain Core - Shared types library.
//!
//! This crate provides common types used across all Cordwain components:
//! - `storefront` - Public-facing e-commerce site
//! - `admin` - Internal back-office (private network only)
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses
//! - [`cart`] - The cart state machine shared by storefront sessions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{CartLine, CartState};
pub use types::*;
