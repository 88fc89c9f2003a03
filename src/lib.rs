//! Library crate for remote-user-manager.
//!
//! This crate exposes the building blocks of the TUI:
//! - Application state and update loop (`app`)
//! - CRUD synchronization core (`controller`)
//! - In-memory search helpers (`search`)
//! - Remote user store bindings (`store`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `remote-user-manager` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod app;
pub mod controller;
pub mod search;
pub mod store;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
pub use controller::{ControllerState, CrudController};
pub use store::{User, UserDraft, UserStore};
