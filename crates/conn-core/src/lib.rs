//! Core types and definitions for the CONN tactical trainer.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometric types, state enums, commands, events, errors, configuration,
//! snapshot views, and constants. It has no dependency on the ECS or any
//! runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod tma;
pub mod types;
