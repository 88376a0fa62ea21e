//! Arcade Racer Server Library
//!
//! Exposes server components for integration testing.

pub mod api;
pub mod config;
pub mod error;
pub mod game_loop;
pub mod notice;
pub mod state;
