//! Agora API server library.
//! This crate exposes internal modules for integration testing.
//! The binary entry point is in main.rs.

pub mod auth;
pub mod comments;
pub mod config;
pub mod posts;
pub mod routes;
pub mod state;
pub mod store;
pub mod users;
pub mod votes;
