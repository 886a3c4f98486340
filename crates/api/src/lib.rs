//! PharmaHub marketplace API library.
//!
//! The HTTP service lives here as a library so the binary, the CLI and the
//! router tests share one implementation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
