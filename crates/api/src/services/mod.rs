//! Business logic services for the API.
//!
//! # Services
//!
//! - `auth` - Supabase access token verification
//! - `cart` - Session-backed cart operations

pub mod auth;
pub mod cart;
