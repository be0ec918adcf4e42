//! Shared types and configuration for Aurum.
//!
//! This crate provides common types used across all other crates:
//! - Application configuration (server, database, JWT, sessions, rates)
//! - JWT claims and the token service
//! - Authentication wire types

pub mod auth;
pub mod config;
pub mod jwt;

pub use auth::{Claims, LoginRequest, TokenResponse};
pub use config::AppConfig;
pub use jwt::{JwtError, JwtService, JwtServiceConfig};
