//! Core business logic for Aurum.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `auth` - Password hashing and the admin role model
//! - `rates` - Gold purities, rate figures, release-timestamp rules
//! - `content` - The CMS content sections

pub mod auth;
pub mod content;
pub mod rates;
