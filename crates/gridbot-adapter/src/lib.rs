//! # gridbot Adapter Layer
//!
//! External system integrations (Hexagonal Architecture adapters).
//!
//! ## Structure
//!
//! - `controller/` - Inbound adapters (HTTP)
//! - `gateway/` - Outbound adapters (actuation clock)
//! - `repository/` - Session store implementations

pub mod controller;
pub mod gateway;
pub mod repository;
