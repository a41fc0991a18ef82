//! # Metering Point Lifecycle Service
//!
//! Core of a national energy-market data hub: metering point registration,
//! connection-state transitions, master data updates and parent/child
//! coupling, each guarded by composable business rules.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Aggregate, value objects, business rules, policies, events
//! - **application**: Use-case orchestrators and ports
//! - **infrastructure**: Adapters backing the ports (in-memory repository)
//! - **shared**: Cross-cutting error types

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use config::{default_config_path, AppConfig};
pub use shared::{DomainError, DomainResult};
