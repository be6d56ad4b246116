//! Common utilities and shared types for civicfix.
//!
//! This crate provides foundational components used across all civicfix crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based unique identifiers via [`IdGenerator`]
//! - **Geodesy**: Great-circle distance math via [`haversine_km`]
//!
//! # Example
//!
//! ```no_run
//! use civicfix_common::{Config, IdGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     let id = id_gen.generate();
//!     println!("Generated ID: {}", id);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod geo;
pub mod id;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use geo::{haversine_km, validate_coordinate, EARTH_RADIUS_KM};
pub use id::IdGenerator;
