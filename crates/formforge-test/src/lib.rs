//! Shared test fixtures for FormForge crates.
//!
//! This crate provides small grids and problems for testing.
//!
//! - [`grid`] - Response grid builders from per-item score columns
//! - [`scenarios`] - Hand-checked problems with known elimination results
//! - [`tables`] - Writers for the four input tables
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! formforge-test = { workspace = true }
//! ```

pub mod grid;
pub mod scenarios;
pub mod tables;

pub use grid::{grid_from_columns, grid_from_optional_columns, problem_with_domains, single_domain_problem};
