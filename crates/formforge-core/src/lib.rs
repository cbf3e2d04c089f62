//! FormForge Core - data model and error types for exam form reduction
//!
//! This crate provides the fundamental abstractions for FormForge:
//! - The scored candidate × item response grid
//! - Content domains, the test blueprint and answer keys
//! - The validated problem handed to the elimination engine
//! - Error types shared by every crate in the workspace

pub mod domain;
pub mod error;

pub use domain::{
    Blueprint, DomainBounds, DomainMap, DuplicateResponse, FormProblem, ItemScore, ItemTally,
    KeyMap, ResponseGrid, ResponseGridBuilder,
};
pub use error::{FormForgeError, ReliabilityError, Result};
