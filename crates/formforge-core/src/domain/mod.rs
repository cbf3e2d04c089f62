//! Exam form data model
//!
//! These types describe a beta-tested form:
//! - `ResponseGrid`: The scored candidate × item matrix
//! - `DomainMap` / `Blueprint`: Content domains and their legal item counts
//! - `KeyMap`: Credited responses used to score the response log
//! - `FormProblem`: The validated combination handed to the elimination engine

mod blueprint;
mod grid;
mod problem;


pub use blueprint::{Blueprint, DomainBounds, DomainMap, KeyMap};
pub use grid::{DuplicateResponse, ItemScore, ItemTally, ResponseGrid, ResponseGridBuilder};
pub use problem::FormProblem;
