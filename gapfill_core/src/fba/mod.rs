//! Flux balance analysis: assembling a stoichiometric model for a set of reactions and
//! deciding whether it grows.

pub mod boundary;
pub mod bounds;
pub mod growth;
pub mod stoichiometry;

use thiserror::Error;

use crate::optimize::solvers::SolverError;

/// Errors raised while assembling or solving a model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A reaction refers to a compound which is missing from the compound axis
    #[error("Compound {compound} of reaction {reaction} is missing from the model")]
    MissingCompound { compound: String, reaction: String },
    /// The solver rejected the problem
    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),
}
