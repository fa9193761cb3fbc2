//! Process wide defaults used when building reactions, bounds, and solvers
use std::sync::{LazyLock, RwLock};

pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

pub struct Configuration {
    /// Lower flux bound given to reversible reactions
    pub lower_bound: f64,
    /// Upper flux bound given to every reaction that can carry forward flux
    pub upper_bound: f64,
    /// Tolerance handed to the solver backends
    pub tolerance: f64,
    /// Backend used by [`crate::optimize::solvers::new_default_solver`]
    pub solver: SolverKind,
    /// Seed for the reshuffle used when bisection stalls
    pub seed: u64,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            lower_bound: -1000.,
            upper_bound: 1000.,
            tolerance: 1e-07,
            solver: SolverKind::Clarabel,
            seed: 42,
        }
    }
}

/// Enum used to specify the default solver to use
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SolverKind {
    /// Use the Clarabel interior point solver
    Clarabel,
    /// Use the microlp simplex solver, requires the microlp feature to be enabled
    Microlp,
}

/// Read a value out of the global configuration, tolerating a poisoned lock
pub(crate) fn read_configuration<T>(f: impl FnOnce(&Configuration) -> T) -> T {
    match CONFIGURATION.read() {
        Ok(config) => f(&config),
        Err(poisoned) => f(&poisoned.into_inner()),
    }
}

/// Default (lower, upper) flux bounds
pub(crate) fn default_bounds() -> (f64, f64) {
    read_configuration(|c| (c.lower_bound, c.upper_bound))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let (lb, ub) = default_bounds();
        assert!((lb + 1000.).abs() < 1e-25);
        assert!((ub - 1000.).abs() < 1e-25);
        assert_eq!(read_configuration(|c| c.solver), SolverKind::Clarabel);
    }
}
