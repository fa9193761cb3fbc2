//! Linear program solver interface, and the backends implementing it
//!
//! A [`Solver`] holds exactly one problem at a time. Every call to [`Solver::load`] replaces
//! the matrix and forgets the bounds, objective, and last solution, so the row bounds,
//! column bounds, and objective have to be supplied again before solving.

pub mod clarabel;

use indexmap::IndexMap;
use nalgebra::DVector;
use nalgebra_sparse::CscMatrix;
use thiserror::Error;

use crate::configuration::{read_configuration, SolverKind};
use crate::optimize::ProblemSolution;

pub use self::clarabel::ClarabelSolver;

cfg_if::cfg_if! {
    if #[cfg(feature = "microlp")] {
        pub mod microlp;
        pub use self::microlp::MicrolpSolver;

        fn new_microlp_solver() -> Result<Box<dyn Solver>, SolverError> {
            Ok(Box::new(MicrolpSolver::new()))
        }
    } else {
        fn new_microlp_solver() -> Result<Box<dyn Solver>, SolverError> {
            Err(SolverError::BackendUnavailable("microlp".to_string()))
        }
    }
}

/// Create a new solver of the requested kind
pub fn new_solver(kind: SolverKind) -> Result<Box<dyn Solver>, SolverError> {
    match kind {
        SolverKind::Clarabel => Ok(Box::new(ClarabelSolver::new())),
        SolverKind::Microlp => new_microlp_solver(),
    }
}

/// Create a new solver of the kind set in the global configuration
pub fn new_default_solver() -> Result<Box<dyn Solver>, SolverError> {
    new_solver(read_configuration(|c| c.solver))
}

/// A maximization problem `max c'x` subject to `row_lower <= Ax <= row_upper` and
/// `col_lower <= x <= col_upper`
#[derive(Clone, Debug, Default)]
pub struct LinearProblem {
    matrix: Option<CscMatrix<f64>>,
    row_names: Option<Vec<String>>,
    col_names: Option<Vec<String>>,
    row_bounds: Option<Vec<(f64, f64)>>,
    col_bounds: Option<Vec<(f64, f64)>>,
    objective: Option<DVector<f64>>,
    solution: Option<ProblemSolution>,
}

impl LinearProblem {
    /// Replace the constraint matrix, forgetting everything else
    pub fn load(
        &mut self,
        matrix: CscMatrix<f64>,
        row_names: Option<Vec<String>>,
        col_names: Option<Vec<String>>,
    ) {
        *self = LinearProblem {
            matrix: Some(matrix),
            row_names,
            col_names,
            ..LinearProblem::default()
        };
    }

    pub fn set_row_bounds(&mut self, bounds: Vec<(f64, f64)>) -> Result<(), SolverError> {
        let expected = self.matrix()?.nrows();
        validate_bounds("row bounds", &bounds, expected)?;
        self.row_bounds = Some(bounds);
        self.solution = None;
        Ok(())
    }

    pub fn set_col_bounds(&mut self, bounds: Vec<(f64, f64)>) -> Result<(), SolverError> {
        let expected = self.matrix()?.ncols();
        validate_bounds("column bounds", &bounds, expected)?;
        self.col_bounds = Some(bounds);
        self.solution = None;
        Ok(())
    }

    pub fn set_objective(&mut self, coefficients: DVector<f64>) -> Result<(), SolverError> {
        let expected = self.matrix()?.ncols();
        if coefficients.len() != expected {
            return Err(SolverError::DimensionMismatch {
                component: "objective coefficients",
                expected,
                found: coefficients.len(),
            });
        }
        self.objective = Some(coefficients);
        self.solution = None;
        Ok(())
    }

    pub fn matrix(&self) -> Result<&CscMatrix<f64>, SolverError> {
        self.matrix.as_ref().ok_or(SolverError::NotLoaded)
    }

    pub fn row_bounds(&self) -> Result<&[(f64, f64)], SolverError> {
        self.row_bounds
            .as_deref()
            .ok_or(SolverError::Incomplete("row bounds"))
    }

    pub fn col_bounds(&self) -> Result<&[(f64, f64)], SolverError> {
        self.col_bounds
            .as_deref()
            .ok_or(SolverError::Incomplete("column bounds"))
    }

    pub fn objective(&self) -> Result<&DVector<f64>, SolverError> {
        self.objective
            .as_ref()
            .ok_or(SolverError::Incomplete("objective coefficients"))
    }

    pub fn row_names(&self) -> Option<&[String]> {
        self.row_names.as_deref()
    }

    pub fn col_names(&self) -> Option<&[String]> {
        self.col_names.as_deref()
    }

    pub fn solution(&self) -> Option<&ProblemSolution> {
        self.solution.as_ref()
    }

    pub(crate) fn set_solution(&mut self, solution: ProblemSolution) {
        self.solution = Some(solution);
    }

    /// Rows of the matrix as (column, value) pairs, zero entries dropped
    pub(crate) fn matrix_rows(&self) -> Result<Vec<Vec<(usize, f64)>>, SolverError> {
        let matrix = self.matrix()?;
        let mut rows = vec![Vec::new(); matrix.nrows()];
        for (row, col, value) in matrix.triplet_iter() {
            if *value != 0. {
                rows[row].push((col, *value));
            }
        }
        Ok(rows)
    }
}

fn validate_bounds(
    component: &'static str,
    bounds: &[(f64, f64)],
    expected: usize,
) -> Result<(), SolverError> {
    if bounds.len() != expected {
        return Err(SolverError::DimensionMismatch {
            component,
            expected,
            found: bounds.len(),
        });
    }
    if let Some((index, (lower, upper))) = bounds
        .iter()
        .enumerate()
        .find(|(_, (lower, upper))| lower > upper)
    {
        return Err(SolverError::InvalidBounds {
            component,
            index,
            lower: *lower,
            upper: *upper,
        });
    }
    Ok(())
}

/// The linear program adapter used by the growth evaluator
///
/// Implementors own a [`LinearProblem`] and provide [`Solver::solve`]; everything else
/// has a default implementation on top of the problem.
pub trait Solver {
    /// The currently loaded problem
    fn problem(&self) -> &LinearProblem;

    /// Mutable access to the currently loaded problem
    fn problem_mut(&mut self) -> &mut LinearProblem;

    /// Solve the loaded problem, maximizing the objective
    fn solve(&mut self) -> Result<ProblemSolution, SolverError>;

    /// Load a new constraint matrix, replacing any previously loaded problem
    fn load(
        &mut self,
        matrix: CscMatrix<f64>,
        row_names: Option<Vec<String>>,
        col_names: Option<Vec<String>>,
    ) {
        self.problem_mut().load(matrix, row_names, col_names)
    }

    /// Set the (lower, upper) bounds on every row
    fn row_bounds(&mut self, bounds: Vec<(f64, f64)>) -> Result<(), SolverError> {
        self.problem_mut().set_row_bounds(bounds)
    }

    /// Set the (lower, upper) bounds on every column
    fn col_bounds(&mut self, bounds: Vec<(f64, f64)>) -> Result<(), SolverError> {
        self.problem_mut().set_col_bounds(bounds)
    }

    /// Set the objective coefficients, one per column
    fn objective_coefficients(&mut self, coefficients: DVector<f64>) -> Result<(), SolverError> {
        self.problem_mut().set_objective(coefficients)
    }

    /// Activity of each named column in the last successful solve
    fn col_primal_values(&self) -> Option<IndexMap<String, f64>> {
        let problem = self.problem();
        let names = problem.col_names()?;
        problem.solution()?.named_values(names)
    }
}

/// Errors raised by solvers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Bounds or objective given before a matrix was loaded
    #[error("No problem has been loaded into the solver")]
    NotLoaded,
    /// Length of bounds or objective doesn't match the loaded matrix
    #[error("Expected {expected} {component}, found {found}")]
    DimensionMismatch {
        component: &'static str,
        expected: usize,
        found: usize,
    },
    /// A lower bound above its upper bound
    #[error("Invalid {component} at index {index}: lower bound {lower} > upper bound {upper}")]
    InvalidBounds {
        component: &'static str,
        index: usize,
        lower: f64,
        upper: f64,
    },
    /// Solve called before every part of the problem was supplied
    #[error("Tried to solve without setting {0}")]
    Incomplete(&'static str),
    /// The requested backend was not compiled in
    #[error("Solver backend {0} is not available, enable its feature")]
    BackendUnavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra_sparse::CooMatrix;

    fn two_by_two() -> CscMatrix<f64> {
        let mut coo = CooMatrix::new(1, 2);
        coo.push(0, 0, 1.);
        coo.push(0, 1, 1.);
        CscMatrix::from(&coo)
    }

    #[test]
    fn bounds_require_load() {
        let mut problem = LinearProblem::default();
        assert_eq!(
            problem.set_row_bounds(vec![(0., 0.)]),
            Err(SolverError::NotLoaded)
        );
    }

    #[test]
    fn dimension_mismatch() {
        let mut problem = LinearProblem::default();
        problem.load(two_by_two(), None, None);
        match problem.set_col_bounds(vec![(0., 1.)]) {
            Err(SolverError::DimensionMismatch {
                expected, found, ..
            }) => {
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("Dimension mismatch not caught: {:?}", other),
        }
        assert!(problem.set_objective(DVector::from_vec(vec![1.])).is_err());
        assert!(problem.set_row_bounds(vec![(0., 1.), (0., 1.)]).is_err());
    }

    #[test]
    fn invalid_bounds() {
        let mut problem = LinearProblem::default();
        problem.load(two_by_two(), None, None);
        if let Err(SolverError::InvalidBounds { index, .. }) =
            problem.set_col_bounds(vec![(0., 1.), (2., 1.)])
        {
            assert_eq!(index, 1);
        } else {
            panic!("Invalid column bounds not caught")
        }
    }

    #[test]
    fn load_replaces_problem() {
        let mut problem = LinearProblem::default();
        problem.load(two_by_two(), None, Some(vec!["x".into(), "y".into()]));
        problem.set_row_bounds(vec![(0., 1.)]).unwrap();
        problem.load(two_by_two(), None, None);
        assert_eq!(
            problem.row_bounds().unwrap_err(),
            SolverError::Incomplete("row bounds")
        );
        assert!(problem.col_names().is_none());
    }

    #[test]
    fn factory() {
        assert!(new_solver(SolverKind::Clarabel).is_ok());
        #[cfg(not(feature = "microlp"))]
        assert!(new_solver(SolverKind::Microlp).is_err());
        assert!(new_default_solver().is_ok());
    }
}
