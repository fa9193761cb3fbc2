//! Solver interface for the microlp simplex solver

use microlp::{ComparisonOp, LinearExpr, OptimizationDirection, Problem};

use crate::optimize::solvers::{LinearProblem, Solver, SolverError};
use crate::optimize::{OptimizationStatus, ProblemSolution};

/// Solver backed by microlp, a pure rust simplex implementation
#[derive(Clone, Debug, Default)]
pub struct MicrolpSolver {
    problem: LinearProblem,
}

impl MicrolpSolver {
    pub fn new() -> Self {
        MicrolpSolver::default()
    }
}

impl Solver for MicrolpSolver {
    fn problem(&self) -> &LinearProblem {
        &self.problem
    }

    fn problem_mut(&mut self) -> &mut LinearProblem {
        &mut self.problem
    }

    fn solve(&mut self) -> Result<ProblemSolution, SolverError> {
        let objective = self.problem.objective()?;
        let col_bounds = self.problem.col_bounds()?;
        let row_bounds = self.problem.row_bounds()?;

        let mut lp = Problem::new(OptimizationDirection::Maximize);
        let variables: Vec<_> = objective
            .iter()
            .zip(col_bounds)
            .map(|(coefficient, bounds)| lp.add_var(*coefficient, *bounds))
            .collect();

        for (terms, (lower, upper)) in self
            .problem
            .matrix_rows()?
            .into_iter()
            .zip(row_bounds.iter().copied())
        {
            if terms.is_empty() {
                continue;
            }
            let expression = || {
                let mut expr = LinearExpr::empty();
                for (col, value) in &terms {
                    expr.add(variables[*col], *value);
                }
                expr
            };
            if lower == upper {
                lp.add_constraint(expression(), ComparisonOp::Eq, lower);
                continue;
            }
            if upper.is_finite() {
                lp.add_constraint(expression(), ComparisonOp::Le, upper);
            }
            if lower.is_finite() {
                lp.add_constraint(expression(), ComparisonOp::Ge, lower);
            }
        }

        let solution = match lp.solve() {
            Ok(solved) => ProblemSolution {
                status: OptimizationStatus::Optimal,
                objective_value: Some(solved.objective()),
                variable_values: Some(variables.iter().map(|v| solved[*v]).collect()),
            },
            Err(microlp::Error::Infeasible) => {
                ProblemSolution::failed(OptimizationStatus::Infeasible)
            }
            Err(microlp::Error::Unbounded) => ProblemSolution::failed(OptimizationStatus::Unbounded),
            #[allow(unreachable_patterns)]
            Err(_) => ProblemSolution::failed(OptimizationStatus::NumericalError),
        };
        self.problem.set_solution(solution.clone());
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DVector;
    use nalgebra_sparse::{CooMatrix, CscMatrix};

    #[test]
    fn solve_small_lp() {
        let mut coo = CooMatrix::new(1, 2);
        coo.push(0, 0, 1.);
        coo.push(0, 1, 2.);
        let mut solver = MicrolpSolver::new();
        solver.load(CscMatrix::from(&coo), None, Some(vec!["x".into(), "y".into()]));
        solver.row_bounds(vec![(f64::NEG_INFINITY, 4.)]).unwrap();
        solver.col_bounds(vec![(0., 3.), (0., 10.)]).unwrap();
        solver
            .objective_coefficients(DVector::from_vec(vec![1., 1.]))
            .unwrap();
        let solution = solver.solve().unwrap();
        assert_eq!(solution.status, OptimizationStatus::Optimal);
        assert!((solution.objective_value.unwrap() - 3.5).abs() < 1e-8);
        assert!((solver.col_primal_values().unwrap()["y"] - 0.5).abs() < 1e-8);
    }
}
