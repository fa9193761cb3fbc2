//! Implements a solver interface for Clarabel
//!
//! Clarabel minimizes `q'x` subject to `Ax + s = b` with `s` in a product of cones, so the
//! linear program is rewritten with equality rows in a zero cone, and every finite
//! inequality (from row or column bounds) as a row in a nonnegative cone.

use clarabel::algebra::CscMatrix as ClarabelCscMatrix;
use clarabel::solver::{
    DefaultSettings, DefaultSolver, IPSolver, SolverStatus, SupportedConeT,
};

use crate::configuration::read_configuration;
use crate::optimize::solvers::{LinearProblem, Solver, SolverError};
use crate::optimize::{OptimizationStatus, ProblemSolution};

/// Solver backed by the Clarabel interior point solver
#[derive(Clone, Debug, Default)]
pub struct ClarabelSolver {
    problem: LinearProblem,
    verbose: bool,
}

impl ClarabelSolver {
    pub fn new() -> Self {
        ClarabelSolver::default()
    }

    /// Have Clarabel print its iteration log
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Constraint rows in Clarabel form, split by the cone they belong to
#[derive(Default)]
struct ConeRows {
    equality: Vec<(Vec<(usize, f64)>, f64)>,
    inequality: Vec<(Vec<(usize, f64)>, f64)>,
}

impl ConeRows {
    /// Add `lower <= terms <= upper`
    fn push_bounded(&mut self, terms: Vec<(usize, f64)>, lower: f64, upper: f64) {
        if lower == upper {
            if terms.is_empty() && lower == 0. {
                return;
            }
            self.equality.push((terms, lower));
            return;
        }
        if upper.is_finite() {
            self.inequality.push((terms.clone(), upper));
        }
        if lower.is_finite() {
            let negated = terms.into_iter().map(|(col, v)| (col, -v)).collect();
            self.inequality.push((negated, -lower));
        }
    }

    /// Assemble `A`, `b`, and the cones
    fn into_clarabel(
        self,
        ncols: usize,
    ) -> (ClarabelCscMatrix<f64>, Vec<f64>, Vec<SupportedConeT<f64>>) {
        let n_equality = self.equality.len();
        let n_inequality = self.inequality.len();
        let mut columns: Vec<Vec<(usize, f64)>> = vec![Vec::new(); ncols];
        let mut b = Vec::with_capacity(n_equality + n_inequality);
        for (row, (terms, rhs)) in self
            .equality
            .into_iter()
            .chain(self.inequality)
            .enumerate()
        {
            for (col, value) in terms {
                columns[col].push((row, value));
            }
            b.push(rhs);
        }
        let mut colptr = Vec::with_capacity(ncols + 1);
        let mut rowval = Vec::new();
        let mut nzval = Vec::new();
        colptr.push(0);
        for mut column in columns {
            column.sort_by_key(|(row, _)| *row);
            for (row, value) in column {
                rowval.push(row);
                nzval.push(value);
            }
            colptr.push(rowval.len());
        }
        let a = ClarabelCscMatrix::new(b.len(), ncols, colptr, rowval, nzval);
        let mut cones = Vec::new();
        if n_equality > 0 {
            cones.push(SupportedConeT::ZeroConeT(n_equality));
        }
        if n_inequality > 0 {
            cones.push(SupportedConeT::NonnegativeConeT(n_inequality));
        }
        (a, b, cones)
    }
}

impl Solver for ClarabelSolver {
    fn problem(&self) -> &LinearProblem {
        &self.problem
    }

    fn problem_mut(&mut self) -> &mut LinearProblem {
        &mut self.problem
    }

    fn solve(&mut self) -> Result<ProblemSolution, SolverError> {
        let ncols = self.problem.matrix()?.ncols();
        let objective = self.problem.objective()?.clone();
        let mut rows = ConeRows::default();
        for (terms, (lower, upper)) in self
            .problem
            .matrix_rows()?
            .into_iter()
            .zip(self.problem.row_bounds()?.iter().copied())
        {
            rows.push_bounded(terms, lower, upper);
        }
        for (col, (lower, upper)) in self.problem.col_bounds()?.iter().copied().enumerate() {
            rows.push_bounded(vec![(col, 1.)], lower, upper);
        }

        if ncols == 0 {
            let solution = ProblemSolution {
                status: OptimizationStatus::Optimal,
                objective_value: Some(0.),
                variable_values: Some(Vec::new()),
            };
            self.problem.set_solution(solution.clone());
            return Ok(solution);
        }

        let (a, b, cones) = rows.into_clarabel(ncols);
        let p = ClarabelCscMatrix::new(ncols, ncols, vec![0; ncols + 1], Vec::new(), Vec::new());
        let q: Vec<f64> = objective.iter().map(|c| -c).collect();

        let mut settings = DefaultSettings::<f64>::default();
        settings.verbose = self.verbose;
        let tolerance = read_configuration(|c| c.tolerance);
        settings.tol_feas = tolerance;
        settings.tol_gap_abs = tolerance;

        let mut solver = DefaultSolver::new(&p, &q, &a, &b, &cones, settings);
        solver.solve();

        let status = match solver.solution.status {
            SolverStatus::Solved => OptimizationStatus::Optimal,
            SolverStatus::AlmostSolved => OptimizationStatus::AlmostOptimal,
            SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
                OptimizationStatus::Infeasible
            }
            SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => {
                OptimizationStatus::Unbounded
            }
            SolverStatus::NumericalError => OptimizationStatus::NumericalError,
            SolverStatus::Unsolved => OptimizationStatus::Unoptimized,
            _ => OptimizationStatus::SolverHalted,
        };
        let solution = if status.has_solution() {
            let x = solver.solution.x.clone();
            let objective_value = objective.iter().zip(&x).map(|(c, v)| c * v).sum();
            ProblemSolution {
                status,
                objective_value: Some(objective_value),
                variable_values: Some(x),
            }
        } else {
            ProblemSolution::failed(status)
        };
        self.problem.set_solution(solution.clone());
        Ok(solution)
    }
}
