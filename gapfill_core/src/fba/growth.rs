//! Deciding whether a set of reactions grows on a media
use indexmap::{IndexMap, IndexSet};

use crate::fba::boundary::boundary_reactions_for_store;
use crate::fba::bounds::{assign_bounds, compound_bounds, BoundsOverlay};
use crate::fba::stoichiometry::StoichiometricModel;
use crate::fba::ModelError;
use crate::metabolic_model::media::Media;
use crate::metabolic_model::reaction::{FluxBounds, Reaction};
use crate::metabolic_model::store::ModelStore;
use crate::optimize::solvers::{new_default_solver, Solver, SolverError};
use crate::optimize::OptimizationStatus;

/// Biomass flux needed before a model is considered to grow
///
/// Anything at or below this is treated as no growth.
pub const GROWTH_THRESHOLD: f64 = 1.0;

/// Does a biomass flux count as growth
pub fn grows(objective_value: f64) -> bool {
    objective_value > GROWTH_THRESHOLD
}

/// Result of a single growth evaluation
#[derive(Clone, Debug)]
pub struct GrowthResult {
    /// Status reported by the solver
    pub status: OptimizationStatus,
    /// Biomass flux, zero when the problem could not be solved
    pub objective_value: f64,
    /// Whether the biomass flux is above [`GROWTH_THRESHOLD`]
    pub grew: bool,
    /// Flux through each column, keyed by reaction id
    pub fluxes: Option<IndexMap<String, f64>>,
}

impl GrowthResult {
    fn no_growth(status: OptimizationStatus) -> Self {
        GrowthResult {
            status,
            objective_value: 0.,
            grew: false,
            fluxes: None,
        }
    }
}

/// Evaluates growth of reaction sets against a store, using its own solver
///
/// The store is only read. Custom bounds are kept in an overlay owned by the evaluator, so
/// nothing set here can leak into another evaluator sharing the same store. Each evaluator
/// owns its solver, so separate evaluators can be used from separate threads.
pub struct GrowthEvaluator<'a> {
    store: &'a ModelStore,
    biomass: &'a Reaction,
    solver: Box<dyn Solver>,
    overlay: BoundsOverlay,
    evaluations: usize,
}

impl<'a> GrowthEvaluator<'a> {
    /// Create an evaluator using the solver set in the configuration
    pub fn new(store: &'a ModelStore, biomass: &'a Reaction) -> Result<Self, SolverError> {
        Ok(Self::with_solver(store, biomass, new_default_solver()?))
    }

    /// Create an evaluator using the given solver
    pub fn with_solver(
        store: &'a ModelStore,
        biomass: &'a Reaction,
        solver: Box<dyn Solver>,
    ) -> Self {
        GrowthEvaluator {
            store,
            biomass,
            solver,
            overlay: BoundsOverlay::new(),
            evaluations: 0,
        }
    }

    pub fn store(&self) -> &'a ModelStore {
        self.store
    }

    pub fn biomass(&self) -> &'a Reaction {
        self.biomass
    }

    /// Number of solves performed so far
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Override the bounds of one reaction for every following evaluation
    pub fn set_bounds(&mut self, reaction_id: &str, bounds: FluxBounds) {
        self.overlay.insert(reaction_id.to_string(), bounds);
    }

    /// Replace the bound overrides wholesale
    pub fn with_bounds(mut self, overlay: BoundsOverlay) -> Self {
        self.overlay = overlay;
        self
    }

    /// Remove every bound override
    pub fn clear_bounds(&mut self) {
        self.overlay.clear();
    }

    pub fn overlay(&self) -> &BoundsOverlay {
        &self.overlay
    }

    /// Uptake/secretion reactions for every compound in the store and media, to be reused
    /// across evaluations on the same media
    pub fn boundary_reactions(&self, media: &Media) -> Vec<Reaction> {
        boundary_reactions_for_store(self.store, media, self.biomass)
    }

    /// Does `reaction_ids` grow on `media`
    pub fn evaluate(
        &mut self,
        reaction_ids: &IndexSet<String>,
        media: &Media,
    ) -> Result<GrowthResult, ModelError> {
        self.evaluate_with_boundary(reaction_ids, media, None)
    }

    /// Does `reaction_ids` grow on `media`, using a precomputed set of uptake/secretion
    /// reactions
    pub fn evaluate_with_boundary(
        &mut self,
        reaction_ids: &IndexSet<String>,
        media: &Media,
        boundary: Option<&[Reaction]>,
    ) -> Result<GrowthResult, ModelError> {
        let model =
            StoichiometricModel::build(self.store, reaction_ids, media, self.biomass, boundary)?;
        if model.num_requested == 0 {
            log::debug!("No known reactions to evaluate on {}", media.name);
            return Ok(GrowthResult::no_growth(OptimizationStatus::Unoptimized));
        }

        let reaction_bounds = assign_bounds(
            model.reactions.iter().map(|r| &**r),
            media,
            Some(&self.overlay),
        );
        let col_bounds: Vec<(f64, f64)> = reaction_bounds
            .values()
            .map(|b| (b.lower, b.upper))
            .collect();
        let row_bounds = compound_bounds(&model.compounds);

        self.solver.load(
            model.matrix.clone(),
            Some(model.compounds.clone()),
            Some(model.reaction_ids()),
        );
        self.solver.row_bounds(row_bounds)?;
        self.solver.col_bounds(col_bounds)?;
        self.solver.objective_coefficients(model.objective.clone())?;
        let solution = self.solver.solve()?;
        self.evaluations += 1;

        let objective_value = if solution.status.has_solution() {
            solution.objective_value.unwrap_or(0.)
        } else {
            0.
        };
        log::debug!(
            "{} reactions on {}: {} with biomass flux {}",
            model.num_requested,
            media.name,
            solution.status,
            objective_value
        );
        Ok(GrowthResult {
            status: solution.status,
            objective_value,
            grew: grows(objective_value),
            fluxes: self.solver.col_primal_values(),
        })
    }

    /// Shorthand for whether the reactions grow
    pub fn grows(
        &mut self,
        reaction_ids: &IndexSet<String>,
        media: &Media,
        boundary: Option<&[Reaction]>,
    ) -> Result<bool, ModelError> {
        Ok(self
            .evaluate_with_boundary(reaction_ids, media, boundary)?
            .grew)
    }
}
