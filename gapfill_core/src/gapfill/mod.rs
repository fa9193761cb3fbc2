//! Gap-filling: finding reactions which let a non-growing model grow
//!
//! The [`cascade`] tries the suggestion strategies one at a time until the model grows,
//! then the [`minimize`] bisection trims each suggestion back to what is actually needed.
//! [`accuracy`] offers the same search scored against several growth/no-growth media, and
//! [`two_media`] reconciles a medium the model must grow on with one it must not.

pub mod accuracy;
pub mod cascade;
pub mod ec;
pub mod essential;
pub mod limit;
pub mod linked;
pub mod media;
pub mod minimize;
pub mod orphans;
pub mod probability;
pub mod proteins;
pub mod roles;
pub mod subsystems;
pub mod two_media;

use derive_builder::Builder;
use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

use crate::configuration::read_configuration;
use crate::fba::ModelError;
use crate::gapfill::cascade::CascadeStep;
use crate::gapfill::essential::essential_reactions;

/// Errors raised while gap-filling
///
/// Running out of strategies is not an error, see [`GapfillOutcome`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GapfillError {
    /// The base reactions already grow, so there is nothing to minimize
    #[error("The base set of {0} reactions already grows")]
    BaseAlreadyGrows(usize),
    /// The base and the optional reactions together don't grow
    #[error("The base set with {0} optional reactions does not grow")]
    OptionalDoesNotGrow(usize),
    /// The starting reactions already grow on the medium they must not grow on
    #[error("The starting reactions already grow on the negative medium {0}")]
    NegativeMediumGrows(String),
    /// The starting reactions already grow on the medium they should be gap-filled for
    #[error("The starting reactions already grow on the positive medium {0}")]
    PositiveMediumGrows(String),
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Knobs of the suggestion strategies and the minimizer
#[derive(Builder, Debug, Clone)]
pub struct GapfillSettings {
    /// The brief EC pass only suggests an EC number matching at most this many reactions
    #[builder(default = "5")]
    pub ec_brief_limit: usize,
    /// Fraction of a subsystem's roles which must be present before it is completed
    #[builder(default = "0.5")]
    pub subsystem_coverage: f64,
    /// A compound touched by at most this many working reactions is an orphan
    #[builder(default = "1")]
    pub orphan_max_connections: usize,
    /// Candidates touching a compound used by more base reactions than this are dropped by
    /// the compound limit filter
    #[builder(default = "50")]
    pub limit_max_connections: usize,
    /// Roles from close organisms or genera need a probability above this
    #[builder(default = "0.0")]
    pub close_organism_threshold: f64,
    /// Only suggest reactions with an enzyme from the probability strategy
    #[builder(default = "true")]
    pub probability_requires_proteins: bool,
    /// Reshuffles allowed when bisection stalls
    #[builder(default = "5")]
    pub max_retries: usize,
    /// Rounds of the two media loop before giving up
    #[builder(default = "5")]
    pub max_iterations: usize,
    /// Seed for the reshuffle
    #[builder(default = "read_configuration(|c| c.seed)")]
    pub seed: u64,
    /// Minimize the suggestions after the cascade grows
    #[builder(default = "true")]
    pub minimize: bool,
}

impl Default for GapfillSettings {
    fn default() -> Self {
        GapfillSettingsBuilder::default()
            .build()
            .unwrap_or_else(|_| unreachable!("every setting has a default"))
    }
}

/// Evidence about the organism consumed by the suggestion strategies
#[derive(Builder, Debug, Clone)]
pub struct GapfillInputs {
    /// Functional roles annotated in the genome
    #[builder(default = "IndexSet::new()")]
    pub roles: IndexSet<String>,
    /// Reactions suggested by the first cascade step
    #[builder(default = "essential_reactions()")]
    pub essential: IndexSet<String>,
    /// Roles seen in close organisms, with the probability of being present
    #[builder(default = "IndexMap::new()")]
    pub close_organism_roles: IndexMap<String, f64>,
    /// Roles seen in close genera, with the probability of being present
    #[builder(default = "IndexMap::new()")]
    pub close_genera_roles: IndexMap<String, f64>,
    /// Subsystem name to the roles making it up
    #[builder(default = "IndexMap::new()")]
    pub subsystems: IndexMap<String, IndexSet<String>>,
    /// Reactions which must never be suggested
    #[builder(default = "IndexSet::new()")]
    pub excluded: IndexSet<String>,
}

impl Default for GapfillInputs {
    fn default() -> Self {
        GapfillInputsBuilder::default()
            .build()
            .unwrap_or_else(|_| unreachable!("every input has a default"))
    }
}

/// The reactions one cascade step contributed
#[derive(Debug, Clone, PartialEq)]
pub struct GapfillRecord {
    pub step: CascadeStep,
    pub reactions: IndexSet<String>,
}

impl GapfillRecord {
    pub fn new(step: CascadeStep, reactions: IndexSet<String>) -> Self {
        GapfillRecord { step, reactions }
    }
}

/// A model which grows after gap-filling
#[derive(Debug, Clone, PartialEq)]
pub struct GapfilledModel {
    /// Reactions of the model before gap-filling, restricted to the store
    pub original: IndexSet<String>,
    /// What each cascade step added, in cascade order
    pub record: Vec<GapfillRecord>,
}

impl GapfilledModel {
    /// Every reaction added by gap-filling
    pub fn added(&self) -> IndexSet<String> {
        self.record
            .iter()
            .flat_map(|r| r.reactions.iter().cloned())
            .collect()
    }

    /// The original reactions together with the added ones
    pub fn reactions(&self) -> IndexSet<String> {
        let mut reactions = self.original.clone();
        reactions.extend(self.added());
        reactions
    }

    /// Reaction id to the label of the step which brought it into the model
    ///
    /// The cascade seeds its working set with the original reactions at the essential
    /// step, so those carry the essential label.
    pub fn provenance(&self) -> IndexMap<String, &'static str> {
        let mut provenance: IndexMap<String, &'static str> = self
            .original
            .iter()
            .map(|id| (id.clone(), CascadeStep::Essential.label()))
            .collect();
        provenance.extend(
            self.record
                .iter()
                .flat_map(|r| r.reactions.iter().map(|id| (id.clone(), r.step.label()))),
        );
        provenance
    }
}

/// Result of a gap-filling run
#[derive(Debug, Clone, PartialEq)]
pub enum GapfillOutcome {
    /// The model grows
    Success(GapfilledModel),
    /// Every strategy was tried without producing growth
    Exhausted { attempted: Vec<CascadeStep> },
    /// The two media loop ran out of iterations, `partial` grows on the positive medium
    /// but also on the negative one
    Unresolved {
        partial: GapfilledModel,
        excluded: IndexSet<String>,
    },
}

impl GapfillOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, GapfillOutcome::Success(_))
    }

    /// The gap-filled model, if gap-filling succeeded
    pub fn model(&self) -> Option<&GapfilledModel> {
        match self {
            GapfillOutcome::Success(model) => Some(model),
            _ => None,
        }
    }
}
