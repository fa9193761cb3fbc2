//! This module provides a struct for representing reactions
use std::fmt::{Display, Formatter};

use derive_builder::Builder;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Represents a reaction in the biochemistry store
#[derive(Builder, Debug, Clone, Serialize, Deserialize)]
pub struct Reaction {
    /// Used to identify the reaction
    #[builder(setter(into))]
    pub id: String,
    /// Human-readable reaction name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Which way the reaction can carry flux
    #[builder(default = "ReactionDirection::Unknown")]
    pub direction: ReactionDirection,
    /// Substrates, compound id to stoichiometric coefficient
    #[builder(default = "IndexMap::new()")]
    pub left: IndexMap<String, f64>,
    /// Products, compound id to stoichiometric coefficient
    #[builder(default = "IndexMap::new()")]
    pub right: IndexMap<String, f64>,
    /// Explicit flux bounds, respected as-is when present
    #[builder(default = "None")]
    pub bounds: Option<FluxBounds>,
    /// Moves a compound across a membrane
    #[builder(default = "false")]
    pub is_transport: bool,
    /// Synthetic reaction letting a compound enter or leave the system
    #[builder(default = "false")]
    pub is_uptake_secretion: bool,
    /// Pseudo-reaction whose flux is the growth objective
    #[builder(default = "false")]
    pub is_biomass: bool,
    /// Enzyme Commission numbers associated with the reaction
    #[builder(default = "Vec::new()")]
    #[serde(default)]
    pub ec_numbers: Vec<String>,
    /// Ids of the enzyme complexes which catalyze the reaction
    #[builder(default = "IndexSet::new()")]
    #[serde(default)]
    pub enzymes: IndexSet<String>,
    /// Ids of reactions annotated as functionally linked to this one
    #[builder(default = "IndexSet::new()")]
    #[serde(default)]
    pub linked: IndexSet<String>,
}

impl Reaction {
    /// Ids of every compound on either side of the reaction
    pub fn all_compounds(&self) -> IndexSet<&str> {
        self.left
            .keys()
            .chain(self.right.keys())
            .map(|c| c.as_str())
            .collect()
    }

    /// Does the reaction have any associated protein
    pub fn has_proteins(&self) -> bool {
        !self.enzymes.is_empty()
    }

    /// Compounds which the reaction can consume given its direction
    pub fn consumed_compounds(&self) -> IndexSet<&str> {
        match self.direction {
            ReactionDirection::Forward | ReactionDirection::Unknown => {
                self.left.keys().map(|c| c.as_str()).collect()
            }
            ReactionDirection::Reverse => self.right.keys().map(|c| c.as_str()).collect(),
            ReactionDirection::Reversible => self.all_compounds(),
        }
    }

    /// Two reactions describe the same chemistry if their compound sets match,
    /// in either orientation, regardless of their ids
    pub fn is_equivalent(&self, other: &Reaction) -> bool {
        let left: IndexSet<&String> = self.left.keys().collect();
        let right: IndexSet<&String> = self.right.keys().collect();
        let other_left: IndexSet<&String> = other.left.keys().collect();
        let other_right: IndexSet<&String> = other.right.keys().collect();
        (left == other_left && right == other_right) || (left == other_right && right == other_left)
    }
}

impl Display for Reaction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let side = |s: &IndexMap<String, f64>| {
            s.iter()
                .map(|(c, coef)| format!("({}) {}", coef, c))
                .collect::<Vec<_>>()
                .join(" + ")
        };
        write!(
            f,
            "{}: {} {} {}",
            self.id,
            side(&self.left),
            self.direction,
            side(&self.right)
        )
    }
}

/// Which way a reaction can carry flux
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReactionDirection {
    /// Left to right only, written `>`
    #[serde(rename = ">")]
    Forward,
    /// Right to left only, written `<`
    #[serde(rename = "<")]
    Reverse,
    /// Either way, written `=`
    #[serde(rename = "=")]
    Reversible,
    /// Direction was not annotated, written `?`
    #[serde(rename = "?")]
    Unknown,
}

impl Display for ReactionDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ReactionDirection::Forward => write!(f, "=>"),
            ReactionDirection::Reverse => write!(f, "<="),
            ReactionDirection::Reversible => write!(f, "<=>"),
            ReactionDirection::Unknown => write!(f, "<?>"),
        }
    }
}

/// Lower and upper bound on a reaction's flux
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FluxBounds {
    pub lower: f64,
    pub upper: f64,
}

impl FluxBounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        FluxBounds { lower, upper }
    }
}

impl From<(f64, f64)> for FluxBounds {
    fn from((lower, upper): (f64, f64)) -> Self {
        FluxBounds { lower, upper }
    }
}
