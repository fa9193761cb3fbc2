//! This module provides the compound struct representing a metabolite in a given location

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::Hash;

use derive_builder::Builder;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Represents a compound
///
/// Compound ids are unique within a [`crate::metabolic_model::store::ModelStore`], so the
/// same chemical in two locations is two compounds (e.g. `cpd00027_c` and `cpd00027_e`).
/// `PartialEq`, `Hash` and `Ord` all use the id, [`Compound::matches`] provides the looser
/// id-or-name comparison.
#[derive(Builder, Debug, Clone, Serialize, Deserialize)]
pub struct Compound {
    /// Used to identify the compound (must be unique)
    #[builder(setter(into))]
    pub id: String,
    /// Human readable name of the compound
    #[builder(setter(into))]
    pub name: String,
    /// Where the compound is found
    #[builder(default = "None")]
    pub location: Option<Location>,
    /// Ids of the reactions this compound takes part in
    #[builder(default = "IndexSet::new()")]
    #[serde(default)]
    pub reactions: IndexSet<String>,
    /// Molecular weight
    #[builder(default = "None")]
    #[serde(default)]
    pub molecular_weight: Option<f64>,
    /// Electrical charge of the compound
    #[builder(default = "None")]
    #[serde(default)]
    pub charge: Option<i32>,
    /// Alternate identifiers from other databases
    #[builder(default = "Vec::new()")]
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl Compound {
    /// Create a compound with just an identity
    pub fn new(id: &str, name: &str, location: Option<Location>) -> Self {
        Compound {
            id: id.to_string(),
            name: name.to_string(),
            location,
            reactions: IndexSet::new(),
            molecular_weight: None,
            charge: None,
            aliases: Vec::new(),
        }
    }

    /// True if either the id or the name of the two compounds agree
    ///
    /// This is the equality used when comparing compounds across media and reactions.
    /// `==` compares ids only, so it stays consistent with `Hash`.
    pub fn matches(&self, other: &Compound) -> bool {
        self.id == other.id || self.name == other.name
    }

    /// Like [`Compound::matches`], but the locations must also agree
    pub fn matches_in_location(&self, other: &Compound) -> bool {
        self.matches(other) && self.location == other.location
    }

    /// Whether this compound sits at the edge of the system, and so can be given an
    /// uptake/secretion reaction
    pub fn is_boundary_eligible(&self) -> bool {
        matches!(
            self.location,
            Some(Location::Extracellular) | Some(Location::Boundary)
        )
    }
}

/// Identity by id, see [`Compound::matches`] for the id or name equality
impl PartialEq for Compound {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Compound {}

impl Hash for Compound {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl PartialOrd for Compound {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Compound {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Display for Compound {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{} ({})", self.name, location),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Where a compound is found
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// Inside the cell
    Cytoplasm,
    /// Outside the cell, available to transporters
    Extracellular,
    /// The edge of the modeled system, e.g. the biomass marker
    Boundary,
    /// Any other compartment
    Other,
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Cytoplasm => write!(f, "c"),
            Location::Extracellular => write!(f, "e"),
            Location::Boundary => write!(f, "b"),
            Location::Other => write!(f, "o"),
        }
    }
}
