//! Provides the Media struct, the set of compounds available for uptake
use indexmap::IndexMap;

use crate::metabolic_model::compound::Compound;

/// A growth environment
#[derive(Clone, Debug, Default)]
pub struct Media {
    /// Name of the media, e.g. `ArgonneLB`
    pub name: String,
    /// Compounds available for uptake, keyed by compound id
    pub compounds: IndexMap<String, Compound>,
}

impl Media {
    pub fn new(name: &str) -> Self {
        Media {
            name: name.to_string(),
            compounds: IndexMap::new(),
        }
    }

    /// Create media from a collection of compounds
    pub fn from_compounds<I: IntoIterator<Item = Compound>>(name: &str, compounds: I) -> Self {
        Media {
            name: name.to_string(),
            compounds: compounds.into_iter().map(|c| (c.id.clone(), c)).collect(),
        }
    }

    pub fn add_compound(&mut self, compound: Compound) {
        self.compounds.insert(compound.id.clone(), compound);
    }

    /// Is the compound with this id available in the media
    pub fn contains(&self, compound_id: &str) -> bool {
        self.compounds.contains_key(compound_id)
    }

    pub fn len(&self) -> usize {
        self.compounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compounds.is_empty()
    }
}
