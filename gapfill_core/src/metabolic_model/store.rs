//! This module provides the ModelStore struct, an in memory biochemistry database
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::metabolic_model::compound::Compound;
use crate::metabolic_model::reaction::Reaction;

/// Compounds, reactions, and the enzyme complexes connecting functional roles to reactions
#[derive(Clone, Debug, Default)]
pub struct ModelStore {
    /// Map of compound ids to compounds
    pub compounds: IndexMap<String, Compound>,
    /// Map of reaction ids to reactions
    pub reactions: IndexMap<String, Reaction>,
    /// Map of complex ids to enzyme complexes
    pub complexes: IndexMap<String, Complex>,
}

/// An enzyme complex, made of proteins with the given functional roles, which catalyzes
/// a set of reactions
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Complex {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Functional roles of the proteins making up the complex
    #[serde(default)]
    pub roles: IndexSet<String>,
    /// Reactions the complex catalyzes
    #[serde(default)]
    pub reactions: IndexSet<String>,
}

impl ModelStore {
    pub fn new_empty() -> Self {
        ModelStore::default()
    }

    /// Add a compound to the store, replacing any compound with the same id
    pub fn add_compound(&mut self, mut compound: Compound) {
        if let Some(existing) = self.compounds.get(&compound.id) {
            compound.reactions.extend(existing.reactions.iter().cloned());
        }
        self.compounds.insert(compound.id.clone(), compound);
    }

    /// Add a reaction to the store
    ///
    /// The compounds of the reaction get a back reference to it, and any complex already
    /// in the store which catalyzes it is recorded as one of its enzymes.
    pub fn add_reaction(&mut self, mut reaction: Reaction) {
        for compound_id in reaction.all_compounds() {
            match self.compounds.get_mut(compound_id) {
                Some(compound) => {
                    compound.reactions.insert(reaction.id.clone());
                }
                None => log::warn!(
                    "Reaction {} uses compound {} which is not in the store",
                    reaction.id,
                    compound_id
                ),
            }
        }
        for complex in self.complexes.values() {
            if complex.reactions.contains(&reaction.id) {
                reaction.enzymes.insert(complex.id.clone());
            }
        }
        self.reactions.insert(reaction.id.clone(), reaction);
    }

    /// Add an enzyme complex, marking each reaction it catalyzes as having a protein
    pub fn add_complex(&mut self, complex: Complex) {
        for reaction_id in &complex.reactions {
            if let Some(reaction) = self.reactions.get_mut(reaction_id) {
                reaction.enzymes.insert(complex.id.clone());
            }
        }
        self.complexes.insert(complex.id.clone(), complex);
    }

    pub fn reaction(&self, id: &str) -> Option<&Reaction> {
        self.reactions.get(id)
    }

    pub fn compound(&self, id: &str) -> Option<&Compound> {
        self.compounds.get(id)
    }

    /// Find a compound by its human-readable name
    pub fn compound_by_name(&self, name: &str) -> Option<&Compound> {
        self.compounds.values().find(|c| c.name == name)
    }

    /// Keep only the reaction ids which exist in the store, warning about the rest
    pub fn known_reactions<'a, I>(&self, ids: I) -> IndexSet<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        ids.into_iter()
            .filter(|id| {
                let known = self.reactions.contains_key(id.as_str());
                if !known {
                    log::warn!("Reaction {} is not in the store, it will be ignored", id);
                }
                known
            })
            .cloned()
            .collect()
    }

    /// Reactions catalyzed by a complex carrying the given functional role
    pub fn reactions_for_role(&self, role: &str) -> IndexSet<String> {
        self.complexes
            .values()
            .filter(|c| c.roles.contains(role))
            .flat_map(|c| c.reactions.iter())
            .filter(|r| self.reactions.contains_key(r.as_str()))
            .cloned()
            .collect()
    }

    /// Functional roles of the complexes catalyzing any of the given reactions
    pub fn roles_for_reactions(&self, reaction_ids: &IndexSet<String>) -> IndexSet<String> {
        self.complexes
            .values()
            .filter(|c| c.reactions.iter().any(|r| reaction_ids.contains(r)))
            .flat_map(|c| c.roles.iter())
            .cloned()
            .collect()
    }

    /// Reactions annotated with the given EC number
    pub fn reactions_with_ec(&self, ec_number: &str) -> IndexSet<String> {
        self.reactions
            .values()
            .filter(|r| r.ec_numbers.iter().any(|ec| ec == ec_number))
            .map(|r| r.id.clone())
            .collect()
    }

    /// Find a registered reaction with the same chemistry as `reaction`, under a different id
    pub fn find_equivalent(&self, reaction: &Reaction) -> Option<&Reaction> {
        self.reactions
            .values()
            .find(|r| r.id != reaction.id && r.is_equivalent(reaction))
    }

    /// Clear the explicit bounds of every reaction
    pub fn reset_bounds(&mut self) {
        self.reactions.values_mut().for_each(|r| r.bounds = None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metabolic_model::reaction::FluxBounds;
    use crate::test_fixtures::toy_store;

    #[test]
    fn back_references() {
        let store = toy_store();
        let b = store.compound("b_c").unwrap();
        assert!(b.reactions.contains("R1"));
        assert!(b.reactions.contains("R2"));
        assert!(b.reactions.contains("R3"));
        assert!(!b.reactions.contains("R_tA"));
    }

    #[test]
    fn known_reactions_drops_unknown() {
        let store = toy_store();
        let ids: IndexSet<String> = ["R1", "not_a_reaction", "R2"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let known = store.known_reactions(&ids);
        assert_eq!(known.len(), 2);
        assert!(!known.contains("not_a_reaction"));
    }

    #[test]
    fn roles_and_complexes() {
        let store = toy_store();
        let reactions = store.reactions_for_role("Branch enzyme C (EC 1.1.1.3)");
        assert_eq!(reactions, IndexSet::from(["R2".to_string()]));
        assert!(store.reaction("R2").unwrap().has_proteins());
        assert!(!store.reaction("Z1").unwrap().has_proteins());
        let roles = store.roles_for_reactions(&IndexSet::from(["R1".to_string()]));
        assert!(roles.contains("A to B converter (EC 1.1.1.1)"));
    }

    #[test]
    fn reset_bounds() {
        let mut store = toy_store();
        store.reactions.get_mut("R1").unwrap().bounds = Some(FluxBounds::new(0., 5.));
        store.reset_bounds();
        assert!(store.reactions.values().all(|r| r.bounds.is_none()));
    }

    #[test]
    fn equivalent_reaction_lookup() {
        let store = toy_store();
        let mut copy = store.reaction("R2").unwrap().clone();
        copy.id = "R2_duplicate".to_string();
        assert_eq!(store.find_equivalent(&copy).unwrap().id, "R2");
    }
}
