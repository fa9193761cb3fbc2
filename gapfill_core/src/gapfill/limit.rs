//! Restricting candidate reactions to compounds which are not already hubs
use indexmap::{IndexMap, IndexSet};

use crate::metabolic_model::store::ModelStore;

/// Number of `reactions` touching each compound
pub fn compound_connections(
    store: &ModelStore,
    reactions: &IndexSet<String>,
) -> IndexMap<String, usize> {
    let mut connections: IndexMap<String, usize> = IndexMap::new();
    for reaction in reactions.iter().filter_map(|id| store.reaction(id)) {
        for compound in reaction.all_compounds() {
            *connections.entry(compound.to_string()).or_insert(0) += 1;
        }
    }
    connections
}

/// Keep the candidates whose compounds are each touched by at most `max_connections`
/// reactions of `base`
///
/// Compounds used by many base reactions (water, ATP, protons and the like) are usually
/// not the bottleneck, so candidates which mostly shuffle them are unlikely to matter.
pub fn limit_reactions_by_compound(
    store: &ModelStore,
    base: &IndexSet<String>,
    candidates: &IndexSet<String>,
    max_connections: usize,
) -> IndexSet<String> {
    let connections = compound_connections(store, base);
    candidates
        .iter()
        .filter(|id| match store.reaction(id) {
            Some(reaction) => reaction
                .all_compounds()
                .iter()
                .all(|c| connections.get(*c).copied().unwrap_or(0) <= max_connections),
            None => false,
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{ids, toy_store};

    #[test]
    fn counts_connections() {
        let store = toy_store();
        let connections = compound_connections(&store, &ids(&["R1", "R2", "R3", "RK"]));
        assert_eq!(connections["b_c"], 4);
        assert_eq!(connections["a_c"], 1);
        assert!(!connections.contains_key("e_c"));
    }

    #[test]
    fn drops_hub_reactions() {
        let store = toy_store();
        let base = ids(&["R1", "R2", "R3"]);
        let candidates = ids(&["RK", "RE1", "RA", "Z1", "missing"]);
        // b_c is used by three base reactions
        assert_eq!(
            limit_reactions_by_compound(&store, &base, &candidates, 2),
            ids(&["RA", "Z1"])
        );
        assert_eq!(
            limit_reactions_by_compound(&store, &base, &candidates, 3),
            ids(&["RK", "RE1", "RA", "Z1"])
        );
    }
}
