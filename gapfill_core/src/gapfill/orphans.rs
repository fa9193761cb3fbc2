//! Connecting dead-end compounds
use indexmap::IndexSet;

use crate::gapfill::limit::compound_connections;
use crate::metabolic_model::store::ModelStore;

/// Reactions outside `current` touching a compound used by at most `max_connections`
/// working reactions
pub fn suggest_orphans(
    store: &ModelStore,
    current: &IndexSet<String>,
    max_connections: usize,
) -> IndexSet<String> {
    compound_connections(store, current)
        .into_iter()
        .filter(|(_, count)| *count <= max_connections)
        .filter_map(|(compound, _)| store.compound(&compound))
        .flat_map(|compound| compound.reactions.iter())
        .filter(|r| !current.contains(*r) && store.reactions.contains_key(r.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{ids, toy_store};

    #[test]
    fn dead_ends_get_connected() {
        let store = toy_store();
        // a_e and b_c are only touched once
        assert_eq!(
            suggest_orphans(&store, &ids(&["R_tA", "R1"]), 1),
            ids(&["R2", "R3", "RE1", "RK"])
        );
        assert!(suggest_orphans(&store, &ids(&["R_tA", "R1"]), 0).is_empty());
        assert!(suggest_orphans(&store, &IndexSet::new(), 1).is_empty());
    }
}
