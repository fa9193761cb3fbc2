//! Last resort strategies: every reaction with, and then without, a known enzyme
use indexmap::IndexSet;

use crate::gapfill::limit::limit_reactions_by_compound;
use crate::metabolic_model::store::ModelStore;

/// Every reaction outside `current` which has an enzyme
pub fn suggest_with_proteins(store: &ModelStore, current: &IndexSet<String>) -> IndexSet<String> {
    store
        .reactions
        .values()
        .filter(|r| !current.contains(&r.id) && r.has_proteins())
        .map(|r| r.id.clone())
        .collect()
}

/// Every reaction outside `current` without an enzyme, restricted to those whose compounds
/// are touched by at most `max_connections` reactions of `current`
pub fn suggest_without_proteins(
    store: &ModelStore,
    current: &IndexSet<String>,
    max_connections: usize,
) -> IndexSet<String> {
    let candidates: IndexSet<String> = store
        .reactions
        .values()
        .filter(|r| !current.contains(&r.id) && !r.has_proteins())
        .map(|r| r.id.clone())
        .collect();
    limit_reactions_by_compound(store, current, &candidates, max_connections)
}
