//! Reactions annotated as linked to reactions already in the model
use indexmap::IndexSet;

use crate::metabolic_model::store::ModelStore;

/// Reactions linked to any reaction in `current` which are not in it yet
pub fn suggest_linked(store: &ModelStore, current: &IndexSet<String>) -> IndexSet<String> {
    current
        .iter()
        .filter_map(|id| store.reaction(id))
        .flat_map(|r| r.linked.iter())
        .filter(|id| !current.contains(*id))
        .filter(|id| {
            let known = store.reactions.contains_key(id.as_str());
            if !known {
                log::debug!("Linked reaction {} is not in the store", id);
            }
            known
        })
        .cloned()
        .collect()
}
