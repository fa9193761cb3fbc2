//! Reactions implied by roles seen in phylogenetically close organisms
use indexmap::{IndexMap, IndexSet};

use crate::metabolic_model::store::ModelStore;

/// Reactions for every role with a probability above `threshold`, outside `current`
pub fn suggest_from_role_probabilities(
    store: &ModelStore,
    current: &IndexSet<String>,
    role_probabilities: &IndexMap<String, f64>,
    threshold: f64,
) -> IndexSet<String> {
    let mut suggested = IndexSet::new();
    for (role, probability) in role_probabilities {
        if *probability <= threshold {
            continue;
        }
        let reactions = store.reactions_for_role(role);
        if reactions.is_empty() {
            log::debug!("No reactions are known for role {}", role);
        }
        suggested.extend(reactions.into_iter().filter(|r| !current.contains(r)));
    }
    suggested
}

/// Reactions for roles found in close organisms
pub fn suggest_close_organisms(
    store: &ModelStore,
    current: &IndexSet<String>,
    role_probabilities: &IndexMap<String, f64>,
    threshold: f64,
) -> IndexSet<String> {
    suggest_from_role_probabilities(store, current, role_probabilities, threshold)
}

/// Reactions for roles found in close genera
pub fn suggest_close_genera(
    store: &ModelStore,
    current: &IndexSet<String>,
    role_probabilities: &IndexMap<String, f64>,
    threshold: f64,
) -> IndexSet<String> {
    suggest_from_role_probabilities(store, current, role_probabilities, threshold)
}
