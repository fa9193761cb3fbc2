//! Reactions most of whose compounds are already part of the model
use indexmap::IndexSet;

use crate::gapfill::limit::compound_connections;
use crate::metabolic_model::media::Media;
use crate::metabolic_model::store::ModelStore;

/// Reactions outside `current` whose share of already present compounds beats the average
/// share among the working reactions
///
/// A compound is present for a candidate when a working reaction touches it or it is in
/// the media. For a working reaction it must be touched by another working reaction.
pub fn suggest_probable(
    store: &ModelStore,
    current: &IndexSet<String>,
    media: &Media,
    requires_proteins: bool,
) -> IndexSet<String> {
    let connections = compound_connections(store, current);
    let connected = |compound: &str, own: usize| {
        media.contains(compound) || connections.get(compound).copied().unwrap_or(0) > own
    };

    let shares: Vec<f64> = current
        .iter()
        .filter_map(|id| store.reaction(id))
        .filter_map(|r| {
            let compounds = r.all_compounds();
            (!compounds.is_empty()).then(|| {
                compounds.iter().filter(|c| connected(**c, 1)).count() as f64
                    / compounds.len() as f64
            })
        })
        .collect();
    let average = if shares.is_empty() {
        0.
    } else {
        shares.iter().sum::<f64>() / shares.len() as f64
    };
    log::debug!("Average share of connected compounds is {:.3}", average);

    store
        .reactions
        .values()
        .filter(|r| !current.contains(&r.id))
        .filter(|r| !requires_proteins || r.has_proteins())
        .filter(|r| {
            let compounds = r.all_compounds();
            !compounds.is_empty()
                && compounds.iter().filter(|c| connected(**c, 0)).count() as f64
                    / compounds.len() as f64
                    > average
        })
        .map(|r| r.id.clone())
        .collect()
}
