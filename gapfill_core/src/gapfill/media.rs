//! Reactions importing or using the compounds of the media
use indexmap::IndexSet;

use crate::metabolic_model::media::Media;
use crate::metabolic_model::store::ModelStore;

/// Reactions outside `current` which can consume a media compound
///
/// Compounds are matched to the media by id or name.
pub fn suggest_media(
    store: &ModelStore,
    current: &IndexSet<String>,
    media: &Media,
) -> IndexSet<String> {
    let in_media = |compound_id: &str| {
        media.contains(compound_id)
            || store
                .compound(compound_id)
                .is_some_and(|c| media.compounds.values().any(|m| m.matches(c)))
    };
    store
        .reactions
        .values()
        .filter(|r| !current.contains(&r.id))
        .filter(|r| r.consumed_compounds().into_iter().any(in_media))
        .map(|r| r.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metabolic_model::compound::{Compound, Location};
    use crate::test_fixtures::{ids, negative_media, positive_media, toy_store};

    #[test]
    fn importers_of_media_compounds() {
        let store = toy_store();
        assert_eq!(
            suggest_media(&store, &IndexSet::new(), &positive_media()),
            ids(&["R_tA"])
        );
        assert_eq!(
            suggest_media(&store, &ids(&["R_tA"]), &negative_media()),
            ids(&["R_tE"])
        );
        assert!(suggest_media(&store, &ids(&["R_tA"]), &positive_media()).is_empty());
    }

    #[test]
    fn matches_by_name() {
        let store = toy_store();
        let media = Media::from_compounds(
            "renamed",
            [Compound::new("cpd_a", "a_e", Some(Location::Extracellular))],
        );
        assert_eq!(suggest_media(&store, &IndexSet::new(), &media), ids(&["R_tA"]));
    }
}
