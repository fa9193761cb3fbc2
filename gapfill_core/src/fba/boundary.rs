//! Uptake and secretion reactions, letting compounds cross the edge of the system
use indexmap::IndexSet;

use crate::metabolic_model::compound::Compound;
use crate::metabolic_model::media::Media;
use crate::metabolic_model::reaction::{Reaction, ReactionBuilder, ReactionDirection};
use crate::metabolic_model::store::ModelStore;

/// Prefix of the id of every uptake/secretion reaction, followed by the compound id
pub const UPTAKE_SECRETION_PREFIX: &str = "UPTAKE_SECRETION_REACTION ";

/// The uptake/secretion reaction for a single compound
///
/// Only the substrate side is populated, positive flux removes the compound from the
/// system and negative flux brings it in.
pub fn uptake_and_secretion_reaction(compound: &Compound) -> Reaction {
    let mut reaction = Reaction {
        id: format!("{}{}", UPTAKE_SECRETION_PREFIX, compound.id),
        name: Some(format!("Uptake and secretion of {}", compound)),
        direction: ReactionDirection::Reversible,
        left: Default::default(),
        right: Default::default(),
        bounds: None,
        is_transport: false,
        is_uptake_secretion: true,
        is_biomass: false,
        ec_numbers: Vec::new(),
        enzymes: Default::default(),
        linked: Default::default(),
    };
    reaction.left.insert(compound.id.clone(), 1.);
    reaction
}

/// One uptake/secretion reaction for each boundary eligible compound, ordered by compound id
pub fn uptake_and_secretion_reactions<'a, I>(compounds: I) -> Vec<Reaction>
where
    I: IntoIterator<Item = &'a Compound>,
{
    let mut eligible: Vec<&Compound> = compounds
        .into_iter()
        .filter(|c| c.is_boundary_eligible())
        .collect();
    eligible.sort();
    eligible.dedup_by(|a, b| a.id == b.id);
    eligible
        .into_iter()
        .map(uptake_and_secretion_reaction)
        .collect()
}

/// Look a compound up in the store, falling back to the media
pub(crate) fn find_compound<'a>(
    store: &'a ModelStore,
    media: &'a Media,
    compound_id: &str,
) -> Option<&'a Compound> {
    store
        .compound(compound_id)
        .or_else(|| media.compounds.get(compound_id))
}

/// Uptake/secretion reactions for every compound touched by the given reactions, the
/// media, or the biomass reaction
pub fn boundary_reactions_for(
    store: &ModelStore,
    reaction_ids: &IndexSet<String>,
    media: &Media,
    biomass: &Reaction,
) -> Vec<Reaction> {
    let mut compound_ids: IndexSet<&str> = reaction_ids
        .iter()
        .filter_map(|id| store.reaction(id))
        .flat_map(|r| r.all_compounds())
        .collect();
    compound_ids.extend(media.compounds.keys().map(|c| c.as_str()));
    compound_ids.extend(biomass.all_compounds());
    uptake_and_secretion_reactions(
        compound_ids
            .into_iter()
            .filter_map(|id| find_compound(store, media, id)),
    )
}

/// Uptake/secretion reactions for every compound in the store, the media, and the
/// biomass reaction
///
/// Computing this once and passing it to
/// [`crate::fba::growth::GrowthEvaluator::evaluate_with_boundary`] avoids recomputing the
/// boundary on every evaluation.
pub fn boundary_reactions_for_store(
    store: &ModelStore,
    media: &Media,
    biomass: &Reaction,
) -> Vec<Reaction> {
    let all_reactions: IndexSet<String> = store.reactions.keys().cloned().collect();
    boundary_reactions_for(store, &all_reactions, media, biomass)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{ids, positive_media, toy_biomass, toy_store};

    #[test]
    fn only_eligible_compounds() {
        let store = toy_store();
        let boundary = boundary_reactions_for(
            &store,
            &ids(&["R_tA", "R1", "R2"]),
            &positive_media(),
            &toy_biomass(),
        );
        let reaction_ids: Vec<&str> = boundary.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            reaction_ids,
            vec![
                "UPTAKE_SECRETION_REACTION Biomass",
                "UPTAKE_SECRETION_REACTION a_e"
            ]
        );
        let uptake = &boundary[1];
        assert!(uptake.is_uptake_secretion);
        assert!(uptake.right.is_empty());
        assert!((uptake.left["a_e"] - 1.).abs() < 1e-25);
    }

    #[test]
    fn whole_store() {
        let store = toy_store();
        let boundary = boundary_reactions_for_store(&store, &positive_media(), &toy_biomass());
        // a_e, e_e and the biomass marker
        assert_eq!(boundary.len(), 3);
    }
}
