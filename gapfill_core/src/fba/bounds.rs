//! Flux bounds for reactions and compounds
use indexmap::IndexMap;

use crate::configuration::default_bounds;
use crate::metabolic_model::media::Media;
use crate::metabolic_model::reaction::{FluxBounds, Reaction, ReactionDirection};

/// Bounds to use for specific reactions in place of the computed ones, keyed by reaction id
pub type BoundsOverlay = IndexMap<String, FluxBounds>;

/// Flux bounds for a single reaction
///
/// In order of precedence: the overlay, the reaction's own explicit bounds, the media
/// (for uptake/secretion reactions), the biomass reaction, and finally the reaction
/// direction.
pub fn reaction_bounds(
    reaction: &Reaction,
    media: &Media,
    overlay: Option<&BoundsOverlay>,
) -> FluxBounds {
    if let Some(bounds) = overlay.and_then(|o| o.get(&reaction.id)) {
        return *bounds;
    }
    if let Some(bounds) = reaction.bounds {
        return bounds;
    }
    let (lower, upper) = default_bounds();
    if reaction.is_uptake_secretion {
        // Uptake is only possible for compounds in the media, anything can be secreted
        return if reaction.left.keys().any(|c| media.contains(c)) {
            FluxBounds::new(lower, upper)
        } else {
            FluxBounds::new(0., upper)
        };
    }
    if reaction.is_biomass {
        return FluxBounds::new(0., upper);
    }
    match reaction.direction {
        ReactionDirection::Reversible => FluxBounds::new(lower, upper),
        ReactionDirection::Forward => FluxBounds::new(0., upper),
        // TODO: confirm whether reverse only reactions should be capped at (lower, 0)
        ReactionDirection::Reverse => FluxBounds::new(lower, upper),
        ReactionDirection::Unknown => {
            log::warn!(
                "Reaction {} has no known direction, treating it as forward only",
                reaction.id
            );
            FluxBounds::new(0., upper)
        }
    }
}

/// Bounds for every reaction in column order, keyed by reaction id
pub fn assign_bounds<'r, I>(
    reactions: I,
    media: &Media,
    overlay: Option<&BoundsOverlay>,
) -> IndexMap<String, FluxBounds>
where
    I: IntoIterator<Item = &'r Reaction>,
{
    reactions
        .into_iter()
        .map(|r| (r.id.clone(), reaction_bounds(r, media, overlay)))
        .collect()
}

/// Mass balance, every compound is fixed at zero net flux
pub fn compound_bounds(compounds: &[String]) -> Vec<(f64, f64)> {
    vec![(0., 0.); compounds.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fba::boundary::uptake_and_secretion_reaction;
    use crate::metabolic_model::compound::{Compound, Location};
    use crate::test_fixtures::{positive_media, toy_biomass, toy_store};

    fn approx(bounds: FluxBounds, lower: f64, upper: f64) -> bool {
        (bounds.lower - lower).abs() < 1e-25 && (bounds.upper - upper).abs() < 1e-25
    }

    #[test]
    fn direction_bounds() {
        let store = toy_store();
        let media = positive_media();
        let mut reaction = store.reaction("R1").unwrap().clone();
        assert!(approx(reaction_bounds(&reaction, &media, None), 0., 1000.));
        reaction.direction = ReactionDirection::Reversible;
        assert!(approx(reaction_bounds(&reaction, &media, None), -1000., 1000.));
        reaction.direction = ReactionDirection::Reverse;
        assert!(approx(reaction_bounds(&reaction, &media, None), -1000., 1000.));
        reaction.direction = ReactionDirection::Unknown;
        assert!(approx(reaction_bounds(&reaction, &media, None), 0., 1000.));
    }

    #[test]
    fn biomass_bounds() {
        let mut biomass = toy_biomass();
        biomass.direction = ReactionDirection::Reversible;
        assert!(approx(
            reaction_bounds(&biomass, &positive_media(), None),
            0.,
            1000.
        ));
    }

    #[test]
    fn uptake_depends_on_media() {
        let media = positive_media();
        let in_media =
            uptake_and_secretion_reaction(&Compound::new("a_e", "a_e", Some(Location::Extracellular)));
        let not_in_media =
            uptake_and_secretion_reaction(&Compound::new("e_e", "e_e", Some(Location::Extracellular)));
        assert!(approx(reaction_bounds(&in_media, &media, None), -1000., 1000.));
        assert!(approx(reaction_bounds(&not_in_media, &media, None), 0., 1000.));
    }

    #[test]
    fn explicit_and_overlay_bounds() {
        let store = toy_store();
        let media = positive_media();
        let mut reaction = store.reaction("R1").unwrap().clone();
        reaction.bounds = Some(FluxBounds::new(2., 3.));
        assert!(approx(reaction_bounds(&reaction, &media, None), 2., 3.));

        let mut overlay = BoundsOverlay::new();
        overlay.insert("R1".to_string(), FluxBounds::new(0., 0.));
        assert!(approx(reaction_bounds(&reaction, &media, Some(&overlay)), 0., 0.));

        let all = assign_bounds([&reaction, store.reaction("R2").unwrap()], &media, Some(&overlay));
        assert_eq!(all.len(), 2);
        assert!(approx(all["R2"], 0., 1000.));
    }

    #[test]
    fn compounds_are_balanced() {
        let bounds = compound_bounds(&["a".to_string(), "b".to_string()]);
        assert_eq!(bounds, vec![(0., 0.), (0., 0.)]);
    }
}
