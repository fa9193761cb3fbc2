//! Gap-filling for growth on one medium while keeping the model from growing on another
use indexmap::IndexSet;

use crate::fba::growth::GrowthEvaluator;
use crate::gapfill::cascade::gapfill;
use crate::gapfill::{GapfillError, GapfillInputs, GapfillOutcome, GapfillSettings};
use crate::metabolic_model::media::Media;

/// Gap-fill `reactions` to grow on `positive` but not on `negative`
///
/// Whenever the gap-filled model also grows on `negative`, each added reaction whose
/// removal alone stops that growth is excluded, and the cascade runs again. Gives up with
/// [`GapfillOutcome::Unresolved`] after `settings.max_iterations` rounds, or as soon as a
/// round finds nothing new to exclude.
pub fn gapfill_two_media(
    evaluator: &mut GrowthEvaluator,
    reactions: &IndexSet<String>,
    positive: &Media,
    negative: &Media,
    inputs: &GapfillInputs,
    settings: &GapfillSettings,
) -> Result<GapfillOutcome, GapfillError> {
    let negative_boundary = evaluator.boundary_reactions(negative);
    if evaluator.grows(reactions, negative, Some(negative_boundary.as_slice()))? {
        return Err(GapfillError::NegativeMediumGrows(negative.name.clone()));
    }
    if evaluator.grows(reactions, positive, None)? {
        return Err(GapfillError::PositiveMediumGrows(positive.name.clone()));
    }

    let mut inputs = inputs.clone();
    let mut partial = None;
    for iteration in 1..=settings.max_iterations {
        let model = match gapfill(evaluator, reactions, positive, &inputs, settings)? {
            GapfillOutcome::Success(model) => model,
            other => return Ok(other),
        };
        let gapfilled = model.reactions();
        if !evaluator.grows(&gapfilled, negative, Some(negative_boundary.as_slice()))? {
            log::info!(
                "Grows on {} and not on {} after {} iterations",
                positive.name,
                negative.name,
                iteration
            );
            return Ok(GapfillOutcome::Success(model));
        }

        let mut newly_excluded = IndexSet::new();
        for reaction in model.added() {
            let mut without = gapfilled.clone();
            without.shift_remove(&reaction);
            if !evaluator.grows(&without, negative, Some(negative_boundary.as_slice()))? {
                newly_excluded.insert(reaction);
            }
        }
        log::info!(
            "Iteration {}: also grows on {}, excluding {} reactions",
            iteration,
            negative.name,
            newly_excluded.len()
        );
        partial = Some(model);
        if newly_excluded.is_empty() {
            log::warn!(
                "No single gap-filled reaction stops growth on {}",
                negative.name
            );
            break;
        }
        inputs.excluded.extend(newly_excluded);
    }

    match partial {
        Some(partial) => Ok(GapfillOutcome::Unresolved {
            partial,
            excluded: inputs.excluded,
        }),
        None => Ok(GapfillOutcome::Exhausted {
            attempted: Vec::new(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gapfill::cascade::CascadeStep;
    use crate::gapfill::{GapfillInputsBuilder, GapfillRecord, GapfillSettingsBuilder};
    use crate::test_fixtures::{ids, negative_media, positive_media, toy_biomass, toy_store};

    /// Both media reach k_c, RK would feed b_c from either
    fn starting_reactions() -> IndexSet<String> {
        ids(&["R_tA", "R_tE", "RA", "RE", "R2", "R3"])
    }

    fn inputs() -> GapfillInputs {
        GapfillInputsBuilder::default()
            .essential(ids(&["RK"]))
            .build()
            .unwrap()
    }

    #[test]
    fn excludes_the_overfilling_reaction() {
        let store = toy_store();
        let biomass = toy_biomass();
        let mut evaluator = GrowthEvaluator::new(&store, &biomass).unwrap();
        let outcome = gapfill_two_media(
            &mut evaluator,
            &starting_reactions(),
            &positive_media(),
            &negative_media(),
            &inputs(),
            &GapfillSettings::default(),
        )
        .unwrap();
        let model = outcome.model().unwrap();
        assert_eq!(
            model.record,
            vec![GapfillRecord::new(CascadeStep::Linked, ids(&["R1"]))]
        );
        let reactions = model.reactions();
        assert!(evaluator.grows(&reactions, &positive_media(), None).unwrap());
        assert!(!evaluator.grows(&reactions, &negative_media(), None).unwrap());
    }

    #[test]
    fn unresolved_without_iterations_left() {
        let store = toy_store();
        let biomass = toy_biomass();
        let mut evaluator = GrowthEvaluator::new(&store, &biomass).unwrap();
        let settings = GapfillSettingsBuilder::default()
            .max_iterations(1)
            .build()
            .unwrap();
        let outcome = gapfill_two_media(
            &mut evaluator,
            &starting_reactions(),
            &positive_media(),
            &negative_media(),
            &inputs(),
            &settings,
        )
        .unwrap();
        match outcome {
            GapfillOutcome::Unresolved { partial, excluded } => {
                assert_eq!(excluded, ids(&["RK"]));
                assert_eq!(partial.added(), ids(&["RK"]));
            }
            other => panic!("Expected an unresolved outcome, got {:?}", other),
        }
    }

    #[test]
    fn preconditions() {
        let store = toy_store();
        let biomass = toy_biomass();
        let mut evaluator = GrowthEvaluator::new(&store, &biomass).unwrap();
        let settings = GapfillSettings::default();
        let grows_on_both = ids(&["R_tA", "R_tE", "RA", "RE", "RK", "R2", "R3"]);
        assert_eq!(
            gapfill_two_media(
                &mut evaluator,
                &grows_on_both,
                &positive_media(),
                &negative_media(),
                &inputs(),
                &settings
            ),
            Err(GapfillError::NegativeMediumGrows("E_only".to_string()))
        );
        assert_eq!(
            gapfill_two_media(
                &mut evaluator,
                &ids(&["R_tA", "R1", "R2", "R3"]),
                &positive_media(),
                &negative_media(),
                &inputs(),
                &settings
            ),
            Err(GapfillError::PositiveMediumGrows("A_only".to_string()))
        );
    }
}
