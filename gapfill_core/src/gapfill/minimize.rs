//! Shrinking a set of reactions which completes growth to a locally minimal one
//!
//! Candidates are bisected by alternating index, so reactions which arrive clustered
//! (all from one pathway, say) end up spread across both halves. When neither half works
//! on its own the candidates are split unevenly, and when that fails too they are
//! reshuffled and bisected again, a bounded number of times.
use indexmap::IndexSet;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::fba::growth::GrowthEvaluator;
use crate::gapfill::limit::limit_reactions_by_compound;
use crate::gapfill::{GapfillError, GapfillSettings};
use crate::metabolic_model::media::Media;
use crate::metabolic_model::reaction::Reaction;

/// Share of the candidates in the smaller part of the first uneven split, halved on each
/// following split
const UNEVEN_SHARE: f64 = 0.4;

/// Decides whether a subset of the candidates is good enough to keep
pub(crate) trait SubsetCriterion {
    type Score;

    /// The score of the subset if it satisfies the criterion
    fn score(&mut self, subset: &[String]) -> Result<Option<Self::Score>, GapfillError>;

    /// Score both halves of a bisection, rather than stopping at the first which
    /// satisfies the criterion
    fn compares_halves(&self) -> bool {
        false
    }

    /// Whether the right half should be kept over the left when both satisfy the
    /// criterion
    fn prefers_right(&self, _left: &Self::Score, _right: &Self::Score) -> bool {
        false
    }
}

/// Bisect `candidates` until no smaller part satisfies `criterion`
///
/// `candidates` as a whole is assumed to satisfy it.
pub(crate) fn bisect<C: SubsetCriterion>(
    criterion: &mut C,
    mut candidates: Vec<String>,
    max_retries: usize,
    seed: u64,
) -> Result<Vec<String>, GapfillError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut retries = 0;
    while candidates.len() > 1 {
        match reduce(criterion, &candidates)? {
            Some(smaller) => {
                log::debug!(
                    "Reduced {} candidates to {}",
                    candidates.len(),
                    smaller.len()
                );
                candidates = smaller;
            }
            None if retries < max_retries => {
                retries += 1;
                log::debug!(
                    "No part of {} candidates works alone, reshuffling ({}/{})",
                    candidates.len(),
                    retries,
                    max_retries
                );
                candidates.shuffle(&mut rng);
            }
            None => {
                log::debug!(
                    "Keeping {} candidates after {} reshuffles",
                    candidates.len(),
                    retries
                );
                break;
            }
        }
    }
    Ok(candidates)
}

/// One step of the search: a strictly smaller part of `candidates` satisfying the
/// criterion, if one is found
pub(crate) fn reduce<C: SubsetCriterion>(
    criterion: &mut C,
    candidates: &[String],
) -> Result<Option<Vec<String>>, GapfillError> {
    let (left, right): (Vec<_>, Vec<_>) = candidates
        .iter()
        .cloned()
        .enumerate()
        .partition(|(i, _)| i % 2 == 0);
    let left: Vec<String> = left.into_iter().map(|(_, r)| r).collect();
    let right: Vec<String> = right.into_iter().map(|(_, r)| r).collect();

    if criterion.compares_halves() {
        let left_score = criterion.score(&left)?;
        let right_score = criterion.score(&right)?;
        match (left_score, right_score) {
            (Some(l), Some(r)) if criterion.prefers_right(&l, &r) => return Ok(Some(right)),
            (Some(_), _) => return Ok(Some(left)),
            (None, Some(_)) => return Ok(Some(right)),
            (None, None) => {}
        }
    } else {
        if criterion.score(&left)?.is_some() {
            return Ok(Some(left));
        }
        if criterion.score(&right)?.is_some() {
            return Ok(Some(right));
        }
    }

    let mut share = UNEVEN_SHARE;
    loop {
        let minority_size = (candidates.len() as f64 * share).floor() as usize;
        if minority_size == 0 {
            return Ok(None);
        }
        let (minority, majority) = candidates.split_at(minority_size);
        if criterion.score(minority)?.is_some() {
            return Ok(Some(minority.to_vec()));
        }
        if criterion.score(majority)?.is_some() {
            return Ok(Some(majority.to_vec()));
        }
        share /= 2.;
    }
}

/// Growth of the base reactions together with a subset
struct GrowthCriterion<'e, 'a, 'b> {
    evaluator: &'e mut GrowthEvaluator<'a>,
    base: &'b IndexSet<String>,
    media: &'b Media,
    boundary: &'b [Reaction],
}

impl GrowthCriterion<'_, '_, '_> {
    fn grows(&mut self, subset: &[String]) -> Result<Option<f64>, GapfillError> {
        let mut reactions = self.base.clone();
        reactions.extend(subset.iter().cloned());
        let result =
            self.evaluator
                .evaluate_with_boundary(&reactions, self.media, Some(self.boundary))?;
        Ok(result.grew.then_some(result.objective_value))
    }
}

impl SubsetCriterion for GrowthCriterion<'_, '_, '_> {
    type Score = f64;

    fn score(&mut self, subset: &[String]) -> Result<Option<f64>, GapfillError> {
        self.grows(subset)
    }
}

/// Drop the candidates touching compounds which `max_connections` base reactions already
/// use, as long as the rest still grows
fn limit_candidates(
    criterion: &mut GrowthCriterion,
    candidates: Vec<String>,
    max_connections: usize,
) -> Result<Vec<String>, GapfillError> {
    let candidate_set: IndexSet<String> = candidates.iter().cloned().collect();
    let limited = limit_reactions_by_compound(
        criterion.evaluator.store(),
        criterion.base,
        &candidate_set,
        max_connections,
    );
    if limited.is_empty() || limited.len() >= candidates.len() {
        return Ok(candidates);
    }
    let limited: Vec<String> = limited.into_iter().collect();
    if criterion.grows(&limited)?.is_none() {
        return Ok(candidates);
    }
    log::debug!(
        "Limiting by compound connections cut {} candidates to {}",
        candidates.len(),
        limited.len()
    );
    Ok(limited)
}

/// Find a small subset of `optional` which, together with `base`, grows on `media`
///
/// `base` alone must not grow and `base` with all of `optional` must. The result is
/// locally minimal: a single reaction is always required, a larger result could not be
/// split further within the retry budget.
pub fn minimize_reactions(
    evaluator: &mut GrowthEvaluator,
    base: &IndexSet<String>,
    optional: &IndexSet<String>,
    media: &Media,
    settings: &GapfillSettings,
) -> Result<IndexSet<String>, GapfillError> {
    let boundary = evaluator.boundary_reactions(media);
    minimize_reactions_with_boundary(evaluator, base, optional, media, &boundary, settings)
}

/// [`minimize_reactions`] with precomputed uptake/secretion reactions
pub fn minimize_reactions_with_boundary(
    evaluator: &mut GrowthEvaluator,
    base: &IndexSet<String>,
    optional: &IndexSet<String>,
    media: &Media,
    boundary: &[Reaction],
    settings: &GapfillSettings,
) -> Result<IndexSet<String>, GapfillError> {
    let mut criterion = GrowthCriterion {
        evaluator,
        base,
        media,
        boundary,
    };
    if criterion.grows(&[])?.is_some() {
        return Err(GapfillError::BaseAlreadyGrows(base.len()));
    }
    let candidates: Vec<String> = optional
        .iter()
        .filter(|r| !base.contains(*r))
        .cloned()
        .collect();
    if criterion.grows(&candidates)?.is_none() {
        return Err(GapfillError::OptionalDoesNotGrow(candidates.len()));
    }

    let candidates = limit_candidates(&mut criterion, candidates, settings.limit_max_connections)?;

    let total = candidates.len();
    let minimal = bisect(&mut criterion, candidates, settings.max_retries, settings.seed)?;
    log::info!("Minimized {} reactions to {}", total, minimal.len());
    Ok(minimal.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gapfill::GapfillSettingsBuilder;
    use crate::test_fixtures::{ids, positive_media, toy_biomass, toy_store};

    /// Satisfied by any subset containing all of the required ids
    struct Requires {
        required: Vec<&'static str>,
        calls: usize,
    }

    impl SubsetCriterion for Requires {
        type Score = f64;

        fn score(&mut self, subset: &[String]) -> Result<Option<f64>, GapfillError> {
            self.calls += 1;
            let ok = self
                .required
                .iter()
                .all(|r| subset.iter().any(|s| s == r));
            Ok(ok.then_some(1.))
        }
    }

    fn letters(n: usize) -> Vec<String> {
        (0..n).map(|i| ((b'a' + i as u8) as char).to_string()).collect()
    }

    #[test]
    fn bisect_to_single_reaction() {
        let mut criterion = Requires {
            required: vec!["f"],
            calls: 0,
        };
        let result = bisect(&mut criterion, letters(12), 5, 42).unwrap();
        assert_eq!(result, vec!["f"]);
    }

    #[test]
    fn bisect_to_pair() {
        let mut criterion = Requires {
            required: vec!["b", "f"],
            calls: 0,
        };
        let result = bisect(&mut criterion, letters(8), 5, 42).unwrap();
        let result: IndexSet<String> = result.into_iter().collect();
        assert_eq!(result, ids(&["b", "f"]));
    }

    #[test]
    fn bisect_gives_up_after_retries() {
        let mut criterion = Requires {
            required: vec!["a", "b"],
            calls: 0,
        };
        let result = bisect(&mut criterion, letters(2), 3, 42).unwrap();
        assert_eq!(result.len(), 2);
        // Two halves per attempt, the uneven split of two is empty
        assert_eq!(criterion.calls, 8);
    }

    #[test]
    fn bisect_is_reproducible() {
        let run = || {
            let mut criterion = Requires {
                required: vec!["c", "d", "h"],
                calls: 0,
            };
            bisect(&mut criterion, letters(16), 5, 7).unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn singleton_result_is_required() {
        let store = toy_store();
        let biomass = toy_biomass();
        let media = positive_media();
        let mut evaluator = GrowthEvaluator::new(&store, &biomass).unwrap();
        let base = ids(&["R_tA", "R1", "R3"]);
        let minimal = minimize_reactions(
            &mut evaluator,
            &base,
            &ids(&["R2", "Z1", "Z2", "Z3"]),
            &media,
            &GapfillSettings::default(),
        )
        .unwrap();
        assert_eq!(minimal, ids(&["R2"]));
        assert!(!evaluator.grows(&base, &media, None).unwrap());
        let mut grown = base.clone();
        grown.extend(minimal);
        assert!(evaluator.grows(&grown, &media, None).unwrap());
    }

    #[test]
    fn uneven_split_finds_pair() {
        let store = toy_store();
        let biomass = toy_biomass();
        let mut evaluator = GrowthEvaluator::new(&store, &biomass).unwrap();
        let optional = ids(&["R2", "R3", "Z1", "Z2", "Z3"]);
        let minimal = minimize_reactions(
            &mut evaluator,
            &ids(&["R_tA", "R1"]),
            &optional,
            &positive_media(),
            &GapfillSettings::default(),
        )
        .unwrap();
        assert_eq!(minimal, ids(&["R2", "R3"]));
        assert!(minimal.is_subset(&optional));
    }

    fn strings(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn limit_drops_candidates_on_busy_compounds() {
        let store = toy_store();
        let biomass = toy_biomass();
        let media = positive_media();
        let mut evaluator = GrowthEvaluator::new(&store, &biomass).unwrap();
        let boundary = evaluator.boundary_reactions(&media);
        // a_c is used by both base reactions, so RA goes
        let base = ids(&["R_tA", "R1"]);
        let mut criterion = GrowthCriterion {
            evaluator: &mut evaluator,
            base: &base,
            media: &media,
            boundary: &boundary,
        };
        let limited =
            limit_candidates(&mut criterion, strings(&["RA", "R2", "R3"]), 1).unwrap();
        assert_eq!(limited, strings(&["R2", "R3"]));
    }

    #[test]
    fn limit_kept_only_when_it_grows() {
        let store = toy_store();
        let biomass = toy_biomass();
        let media = positive_media();
        let mut evaluator = GrowthEvaluator::new(&store, &biomass).unwrap();
        let boundary = evaluator.boundary_reactions(&media);
        // R3 touches b_c, which two base reactions use, but nothing grows without it
        let base = ids(&["R_tA", "R1", "R2"]);
        let mut criterion = GrowthCriterion {
            evaluator: &mut evaluator,
            base: &base,
            media: &media,
            boundary: &boundary,
        };
        let limited = limit_candidates(&mut criterion, strings(&["R3", "Z1"]), 1).unwrap();
        assert_eq!(limited, strings(&["R3", "Z1"]));
    }

    #[test]
    fn precondition_errors() {
        let store = toy_store();
        let biomass = toy_biomass();
        let media = positive_media();
        let mut evaluator = GrowthEvaluator::new(&store, &biomass).unwrap();
        let settings = GapfillSettingsBuilder::default()
            .max_retries(0)
            .build()
            .unwrap();
        assert_eq!(
            minimize_reactions(
                &mut evaluator,
                &ids(&["R_tA", "R1", "R2", "R3"]),
                &ids(&["Z1"]),
                &media,
                &settings
            ),
            Err(GapfillError::BaseAlreadyGrows(4))
        );
        assert_eq!(
            minimize_reactions(&mut evaluator, &ids(&["R1"]), &ids(&["R2"]), &media, &settings),
            Err(GapfillError::OptionalDoesNotGrow(1))
        );
    }
}
