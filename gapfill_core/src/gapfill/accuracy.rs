//! Minimizing a reaction set against several media with known growth outcomes
use derive_builder::Builder;
use indexmap::IndexSet;

use crate::fba::growth::GrowthEvaluator;
use crate::fba::ModelError;
use crate::gapfill::minimize::{bisect, SubsetCriterion};
use crate::gapfill::{GapfillError, GapfillSettings};
use crate::metabolic_model::media::Media;
use crate::metabolic_model::reaction::Reaction;

/// Counts of growth predictions against known outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Confusion {
    /// Grows on a medium it should grow on
    pub true_positives: usize,
    /// Grows on a medium it should not grow on
    pub false_positives: usize,
    /// Doesn't grow on a medium it should not grow on
    pub true_negatives: usize,
    /// Doesn't grow on a medium it should grow on
    pub false_negatives: usize,
}

impl Confusion {
    pub fn new(
        true_positives: usize,
        false_positives: usize,
        true_negatives: usize,
        false_negatives: usize,
    ) -> Self {
        Confusion {
            true_positives,
            false_positives,
            true_negatives,
            false_negatives,
        }
    }

    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    /// Fraction of correct predictions, zero when nothing was predicted
    pub fn accuracy(&self) -> f64 {
        match self.total() {
            0 => 0.,
            total => (self.true_positives + self.true_negatives) as f64 / total as f64,
        }
    }
}

/// When a reaction set is accurate enough
#[derive(Builder, Debug, Clone)]
pub struct AccuracyTarget {
    /// Met when the true positives exceed this
    #[builder(default = "0")]
    pub min_true_positives: usize,
    /// Met when the accuracy exceeds this
    #[builder(default = "0.5")]
    pub min_accuracy: f64,
}

impl Default for AccuracyTarget {
    fn default() -> Self {
        AccuracyTarget {
            min_true_positives: 0,
            min_accuracy: 0.5,
        }
    }
}

impl AccuracyTarget {
    pub fn is_met(&self, confusion: &Confusion) -> bool {
        confusion.true_positives > self.min_true_positives
            || confusion.accuracy() > self.min_accuracy
    }
}

/// Evaluate `reactions` on every positive and negative medium
pub fn evaluate_accuracy(
    evaluator: &mut GrowthEvaluator,
    reactions: &IndexSet<String>,
    positive: &[Media],
    negative: &[Media],
) -> Result<Confusion, ModelError> {
    let positive = with_boundaries(evaluator, positive);
    let negative = with_boundaries(evaluator, negative);
    confusion_for(evaluator, reactions, &positive, &negative)
}

fn with_boundaries<'m>(
    evaluator: &GrowthEvaluator,
    media: &'m [Media],
) -> Vec<(&'m Media, Vec<Reaction>)> {
    media
        .iter()
        .map(|m| (m, evaluator.boundary_reactions(m)))
        .collect()
}

fn confusion_for(
    evaluator: &mut GrowthEvaluator,
    reactions: &IndexSet<String>,
    positive: &[(&Media, Vec<Reaction>)],
    negative: &[(&Media, Vec<Reaction>)],
) -> Result<Confusion, ModelError> {
    let mut confusion = Confusion::default();
    for (media, boundary) in positive {
        if evaluator.grows(reactions, media, Some(boundary.as_slice()))? {
            confusion.true_positives += 1;
        } else {
            confusion.false_negatives += 1;
        }
    }
    for (media, boundary) in negative {
        if evaluator.grows(reactions, media, Some(boundary.as_slice()))? {
            confusion.false_positives += 1;
        } else {
            confusion.true_negatives += 1;
        }
    }
    Ok(confusion)
}

/// Accuracy of the base reactions together with a subset
///
/// The accuracy bound is raised to the accuracy of the base alone, so a subset only
/// counts through accuracy when it improves on the base.
struct AccuracyCriterion<'e, 'a, 'b> {
    evaluator: &'e mut GrowthEvaluator<'a>,
    base: &'b IndexSet<String>,
    positive: Vec<(&'b Media, Vec<Reaction>)>,
    negative: Vec<(&'b Media, Vec<Reaction>)>,
    target: AccuracyTarget,
    base_confusion: Confusion,
}

impl<'e, 'a, 'b> AccuracyCriterion<'e, 'a, 'b> {
    fn new(
        evaluator: &'e mut GrowthEvaluator<'a>,
        base: &'b IndexSet<String>,
        positive: &'b [Media],
        negative: &'b [Media],
        target: &AccuracyTarget,
    ) -> Result<Self, GapfillError> {
        let positive = with_boundaries(evaluator, positive);
        let negative = with_boundaries(evaluator, negative);
        let base_confusion = confusion_for(evaluator, base, &positive, &negative)?;
        let target = AccuracyTarget {
            min_true_positives: target.min_true_positives,
            min_accuracy: target.min_accuracy.max(base_confusion.accuracy()),
        };
        Ok(AccuracyCriterion {
            evaluator,
            base,
            positive,
            negative,
            target,
            base_confusion,
        })
    }

    fn confusion(&mut self, subset: &[String]) -> Result<Confusion, GapfillError> {
        let mut reactions = self.base.clone();
        reactions.extend(subset.iter().cloned());
        Ok(confusion_for(
            self.evaluator,
            &reactions,
            &self.positive,
            &self.negative,
        )?)
    }
}

impl SubsetCriterion for AccuracyCriterion<'_, '_, '_> {
    type Score = Confusion;

    fn score(&mut self, subset: &[String]) -> Result<Option<Confusion>, GapfillError> {
        let confusion = self.confusion(subset)?;
        log::debug!(
            "{} candidates: {:?}, accuracy {:.3}",
            subset.len(),
            confusion,
            confusion.accuracy()
        );
        Ok(self.target.is_met(&confusion).then_some(confusion))
    }

    fn compares_halves(&self) -> bool {
        true
    }

    /// Accuracy only decides between halves which both clear the true positive minimum
    fn prefers_right(&self, left: &Confusion, right: &Confusion) -> bool {
        let min = self.target.min_true_positives;
        left.true_positives > min
            && right.true_positives > min
            && right.accuracy() > left.accuracy()
    }
}

/// Find a small subset of `optional` which, together with `base`, meets `target` across
/// the positive and negative media
///
/// Meeting the target through accuracy also requires beating the accuracy of `base`
/// alone, which otherwise can clear the bound on true negatives only. `base` must not
/// already have more true positives than the target asks for. When both halves of a
/// bisection clear the true positive minimum, the more accurate one is kept.
pub fn minimize_by_accuracy(
    evaluator: &mut GrowthEvaluator,
    base: &IndexSet<String>,
    optional: &IndexSet<String>,
    positive: &[Media],
    negative: &[Media],
    target: &AccuracyTarget,
    settings: &GapfillSettings,
) -> Result<IndexSet<String>, GapfillError> {
    let mut criterion = AccuracyCriterion::new(evaluator, base, positive, negative, target)?;
    let base_confusion = criterion.base_confusion;
    if criterion.target.is_met(&base_confusion) {
        return Err(GapfillError::BaseAlreadyGrows(base.len()));
    }
    let candidates: Vec<String> = optional
        .iter()
        .filter(|r| !base.contains(*r))
        .cloned()
        .collect();
    let full_confusion = criterion.confusion(&candidates)?;
    if !criterion.target.is_met(&full_confusion) {
        return Err(GapfillError::OptionalDoesNotGrow(candidates.len()));
    }
    log::info!(
        "Accuracy {:.3} without and {:.3} with {} optional reactions",
        base_confusion.accuracy(),
        full_confusion.accuracy(),
        candidates.len()
    );

    let minimal = bisect(&mut criterion, candidates, settings.max_retries, settings.seed)?;
    Ok(minimal.into_iter().collect())
}
