//! The gap-filling cascade: trying suggestion strategies in a fixed order until the model
//! grows
use std::fmt::{Display, Formatter};

use indexmap::IndexSet;

use crate::fba::growth::GrowthEvaluator;
use crate::gapfill::ec::{suggest_ec_brief, suggest_ec_full};
use crate::gapfill::essential::suggest_essential;
use crate::gapfill::linked::suggest_linked;
use crate::gapfill::media::suggest_media;
use crate::gapfill::minimize::minimize_reactions_with_boundary;
use crate::gapfill::orphans::suggest_orphans;
use crate::gapfill::probability::suggest_probable;
use crate::gapfill::proteins::{suggest_with_proteins, suggest_without_proteins};
use crate::gapfill::roles::{suggest_close_genera, suggest_close_organisms};
use crate::gapfill::subsystems::suggest_subsystems;
use crate::gapfill::{
    GapfillError, GapfillInputs, GapfillOutcome, GapfillRecord, GapfillSettings, GapfilledModel,
};
use crate::metabolic_model::media::Media;
use crate::metabolic_model::reaction::Reaction;
use crate::metabolic_model::store::ModelStore;

/// One step of the cascade, each backed by a suggestion strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CascadeStep {
    /// Reactions found in nearly every model
    Essential,
    /// Reactions linked to the working reactions
    Linked,
    /// EC matches of the genome's roles, skipping unspecific EC numbers
    EcBrief,
    /// Every EC match of the genome's roles
    EcFull,
    /// Reactions using media compounds
    Media,
    /// Roles seen in close organisms
    CloseOrganisms,
    /// Roles seen in close genera
    CloseGenera,
    /// Completion of partly present subsystems
    Subsystems,
    /// Reactions connecting dead-end compounds
    Orphans,
    /// Reactions whose compounds are mostly present
    Probability,
    /// Any reaction with an enzyme
    WithProteins,
    /// Any reaction without an enzyme, restricted to lightly connected compounds
    WithoutProteins,
}

impl CascadeStep {
    /// Every step, in the order the cascade tries them
    pub const ALL: [CascadeStep; 12] = [
        CascadeStep::Essential,
        CascadeStep::Linked,
        CascadeStep::EcBrief,
        CascadeStep::EcFull,
        CascadeStep::Media,
        CascadeStep::CloseOrganisms,
        CascadeStep::CloseGenera,
        CascadeStep::Subsystems,
        CascadeStep::Orphans,
        CascadeStep::Probability,
        CascadeStep::WithProteins,
        CascadeStep::WithoutProteins,
    ];

    /// Provenance label of the reactions added by this step
    pub fn label(&self) -> &'static str {
        match self {
            CascadeStep::Essential => "essential",
            CascadeStep::Linked => "linked",
            CascadeStep::EcBrief => "ec_brief",
            CascadeStep::EcFull => "ec_full",
            CascadeStep::Media => "media",
            CascadeStep::CloseOrganisms => "close_organisms",
            CascadeStep::CloseGenera => "close_genera",
            CascadeStep::Subsystems => "subsystems",
            CascadeStep::Orphans => "orphans",
            CascadeStep::Probability => "probability",
            CascadeStep::WithProteins => "with_proteins",
            CascadeStep::WithoutProteins => "without_proteins",
        }
    }

    /// Reactions this step suggests adding to `current`
    pub fn suggest(
        &self,
        store: &ModelStore,
        current: &IndexSet<String>,
        media: &Media,
        inputs: &GapfillInputs,
        settings: &GapfillSettings,
    ) -> IndexSet<String> {
        match self {
            CascadeStep::Essential => suggest_essential(store, current, &inputs.essential),
            CascadeStep::Linked => suggest_linked(store, current),
            CascadeStep::EcBrief => {
                suggest_ec_brief(store, current, &inputs.roles, settings.ec_brief_limit)
            }
            CascadeStep::EcFull => suggest_ec_full(store, current, &inputs.roles),
            CascadeStep::Media => suggest_media(store, current, media),
            CascadeStep::CloseOrganisms => suggest_close_organisms(
                store,
                current,
                &inputs.close_organism_roles,
                settings.close_organism_threshold,
            ),
            CascadeStep::CloseGenera => suggest_close_genera(
                store,
                current,
                &inputs.close_genera_roles,
                settings.close_organism_threshold,
            ),
            CascadeStep::Subsystems => suggest_subsystems(
                store,
                current,
                &inputs.subsystems,
                settings.subsystem_coverage,
            ),
            CascadeStep::Orphans => {
                suggest_orphans(store, current, settings.orphan_max_connections)
            }
            CascadeStep::Probability => suggest_probable(
                store,
                current,
                media,
                settings.probability_requires_proteins,
            ),
            CascadeStep::WithProteins => suggest_with_proteins(store, current),
            CascadeStep::WithoutProteins => {
                suggest_without_proteins(store, current, settings.limit_max_connections)
            }
        }
    }
}

impl Display for CascadeStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Gap-fill `reactions` so that they grow on `media`
///
/// Steps are tried in [`CascadeStep::ALL`] order, each adding its suggestions to the working
/// reactions, until the working reactions grow. Suggestions in `inputs.excluded` are never
/// added. With `settings.minimize` each step's contribution is then minimized, most
/// recent step first.
pub fn gapfill(
    evaluator: &mut GrowthEvaluator,
    reactions: &IndexSet<String>,
    media: &Media,
    inputs: &GapfillInputs,
    settings: &GapfillSettings,
) -> Result<GapfillOutcome, GapfillError> {
    let store = evaluator.store();
    let boundary = evaluator.boundary_reactions(media);
    let original = store.known_reactions(reactions);
    let mut working = original.clone();
    let mut record = Vec::new();

    if evaluator.grows(&working, media, Some(boundary.as_slice()))? {
        log::info!(
            "{} reactions already grow on {}, nothing to gap-fill",
            working.len(),
            media.name
        );
        return Ok(GapfillOutcome::Success(GapfilledModel { original, record }));
    }

    let mut attempted = Vec::new();
    let mut grew = false;
    for step in CascadeStep::ALL {
        let suggested: IndexSet<String> = step
            .suggest(store, &working, media, inputs, settings)
            .into_iter()
            .filter(|r| !inputs.excluded.contains(r) && !working.contains(r))
            .collect();
        log::info!("Step {} suggested {} reactions", step, suggested.len());
        if suggested.is_empty() {
            continue;
        }
        attempted.push(step);
        working.extend(suggested.iter().cloned());
        record.push(GapfillRecord::new(step, suggested));
        if evaluator.grows(&working, media, Some(boundary.as_slice()))? {
            log::info!(
                "Growth on {} after step {} with {} reactions",
                media.name,
                step,
                working.len()
            );
            grew = true;
            break;
        }
    }
    if !grew {
        log::warn!(
            "No growth on {} after trying every gap-filling strategy",
            media.name
        );
        return Ok(GapfillOutcome::Exhausted { attempted });
    }

    if settings.minimize {
        record = minimize_record(evaluator, &original, record, media, &boundary, settings)?;
    }
    Ok(GapfillOutcome::Success(GapfilledModel { original, record }))
}

/// Minimize each step's contribution, most recent first
///
/// Each entry is minimized against the original reactions plus every other entry, the
/// later ones already minimized. An entry whose base already grows contributes nothing
/// and is dropped.
pub fn minimize_record(
    evaluator: &mut GrowthEvaluator,
    original: &IndexSet<String>,
    mut record: Vec<GapfillRecord>,
    media: &Media,
    boundary: &[Reaction],
    settings: &GapfillSettings,
) -> Result<Vec<GapfillRecord>, GapfillError> {
    let mut minimized: Vec<GapfillRecord> = Vec::with_capacity(record.len());
    while let Some(entry) = record.pop() {
        let mut base = original.clone();
        for other in record.iter().chain(minimized.iter()) {
            base.extend(other.reactions.iter().cloned());
        }
        if evaluator.grows(&base, media, Some(boundary))? {
            log::debug!("Step {} is not needed for growth", entry.step);
            continue;
        }
        let before = entry.reactions.len();
        let reactions = minimize_reactions_with_boundary(
            evaluator,
            &base,
            &entry.reactions,
            media,
            boundary,
            settings,
        )?;
        log::info!(
            "Step {} minimized from {} to {} reactions",
            entry.step,
            before,
            reactions.len()
        );
        minimized.push(GapfillRecord::new(entry.step, reactions));
    }
    minimized.reverse();
    Ok(minimized)
}
