//! Assembly of the stoichiometric matrix for a set of reactions
use std::borrow::Cow;

use indexmap::{IndexMap, IndexSet};
use nalgebra::DVector;
use nalgebra_sparse::{CooMatrix, CscMatrix};

use crate::fba::boundary::{boundary_reactions_for, find_compound};
use crate::fba::ModelError;
use crate::metabolic_model::media::Media;
use crate::metabolic_model::reaction::Reaction;
use crate::metabolic_model::store::ModelStore;

/// The stoichiometric model for one growth evaluation
///
/// Rows are compounds sorted by id. Columns are the requested reactions sorted by id,
/// then the uptake/secretion reactions, then the biomass reaction.
#[derive(Debug, Clone)]
pub struct StoichiometricModel<'a> {
    /// Row order
    pub compounds: Vec<String>,
    /// Column order, one reaction per column
    pub reactions: Vec<Cow<'a, Reaction>>,
    /// Number of columns holding requested reactions
    pub num_requested: usize,
    /// Number of columns holding uptake/secretion reactions
    pub num_boundary: usize,
    /// Compounds x reactions
    pub matrix: CscMatrix<f64>,
    /// Zero everywhere except 1 on the biomass column
    pub objective: DVector<f64>,
}

impl<'a> StoichiometricModel<'a> {
    /// Build the model for `reaction_ids` growing on `media`
    ///
    /// Reaction ids not found in the store are dropped with a warning. When `boundary` is
    /// `None` the uptake/secretion reactions are generated from the compounds of the
    /// requested reactions, the media, and the biomass reaction. A supplied boundary is
    /// filtered to the reactions whose compounds are in the model.
    pub fn build(
        store: &'a ModelStore,
        reaction_ids: &IndexSet<String>,
        media: &Media,
        biomass: &'a Reaction,
        boundary: Option<&'a [Reaction]>,
    ) -> Result<Self, ModelError> {
        let mut requested: Vec<&'a Reaction> = store
            .known_reactions(reaction_ids)
            .iter()
            .filter_map(|id| store.reaction(id))
            .collect();
        requested.sort_by(|a, b| a.id.cmp(&b.id));

        let mut compound_set: IndexSet<&str> = requested
            .iter()
            .flat_map(|r| r.all_compounds())
            .collect();
        compound_set.extend(media.compounds.keys().map(|c| c.as_str()));
        compound_set.extend(biomass.all_compounds());
        let mut compounds: Vec<String> = compound_set.into_iter().map(String::from).collect();
        compounds.sort();

        let boundary_reactions: Vec<Cow<'a, Reaction>> = match boundary {
            Some(supplied) => supplied
                .iter()
                .filter(|r| {
                    r.all_compounds()
                        .iter()
                        .all(|c| compounds.binary_search_by(|x| x.as_str().cmp(c)).is_ok())
                })
                .map(Cow::Borrowed)
                .collect(),
            None => {
                let ids: IndexSet<String> = requested.iter().map(|r| r.id.clone()).collect();
                boundary_reactions_for(store, &ids, media, biomass)
                    .into_iter()
                    .map(Cow::Owned)
                    .collect()
            }
        };
        for compound in &compounds {
            if find_compound(store, media, compound).is_none() {
                log::debug!("Compound {} is not in the store or the media", compound);
            }
        }

        let num_requested = requested.len();
        let num_boundary = boundary_reactions.len();
        let mut reactions: Vec<Cow<'a, Reaction>> = requested.into_iter().map(Cow::Borrowed).collect();
        reactions.extend(boundary_reactions);
        reactions.push(Cow::Borrowed(biomass));

        let row_index: IndexMap<&str, usize> = compounds
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();
        let mut coo = CooMatrix::new(compounds.len(), reactions.len());
        for (col, reaction) in reactions.iter().enumerate() {
            for (row, value) in stoichiometric_column(&row_index, reaction)? {
                coo.push(row, col, value);
            }
        }
        let mut objective = DVector::zeros(reactions.len());
        objective[reactions.len() - 1] = 1.;

        Ok(StoichiometricModel {
            compounds,
            reactions,
            num_requested,
            num_boundary,
            matrix: CscMatrix::from(&coo),
            objective,
        })
    }

    /// Column ids, in column order
    pub fn reaction_ids(&self) -> Vec<String> {
        self.reactions.iter().map(|r| r.id.clone()).collect()
    }

    pub fn num_compounds(&self) -> usize {
        self.compounds.len()
    }

    pub fn num_reactions(&self) -> usize {
        self.reactions.len()
    }
}

/// Matrix entries (row, coefficient) for one reaction
///
/// Substrates are negative and products positive. An uptake/secretion reaction only
/// contributes its substrate.
pub(crate) fn stoichiometric_column(
    row_index: &IndexMap<&str, usize>,
    reaction: &Reaction,
) -> Result<Vec<(usize, f64)>, ModelError> {
    let lookup = |compound: &str| {
        row_index
            .get(compound)
            .copied()
            .ok_or_else(|| ModelError::MissingCompound {
                compound: compound.to_string(),
                reaction: reaction.id.clone(),
            })
    };
    let mut entries = Vec::with_capacity(reaction.left.len() + reaction.right.len());
    for (compound, coefficient) in &reaction.left {
        entries.push((lookup(compound.as_str())?, -coefficient));
    }
    if !reaction.is_uptake_secretion {
        for (compound, coefficient) in &reaction.right {
            entries.push((lookup(compound.as_str())?, *coefficient));
        }
    }
    Ok(entries)
}
