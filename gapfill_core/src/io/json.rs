//! Module providing JSON IO for biochemistry stores and media
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metabolic_model::compound::{Compound, CompoundBuilder, CompoundBuilderError, Location};
use crate::metabolic_model::media::Media;
use crate::metabolic_model::reaction::{
    FluxBounds, Reaction, ReactionBuilder, ReactionBuilderError, ReactionDirection,
};
use crate::metabolic_model::store::{Complex, ModelStore};

// region JSON Store
/// Represents a JSON serialized biochemistry store
#[derive(Serialize, Deserialize)]
struct JsonStore {
    compounds: Vec<JsonCompound>,
    reactions: Vec<JsonReaction>,
    #[serde(default)]
    complexes: Vec<Complex>,
    biomass: Option<JsonReaction>,
}

#[derive(Serialize, Deserialize)]
struct JsonCompound {
    id: String,
    name: Option<String>,
    location: Option<Location>,
    molecular_weight: Option<f64>,
    charge: Option<i32>,
    #[serde(default)]
    aliases: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct JsonReaction {
    id: String,
    name: Option<String>,
    direction: Option<ReactionDirection>,
    #[serde(default)]
    left: IndexMap<String, f64>,
    #[serde(default)]
    right: IndexMap<String, f64>,
    lower_bound: Option<f64>,
    upper_bound: Option<f64>,
    #[serde(default)]
    is_transport: bool,
    #[serde(default)]
    ec_numbers: Vec<String>,
    #[serde(default)]
    linked: Vec<String>,
}

/// Represents a JSON serialized media
#[derive(Serialize, Deserialize)]
struct JsonMedia {
    name: String,
    compounds: Vec<JsonCompound>,
}
// endregion JSON Store

// region Conversions
impl TryFrom<JsonCompound> for Compound {
    type Error = JsonError;

    fn try_from(c: JsonCompound) -> Result<Self, Self::Error> {
        // Compounds without a name go by their id
        let name = c.name.unwrap_or_else(|| c.id.clone());
        Ok(CompoundBuilder::default()
            .id(c.id)
            .name(name)
            .location(c.location)
            .molecular_weight(c.molecular_weight)
            .charge(c.charge)
            .aliases(c.aliases)
            .build()?)
    }
}

impl JsonReaction {
    fn into_reaction(self, is_biomass: bool) -> Result<Reaction, JsonError> {
        let bounds = match (self.lower_bound, self.upper_bound) {
            (Some(lower), Some(upper)) => Some(FluxBounds::new(lower, upper)),
            (None, None) => None,
            _ => {
                log::warn!(
                    "Reaction {} has only one of its bounds set, ignoring them",
                    self.id
                );
                None
            }
        };
        Ok(ReactionBuilder::default()
            .id(self.id)
            .name(self.name)
            .direction(self.direction.unwrap_or(ReactionDirection::Unknown))
            .left(self.left)
            .right(self.right)
            .bounds(bounds)
            .is_transport(self.is_transport)
            .is_biomass(is_biomass)
            .ec_numbers(self.ec_numbers)
            .linked(self.linked.into_iter().collect())
            .build()?)
    }
}

impl ModelStore {
    /// Read a biochemistry store from a JSON file
    ///
    /// The file holds `compounds`, `reactions`, and optionally `complexes` and a `biomass`
    /// reaction, which is not added to the store (see [`read_biomass_json`]).
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<ModelStore, JsonError> {
        let json_store = read_json_store(path)?;
        ModelStore::from_json(json_store)
    }

    fn from_json(json_store: JsonStore) -> Result<Self, JsonError> {
        let mut store = ModelStore::new_empty();
        for compound in json_store.compounds {
            store.add_compound(Compound::try_from(compound)?);
        }
        for reaction in json_store.reactions {
            store.add_reaction(reaction.into_reaction(false)?);
        }
        for complex in json_store.complexes {
            store.add_complex(complex);
        }
        log::info!(
            "Read {} compounds, {} reactions, and {} complexes",
            store.compounds.len(),
            store.reactions.len(),
            store.complexes.len()
        );
        Ok(store)
    }
}

/// Read the biomass reaction out of a JSON biochemistry store file
pub fn read_biomass_json<P: AsRef<Path>>(path: P) -> Result<Reaction, JsonError> {
    match read_json_store(path)?.biomass {
        Some(biomass) => biomass.into_reaction(true),
        None => Err(JsonError::MissingBiomass),
    }
}

fn read_json_store<P: AsRef<Path>>(path: P) -> Result<JsonStore, JsonError> {
    let store_str = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) => return Err(JsonError::UnableToRead(format!("{:?}", err))),
    };
    match serde_json::from_str::<JsonStore>(&store_str) {
        Ok(store) => Ok(store),
        Err(err) => Err(JsonError::UnableToParse(format!("{:?}", err))),
    }
}

impl Media {
    /// Read a media from a JSON file with a `name` and a list of `compounds`
    ///
    /// Compounds without a location are taken to be extracellular.
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Media, JsonError> {
        let media_str = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(JsonError::UnableToRead(format!("{:?}", err))),
        };
        let json_media = match serde_json::from_str::<JsonMedia>(&media_str) {
            Ok(media) => media,
            Err(err) => return Err(JsonError::UnableToParse(format!("{:?}", err))),
        };
        let mut media = Media::new(&json_media.name);
        for compound in json_media.compounds {
            let mut compound = Compound::try_from(compound)?;
            compound.location.get_or_insert(Location::Extracellular);
            media.add_compound(compound);
        }
        Ok(media)
    }
}

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Unable to read file due to {0}")]
    UnableToRead(String),
    #[error("Unable to parse json due to {0}")]
    UnableToParse(String),
    #[error("Unable to build reaction")]
    UnableToBuildReaction(#[from] ReactionBuilderError),
    #[error("Unable to build compound")]
    UnableToBuildCompound(#[from] CompoundBuilderError),
    #[error("The file has no biomass reaction")]
    MissingBiomass,
}

// endregion Conversions
