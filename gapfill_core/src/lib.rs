//! Core rust implementation of gap-filling for genome-scale metabolic models.
//!
//! A [`metabolic_model::store::ModelStore`] holds the biochemistry, the
//! [`fba::growth::GrowthEvaluator`] decides whether a set of reactions grows on a
//! [`metabolic_model::media::Media`], and [`gapfill`] searches for the reactions a
//! non-growing model is missing.

pub mod configuration;
pub mod fba;
pub mod gapfill;
pub mod io;
pub mod metabolic_model;
pub mod optimize;

#[cfg(test)]
mod test_fixtures;
