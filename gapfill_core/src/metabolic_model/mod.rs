//! Module providing the compounds, reactions, media, and the store holding them.

pub mod compound;
pub mod media;
pub mod reaction;
pub mod store;
