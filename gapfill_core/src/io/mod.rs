//! Reading biochemistry stores, media, and role files
pub mod json;
pub mod roles;
