//! Reactions found in nearly every curated model
use indexmap::IndexSet;

use crate::metabolic_model::store::ModelStore;

/// Reactions required by almost every model, suggested in full by the first cascade step
pub const ESSENTIAL_REACTIONS: [&str; 109] = [
    "rxn00062", "rxn00148", "rxn00459", "rxn00781", "rxn01100", "rxn01106",
    "rxn00786", "rxn00747", "rxn00545", "rxn00558", "rxn00216", "rxn00256",
    "rxn00974", "rxn01388", "rxn00198", "rxn00285", "rxn00799", "rxn00248",
    "rxn00154", "rxn00173", "rxn00225", "rxn01200", "rxn00777", "rxn01116",
    "rxn00785", "rxn01333", "rxn01975", "rxn01187", "rxn00251", "rxn00147",
    "rxn00171", "rxn00184", "rxn00192", "rxn00260", "rxn00283", "rxn00337",
    "rxn00340", "rxn00416", "rxn00423", "rxn00438", "rxn00461", "rxn00470",
    "rxn00512", "rxn00527", "rxn00533", "rxn00549", "rxn00568", "rxn00599",
    "rxn00623", "rxn00686", "rxn00693", "rxn00710", "rxn00711", "rxn00737",
    "rxn00789", "rxn00790", "rxn00791", "rxn00800", "rxn00834", "rxn00838",
    "rxn00851", "rxn00907", "rxn00908", "rxn00929", "rxn00931", "rxn00952",
    "rxn00956", "rxn01018", "rxn01019", "rxn01102", "rxn01211", "rxn01256",
    "rxn01300", "rxn01301", "rxn01302", "rxn01304", "rxn01465", "rxn01466",
    "rxn01513", "rxn01517", "rxn01537", "rxn01641", "rxn01643", "rxn01644",
    "rxn01739", "rxn01740", "rxn01790", "rxn01791", "rxn01974", "rxn02011",
    "rxn02029", "rxn02175", "rxn02200", "rxn02212", "rxn02213", "rxn02214",
    "rxn02285", "rxn02320", "rxn02473", "rxn02474", "rxn02476", "rxn02503",
    "rxn02507", "rxn02508", "rxn02811", "rxn02834", "rxn02835", "rxn02894",
    "rxn02897",
];

/// [`ESSENTIAL_REACTIONS`] as an owned set
pub fn essential_reactions() -> IndexSet<String> {
    ESSENTIAL_REACTIONS.iter().map(|r| r.to_string()).collect()
}

/// The essential reactions known to the store and missing from `current`
pub fn suggest_essential(
    store: &ModelStore,
    current: &IndexSet<String>,
    essential: &IndexSet<String>,
) -> IndexSet<String> {
    essential
        .iter()
        .filter(|r| !current.contains(*r) && store.reactions.contains_key(r.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{ids, toy_store};

    #[test]
    fn default_set() {
        let essential = essential_reactions();
        assert_eq!(essential.len(), ESSENTIAL_REACTIONS.len());
        assert!(essential.contains("rxn00062"));
    }

    #[test]
    fn skips_present_and_unknown() {
        let store = toy_store();
        let suggested = suggest_essential(
            &store,
            &ids(&["R_tA", "R2"]),
            &ids(&["R2", "R3", "rxn00062"]),
        );
        assert_eq!(suggested, ids(&["R3"]));
    }
}
