//! Completing subsystems which are already partly present
use indexmap::{IndexMap, IndexSet};

use crate::metabolic_model::store::ModelStore;

/// Reactions for the missing roles of every subsystem whose roles are covered by
/// `current` above `coverage`
///
/// Coverage is the fraction of a subsystem's roles carried by a complex catalyzing one of
/// the working reactions.
pub fn suggest_subsystems(
    store: &ModelStore,
    current: &IndexSet<String>,
    subsystems: &IndexMap<String, IndexSet<String>>,
    coverage: f64,
) -> IndexSet<String> {
    let present = store.roles_for_reactions(current);
    let mut suggested = IndexSet::new();
    for (name, roles) in subsystems {
        if roles.is_empty() {
            continue;
        }
        let missing: Vec<&String> = roles.iter().filter(|r| !present.contains(*r)).collect();
        let covered = (roles.len() - missing.len()) as f64 / roles.len() as f64;
        if covered <= coverage || missing.is_empty() {
            continue;
        }
        log::debug!(
            "Subsystem {} is {:.0}% covered, completing {} roles",
            name,
            covered * 100.,
            missing.len()
        );
        for role in missing {
            suggested.extend(
                store
                    .reactions_for_role(role)
                    .into_iter()
                    .filter(|r| !current.contains(r)),
            );
        }
    }
    suggested
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{ids, toy_store};

    fn subsystems() -> IndexMap<String, IndexSet<String>> {
        let mut subsystems = IndexMap::new();
        subsystems.insert(
            "Branches".to_string(),
            ids(&[
                "A to B converter (EC 1.1.1.1)",
                "Branch enzyme C (EC 1.1.1.3)",
                "Branch enzyme D (EC 1.1.1.4)",
            ]),
        );
        subsystems.insert("Empty".to_string(), IndexSet::new());
        subsystems
    }

    #[test]
    fn completes_covered_subsystems() {
        let store = toy_store();
        assert_eq!(
            suggest_subsystems(&store, &ids(&["R1", "R2"]), &subsystems(), 0.5),
            ids(&["R3"])
        );
        // One role out of three is not enough
        assert!(suggest_subsystems(&store, &ids(&["R1"]), &subsystems(), 0.5).is_empty());
        assert_eq!(
            suggest_subsystems(&store, &ids(&["R1"]), &subsystems(), 0.3),
            ids(&["R2", "R3"])
        );
        // Already complete
        assert!(suggest_subsystems(&store, &ids(&["R1", "R2", "R3"]), &subsystems(), 0.5).is_empty());
    }
}
