//! Reactions sharing an Enzyme Commission number with a role in the genome
use indexmap::IndexSet;

use crate::metabolic_model::store::ModelStore;

/// EC numbers mentioned in a functional role, e.g. `Enolase (EC 4.2.1.11)`
///
/// Partial numbers such as `EC 3.4.-.-` or `EC 2.7.1.n3` are kept as written.
pub fn ec_numbers_in_role(role: &str) -> Vec<String> {
    let mut numbers = Vec::new();
    let mut rest = role;
    while let Some(start) = rest.find("EC") {
        let after = rest[start + 2..].trim_start_matches(|c: char| c == ' ' || c == ':');
        let end = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '.' || c == '-'))
            .unwrap_or(after.len());
        let candidate = after[..end].trim_end_matches('.');
        if is_ec_number(candidate) {
            numbers.push(candidate.to_string());
        }
        rest = &rest[start + 2..];
    }
    numbers
}

/// Four dot separated fields, the first numeric
fn is_ec_number(candidate: &str) -> bool {
    let fields: Vec<&str> = candidate.split('.').collect();
    fields.len() == 4
        && fields[0].chars().all(|c| c.is_ascii_digit())
        && fields.iter().all(|f| !f.is_empty())
}

/// Reactions for the EC numbers of the genome's roles, outside `current`
///
/// With a `limit`, an EC number matching more than that many reactions is skipped, leaving
/// only the specific matches.
pub fn suggest_by_ec(
    store: &ModelStore,
    current: &IndexSet<String>,
    roles: &IndexSet<String>,
    limit: Option<usize>,
) -> IndexSet<String> {
    let mut suggested = IndexSet::new();
    for role in roles {
        let numbers = ec_numbers_in_role(role);
        if numbers.is_empty() {
            log::debug!("Role {} has no EC number", role);
            continue;
        }
        for number in numbers {
            let matching = store.reactions_with_ec(&number);
            if limit.is_some_and(|l| matching.len() > l) {
                log::debug!(
                    "EC {} matches {} reactions, skipping it in the brief pass",
                    number,
                    matching.len()
                );
                continue;
            }
            suggested.extend(matching.into_iter().filter(|r| !current.contains(r)));
        }
    }
    suggested
}

/// EC matches, skipping EC numbers which match more than `limit` reactions
pub fn suggest_ec_brief(
    store: &ModelStore,
    current: &IndexSet<String>,
    roles: &IndexSet<String>,
    limit: usize,
) -> IndexSet<String> {
    suggest_by_ec(store, current, roles, Some(limit))
}

/// Every EC match
pub fn suggest_ec_full(
    store: &ModelStore,
    current: &IndexSet<String>,
    roles: &IndexSet<String>,
) -> IndexSet<String> {
    suggest_by_ec(store, current, roles, None)
}
