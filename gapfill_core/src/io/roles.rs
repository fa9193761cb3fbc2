//! Tab separated role files: genome roles, role probabilities, and subsystems
use std::fs;
use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoleFileError {
    #[error("Unable to read role file")]
    UnableToRead(#[from] std::io::Error),
}

/// Non-empty lines which aren't comments, with their line numbers
fn data_lines(contents: &str) -> impl Iterator<Item = (usize, &str)> {
    contents
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_end_matches('\r')))
        .filter(|(_, l)| !l.trim().is_empty() && !l.starts_with('#'))
}

/// Functional roles, one per line, taken from the last column when lines carry a
/// feature id first (`fig|83333.1.peg.1\tEnolase (EC 4.2.1.11)`)
pub fn parse_functional_roles(contents: &str) -> IndexSet<String> {
    data_lines(contents)
        .filter_map(|(_, line)| line.rsplit('\t').next())
        .map(|role| role.trim().to_string())
        .filter(|role| !role.is_empty())
        .collect()
}

/// `role\tprobability` lines, malformed lines are skipped with a warning
pub fn parse_role_probabilities(contents: &str) -> IndexMap<String, f64> {
    let mut probabilities = IndexMap::new();
    for (number, line) in data_lines(contents) {
        let Some((role, probability)) = line.split_once('\t') else {
            log::warn!("Line {} has no probability column: {}", number, line);
            continue;
        };
        match probability.trim().parse::<f64>() {
            Ok(probability) => {
                probabilities.insert(role.trim().to_string(), probability);
            }
            Err(_) => log::warn!(
                "Line {} has an invalid probability {}",
                number,
                probability
            ),
        }
    }
    probabilities
}

/// `subsystem\trole` lines grouped by subsystem, malformed lines are skipped with a
/// warning
pub fn parse_subsystems(contents: &str) -> IndexMap<String, IndexSet<String>> {
    let mut subsystems: IndexMap<String, IndexSet<String>> = IndexMap::new();
    for (number, line) in data_lines(contents) {
        match line.split_once('\t') {
            Some((subsystem, role)) if !role.trim().is_empty() => {
                subsystems
                    .entry(subsystem.trim().to_string())
                    .or_default()
                    .insert(role.trim().to_string());
            }
            _ => log::warn!("Line {} is not a subsystem and a role: {}", number, line),
        }
    }
    subsystems
}

pub fn read_functional_roles<P: AsRef<Path>>(path: P) -> Result<IndexSet<String>, RoleFileError> {
    Ok(parse_functional_roles(&fs::read_to_string(path)?))
}

pub fn read_role_probabilities<P: AsRef<Path>>(
    path: P,
) -> Result<IndexMap<String, f64>, RoleFileError> {
    Ok(parse_role_probabilities(&fs::read_to_string(path)?))
}

pub fn read_subsystems<P: AsRef<Path>>(
    path: P,
) -> Result<IndexMap<String, IndexSet<String>>, RoleFileError> {
    Ok(parse_subsystems(&fs::read_to_string(path)?))
}
