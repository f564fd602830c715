use crate::manifest::{Manifest, ManifestError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Canonical, sorted representation of a manifest's active requirements.
///
/// Comments, blank lines, declaration order and name spelling are dropped.
/// This is the input to identity hashing and manifest diffs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizedManifest {
    pub requirements: Vec<NormalizedRequirement>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizedRequirement {
    pub name: String,
    pub extras: Vec<String>,
    pub constraint: Option<String>,
    pub marker: Option<String>,
}

impl Manifest {
    /// Normalize the active set, rejecting packages declared more than once.
    pub fn normalize(&self) -> Result<NormalizedManifest, ManifestError> {
        let mut seen: BTreeMap<String, (usize, NormalizedRequirement)> = BTreeMap::new();

        for (line, dep) in self.dependencies_with_lines() {
            let name = dep.name.canonical();
            if let Some((first_line, _)) = seen.get(&name) {
                return Err(ManifestError::DuplicateRequirement {
                    name,
                    first_line: *first_line,
                    second_line: line,
                });
            }
            let requirement = NormalizedRequirement {
                name: name.clone(),
                extras: dep
                    .extras
                    .iter()
                    .flatten()
                    .map(|e| e.to_ascii_lowercase())
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect(),
                constraint: dep.version_constraint.as_ref().map(ToString::to_string),
                marker: dep.marker.as_deref().map(normalize_marker),
            };
            seen.insert(name, (line, requirement));
        }

        Ok(NormalizedManifest {
            requirements: seen.into_values().map(|(_, req)| req).collect(),
        })
    }
}

impl NormalizedManifest {
    pub fn canonical_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn get(&self, canonical_name: &str) -> Option<&NormalizedRequirement> {
        self.requirements
            .binary_search_by(|r| r.name.as_str().cmp(canonical_name))
            .ok()
            .map(|idx| &self.requirements[idx])
    }
}

fn normalize_marker(marker: &str) -> String {
    marker.split_whitespace().collect::<Vec<_>>().join(" ")
}
