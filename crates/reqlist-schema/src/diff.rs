use crate::normalize::{NormalizedManifest, NormalizedRequirement};
use serde::Serialize;

/// Requirement-level drift between two manifests, keyed by canonical name.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ManifestDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub changed: Vec<RequirementChange>,
    pub has_drift: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RequirementChange {
    pub name: String,
    pub before: String,
    pub after: String,
}

pub fn diff_manifests(old: &NormalizedManifest, new: &NormalizedManifest) -> ManifestDiff {
    let mut diff = ManifestDiff::default();

    for req in &old.requirements {
        match new.get(&req.name) {
            None => diff.removed.push(req.name.clone()),
            Some(other) if other != req => diff.changed.push(RequirementChange {
                name: req.name.clone(),
                before: describe(req),
                after: describe(other),
            }),
            Some(_) => {}
        }
    }
    for req in &new.requirements {
        if old.get(&req.name).is_none() {
            diff.added.push(req.name.clone());
        }
    }

    diff.has_drift = !(diff.added.is_empty() && diff.removed.is_empty() && diff.changed.is_empty());
    diff
}

fn describe(req: &NormalizedRequirement) -> String {
    let mut out = req.name.clone();
    if !req.extras.is_empty() {
        out.push('[');
        out.push_str(&req.extras.join(","));
        out.push(']');
    }
    if let Some(constraint) = &req.constraint {
        out.push_str(constraint);
    }
    if let Some(marker) = &req.marker {
        out.push_str(" ; ");
        out.push_str(marker);
    }
    out
}
