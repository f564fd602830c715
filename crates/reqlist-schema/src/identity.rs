use crate::normalize::NormalizedManifest;
use crate::types::{ManifestId, ShortId};
use serde::Serialize;

/// Deterministic identity of a manifest's active requirement set.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ManifestIdentity {
    pub manifest_id: ManifestId,
    pub short_id: ShortId,
}

/// Hash the normalized requirement set.
///
/// Two manifests that declare the same packages with the same extras,
/// constraints and markers share an id, regardless of comments, blank lines,
/// ordering, whitespace or name spelling.
pub fn compute_manifest_id(
    normalized: &NormalizedManifest,
) -> Result<ManifestIdentity, serde_json::Error> {
    let mut hasher = blake3::Hasher::new();

    hasher.update(normalized.canonical_json()?.as_bytes());

    for req in &normalized.requirements {
        hasher.update(format!("req:{}", req.name).as_bytes());
        for extra in &req.extras {
            hasher.update(format!("extra:{extra}").as_bytes());
        }
        if let Some(constraint) = &req.constraint {
            hasher.update(format!("constraint:{constraint}").as_bytes());
        }
        if let Some(marker) = &req.marker {
            hasher.update(format!("marker:{marker}").as_bytes());
        }
    }

    let hex = hasher.finalize().to_hex().to_string();
    let short = hex[..12].to_owned();

    Ok(ManifestIdentity {
        manifest_id: ManifestId::new(hex),
        short_id: ShortId::new(short),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::parse_manifest_str;

    fn id_of(input: &str) -> ManifestIdentity {
        compute_manifest_id(&parse_manifest_str(input).unwrap().normalize().unwrap()).unwrap()
    }

    #[test]
    fn stable_id_for_equivalent_manifests() {
        assert_eq!(
            id_of("smplx\ntrimesh\n"),
            id_of("# 3D-Vision\nTrimesh  # meshes\n\nsmplx\n")
        );
    }

    #[test]
    fn constraint_change_changes_id() {
        assert_ne!(id_of("lightning==2.3.0\n"), id_of("lightning==2.4.0\n"));
        assert_ne!(id_of("lightning\n"), id_of("lightning>=2.3\n"));
    }

    #[test]
    fn extras_change_id() {
        assert_ne!(id_of("imageio\n"), id_of("imageio[pyav]\n"));
    }

    #[test]
    fn disabled_pin_does_not_change_id() {
        assert_eq!(id_of("rich\n"), id_of("rich\n# torch==2.5.0+cu124\n"));
    }

    #[test]
    fn short_id_is_12_chars() {
        let id = id_of("");
        assert_eq!(id.short_id.as_str().len(), 12);
        assert_eq!(id.manifest_id.as_str().len(), 64);
        assert!(id.manifest_id.as_str().starts_with(id.short_id.as_str()));
    }
}
