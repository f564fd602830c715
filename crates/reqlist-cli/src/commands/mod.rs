pub mod check;
pub mod completions;
pub mod diff;
pub mod fmt;
pub mod inspect;
pub mod list;
pub mod man_pages;
pub mod new;
pub mod pin;

use console::Style;
use reqlist_schema::{parse_manifest_file, Dependency, Manifest, ManifestError, NormalizedManifest};
use std::path::Path;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_MANIFEST_ERROR: u8 = 2;

pub fn json_pretty(value: &impl serde::Serialize) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization failed: {e}"))
}

/// Render a manifest error so that `main` maps it to [`EXIT_MANIFEST_ERROR`].
pub fn manifest_error(path: &Path, err: &ManifestError) -> String {
    match err {
        ManifestError::DuplicateRequirement { .. } => {
            format!("manifest error: {}: {err}", path.display())
        }
        ManifestError::Io(_) | ManifestError::Parse(_) => format!("{err} ({})", path.display()),
        ManifestError::Write { .. } => err.to_string(),
    }
}

pub fn load_manifest(path: &Path) -> Result<Manifest, String> {
    parse_manifest_file(path).map_err(|e| manifest_error(path, &e))
}

pub fn load_normalized(path: &Path) -> Result<(Manifest, NormalizedManifest), String> {
    let manifest = load_manifest(path)?;
    let normalized = manifest.normalize().map_err(|e| manifest_error(path, &e))?;
    Ok((manifest, normalized))
}

/// Constraint text coloured by how tightly it pins the package, left-aligned
/// to `width` columns. Padding is applied before styling so escape codes do
/// not count towards the column width.
pub fn colorize_constraint(dep: &Dependency, width: usize) -> String {
    let (text, style) = match &dep.version_constraint {
        Some(c) if dep.is_pinned() => (c.to_string(), Style::new().green()),
        Some(c) => (c.to_string(), Style::new().yellow()),
        None => ("*".to_owned(), Style::new().dim()),
    };
    style.apply_to(format!("{text:<width$}")).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqlist_schema::parse_manifest_str;

    #[test]
    fn json_pretty_serializes_object() {
        let val = serde_json::json!({"key": "value"});
        let result = json_pretty(&val).unwrap();
        assert!(result.contains("\"key\""));
        assert!(result.contains("\"value\""));
    }

    #[test]
    fn colorize_constraint_keeps_text() {
        let manifest = parse_manifest_str("lightning==2.3.0\nnumpy>=1.23\nrich\n").unwrap();
        let deps: Vec<_> = manifest.dependencies().collect();
        assert!(colorize_constraint(deps[0], 0).contains("==2.3.0"));
        assert!(colorize_constraint(deps[1], 0).contains(">=1.23"));
        assert!(colorize_constraint(deps[2], 0).contains('*'));
    }

    #[test]
    fn colorize_constraint_pads_visible_text() {
        console::set_colors_enabled(true);
        let manifest = parse_manifest_str("lightning==2.3.0\nnumpy>=1.23\nrich\n").unwrap();
        let cells: Vec<String> = manifest
            .dependencies()
            .map(|dep| colorize_constraint(dep, 20))
            .collect();
        for cell in &cells {
            assert_eq!(console::measure_text_width(cell), 20, "{cell:?}");
        }
        assert_eq!(console::strip_ansi_codes(&cells[0]), format!("{:<20}", "==2.3.0"));
    }

    #[test]
    fn write_errors_do_not_map_to_manifest_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("missing/requirements.txt");
        let manifest = parse_manifest_str("rich\n").unwrap();
        let err = reqlist_schema::write_manifest_file(
            &dest,
            &manifest,
            &reqlist_schema::EmitOptions::default(),
        )
        .unwrap_err();
        let msg = manifest_error(&dest, &err);
        assert!(msg.starts_with("failed to write manifest"), "{msg}");
    }

    #[test]
    fn parse_errors_keep_their_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requirements.txt");
        std::fs::write(&path, "lightning=2.3.0\n").unwrap();
        let msg = load_manifest(&path).unwrap_err();
        assert!(msg.starts_with("failed to parse manifest"), "{msg}");
    }

    #[test]
    fn duplicates_are_manifest_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requirements.txt");
        std::fs::write(&path, "rich\nRich==13.7.1\n").unwrap();
        let msg = load_normalized(&path).unwrap_err();
        assert!(msg.starts_with("manifest error:"), "{msg}");
    }

    #[test]
    fn exit_codes_are_distinct() {
        assert_ne!(EXIT_SUCCESS, EXIT_FAILURE);
        assert_ne!(EXIT_FAILURE, EXIT_MANIFEST_ERROR);
    }
}
