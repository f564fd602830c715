use super::{json_pretty, load_manifest, EXIT_SUCCESS};
use std::path::Path;

/// Report requirements without an exact `==` pin. With `check`, any such
/// requirement is an error.
pub fn run(manifest_path: &Path, check: bool, json: bool) -> Result<u8, String> {
    let manifest = load_manifest(manifest_path)?;
    let unpinned: Vec<_> = manifest
        .dependencies_with_lines()
        .filter(|(_, dep)| !dep.is_pinned())
        .collect();

    if json {
        let entries: Vec<_> = unpinned
            .iter()
            .map(|(line, dep)| {
                serde_json::json!({
                    "line": line,
                    "name": dep.name,
                    "version_constraint": dep.version_constraint.as_ref().map(ToString::to_string),
                })
            })
            .collect();
        let payload = serde_json::json!({
            "status": if unpinned.is_empty() { "pinned" } else { "unpinned" },
            "manifest": manifest_path,
            "unpinned": entries,
        });
        println!("{}", json_pretty(&payload)?);
    } else if unpinned.is_empty() {
        println!("all requirements in {} are pinned", manifest_path.display());
    } else {
        println!("unpinned requirements in {}:", manifest_path.display());
        for (line, dep) in &unpinned {
            println!("  {line:>4}: {}", dep.requirement_text(dep.name.as_str()));
        }
    }

    if check && !unpinned.is_empty() {
        return Err(format!(
            "{} of {} requirements are not pinned with '=='",
            unpinned.len(),
            manifest.active_count()
        ));
    }
    Ok(EXIT_SUCCESS)
}
