use super::{colorize_constraint, json_pretty, load_manifest, EXIT_SUCCESS};
use std::path::Path;

pub fn run(manifest_path: &Path, json: bool) -> Result<u8, String> {
    let manifest = load_manifest(manifest_path)?;

    if json {
        let entries: Vec<_> = manifest
            .dependencies_with_lines()
            .map(|(line, dep)| {
                serde_json::json!({
                    "line": line,
                    "name": dep.name,
                    "extras": dep.extras,
                    "version_constraint": dep.version_constraint.as_ref().map(ToString::to_string),
                    "marker": dep.marker,
                    "inline_comment": dep.inline_comment,
                })
            })
            .collect();
        println!("{}", json_pretty(&entries)?);
    } else if manifest.active_count() == 0 {
        println!("no requirements found");
    } else {
        println!("{:<6} {:<24} {:<20} COMMENT", "LINE", "NAME", "CONSTRAINT");
        for (line, dep) in manifest.dependencies_with_lines() {
            let mut name = dep.name.to_string();
            if let Some(extras) = &dep.extras {
                name = format!(
                    "{name}[{}]",
                    extras.iter().map(String::as_str).collect::<Vec<_>>().join(",")
                );
            }
            println!(
                "{:<6} {:<24} {} {}",
                line,
                name,
                colorize_constraint(dep, 20),
                dep.inline_comment.as_deref().unwrap_or("")
            );
        }
    }
    Ok(EXIT_SUCCESS)
}
