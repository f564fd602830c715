use super::{json_pretty, load_normalized, EXIT_SUCCESS};
use std::path::Path;
use tracing::info;

pub fn run(manifest_path: &Path, json: bool) -> Result<u8, String> {
    info!("checking {}", manifest_path.display());
    let (manifest, normalized) = load_normalized(manifest_path)?;

    if json {
        let payload = serde_json::json!({
            "status": "ok",
            "manifest": manifest_path,
            "lines": manifest.lines().len(),
            "active": manifest.active_count(),
            "comments": manifest.comment_count(),
            "packages": normalized.requirements.len(),
        });
        println!("{}", json_pretty(&payload)?);
    } else {
        println!(
            "ok: {} active requirements, {} comments in {}",
            manifest.active_count(),
            manifest.comment_count(),
            manifest_path.display()
        );
    }
    Ok(EXIT_SUCCESS)
}
