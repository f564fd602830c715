use super::{json_pretty, load_normalized, EXIT_SUCCESS};
use reqlist_schema::{compute_manifest_id, DependencyLine};
use std::path::Path;

pub fn run(manifest_path: &Path, json: bool) -> Result<u8, String> {
    let (manifest, normalized) = load_normalized(manifest_path)?;
    let identity = compute_manifest_id(&normalized)
        .map_err(|e| format!("failed to compute manifest id: {e}"))?;
    let disabled = manifest.disabled_pins();
    let blank = manifest
        .lines()
        .iter()
        .filter(|l| matches!(l, DependencyLine::Blank))
        .count();
    let pinned = manifest.dependencies().filter(|d| d.is_pinned()).count();

    if json {
        let payload = serde_json::json!({
            "manifest": manifest_path,
            "manifest_id": identity.manifest_id,
            "short_id": identity.short_id,
            "lines": manifest.lines().len(),
            "active": manifest.active_count(),
            "pinned": pinned,
            "comments": manifest.comment_count(),
            "blank": blank,
            "disabled_pins": disabled,
        });
        println!("{}", json_pretty(&payload)?);
    } else {
        println!("manifest:     {}", manifest_path.display());
        println!("manifest_id:  {}", identity.manifest_id);
        println!("short_id:     {}", identity.short_id);
        println!("lines:        {}", manifest.lines().len());
        println!("active:       {}", manifest.active_count());
        println!("pinned:       {pinned}");
        println!("comments:     {}", manifest.comment_count());
        println!("blank:        {blank}");
        if !disabled.is_empty() {
            println!("disabled pins (commented out, not installed):");
            for pin in &disabled {
                println!(
                    "  {:>4}: {}",
                    pin.line,
                    pin.dependency.requirement_text(pin.dependency.name.as_str())
                );
            }
        }
    }
    Ok(EXIT_SUCCESS)
}
