use super::{json_pretty, load_normalized, EXIT_SUCCESS};
use reqlist_schema::diff_manifests;
use std::path::Path;

pub fn run(old_path: &Path, new_path: &Path, json: bool) -> Result<u8, String> {
    let (_, old) = load_normalized(old_path)?;
    let (_, new) = load_normalized(new_path)?;
    let report = diff_manifests(&old, &new);

    if json {
        println!("{}", json_pretty(&report)?);
    } else if report.has_drift {
        println!(
            "requirements differ between {} and {}:",
            old_path.display(),
            new_path.display()
        );
        for name in &report.added {
            println!("  + {name}");
        }
        for change in &report.changed {
            println!("  ~ {} -> {}", change.before, change.after);
        }
        for name in &report.removed {
            println!("  - {name}");
        }
    } else {
        println!("no requirement drift");
    }
    Ok(EXIT_SUCCESS)
}
