use super::{json_pretty, manifest_error, EXIT_SUCCESS};
use reqlist_schema::{parse_manifest_str, write_manifest_file, EmitOptions, ManifestError};
use std::path::Path;
use tracing::info;

#[allow(clippy::fn_params_excessive_bools)]
pub fn run(
    manifest_path: &Path,
    options: &EmitOptions,
    check: bool,
    stdout: bool,
    json: bool,
) -> Result<u8, String> {
    let original = std::fs::read_to_string(manifest_path)
        .map_err(|e| manifest_error(manifest_path, &ManifestError::Io(e)))?;
    let manifest =
        parse_manifest_str(&original).map_err(|e| manifest_error(manifest_path, &e))?;
    let formatted = manifest.emit(options);
    let changed = formatted != original;

    if stdout {
        print!("{formatted}");
        return Ok(EXIT_SUCCESS);
    }

    if check {
        if changed {
            return Err(format!(
                "{} is not formatted (run 'reqlist fmt')",
                manifest_path.display()
            ));
        }
        if json {
            let payload = serde_json::json!({
                "status": "formatted",
                "manifest": manifest_path,
            });
            println!("{}", json_pretty(&payload)?);
        }
        return Ok(EXIT_SUCCESS);
    }

    if changed {
        info!("rewriting {}", manifest_path.display());
        write_manifest_file(manifest_path, &manifest, options).map_err(|e| e.to_string())?;
    }

    if json {
        let payload = serde_json::json!({
            "status": if changed { "rewritten" } else { "unchanged" },
            "manifest": manifest_path,
        });
        println!("{}", json_pretty(&payload)?);
    } else if changed {
        println!("formatted {}", manifest_path.display());
    } else {
        println!("{} already formatted", manifest_path.display());
    }
    Ok(EXIT_SUCCESS)
}
