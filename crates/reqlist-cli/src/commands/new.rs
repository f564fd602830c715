use super::{json_pretty, EXIT_SUCCESS};
use dialoguer::{Confirm, Select};
use reqlist_schema::{
    get_template, list_templates, parse_manifest_str, write_manifest_file, EmitOptions, Manifest,
};
use std::io::{stderr, stdin, IsTerminal};
use std::path::Path;
use tracing::info;

fn load_template(name: &str) -> Result<Manifest, String> {
    let template = get_template(name).ok_or_else(|| {
        let known: Vec<&str> = list_templates().iter().map(|t| t.name).collect();
        format!("unknown template '{name}' (expected: {})", known.join(", "))
    })?;
    parse_manifest_str(template.manifest).map_err(|e| format!("template parse error: {e}"))
}

fn prompt_template() -> Result<&'static str, String> {
    let templates = list_templates();
    let items: Vec<String> = templates
        .iter()
        .map(|t| format!("{:<16} {}", t.name, t.description))
        .collect();
    let idx = Select::new()
        .with_prompt("template")
        .items(&items)
        .default(0)
        .interact()
        .map_err(|e| format!("prompt failed: {e}"))?;
    Ok(templates[idx].name)
}

fn ensure_can_write(dest: &Path, force: bool, is_tty: bool) -> Result<(), String> {
    if !dest.exists() || force {
        return Ok(());
    }
    let refusal = format!("refusing to overwrite existing {} (pass --force)", dest.display());
    if !is_tty {
        return Err(refusal);
    }
    let overwrite = Confirm::new()
        .with_prompt(format!("overwrite {}?", dest.display()))
        .default(false)
        .interact()
        .map_err(|e| format!("prompt failed: {e}"))?;
    if overwrite {
        Ok(())
    } else {
        Err(refusal)
    }
}

pub fn run(
    dest: &Path,
    template: Option<&str>,
    force: bool,
    options: &EmitOptions,
    json: bool,
) -> Result<u8, String> {
    let is_tty = stdin().is_terminal() && stderr().is_terminal();

    let template_name = match template {
        Some(name) => name,
        None if is_tty => prompt_template()?,
        None => return Err("no --template provided and stdin is not a TTY".to_owned()),
    };
    let manifest = load_template(template_name)?;
    ensure_can_write(dest, force, is_tty)?;

    info!("writing template '{template_name}' to {}", dest.display());
    write_manifest_file(dest, &manifest, options).map_err(|e| e.to_string())?;

    if json {
        let payload = serde_json::json!({
            "status": "written",
            "path": dest,
            "template": template_name,
            "active": manifest.active_count(),
        });
        println!("{}", json_pretty(&payload)?);
    } else {
        println!(
            "wrote {} from template '{template_name}' ({} requirements)",
            dest.display(),
            manifest.active_count()
        );
    }
    Ok(EXIT_SUCCESS)
}
