use super::EXIT_SUCCESS;
use clap::{Command, CommandFactory};
use std::path::Path;
use tracing::debug;

pub fn run<C: CommandFactory>(dir: &Path) -> Result<u8, String> {
    std::fs::create_dir_all(dir).map_err(|e| format!("failed to create dir: {e}"))?;
    let cmd = C::command();
    write_page(cmd.clone(), &dir.join("reqlist.1"))?;
    for sub in cmd.get_subcommands() {
        write_page(sub.clone(), &dir.join(format!("reqlist-{}.1", sub.get_name())))?;
    }
    println!("man pages written to {}", dir.display());
    Ok(EXIT_SUCCESS)
}

fn write_page(cmd: Command, path: &Path) -> Result<(), String> {
    let mut buf = Vec::new();
    clap_mangen::Man::new(cmd)
        .render(&mut buf)
        .map_err(|e| format!("man page render failed: {e}"))?;
    std::fs::write(path, &buf).map_err(|e| format!("failed to write {}: {e}", path.display()))?;
    debug!("wrote {}", path.display());
    Ok(())
}
