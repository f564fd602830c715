use crate::emit::EmitOptions;
use crate::parser::{parse_disabled_pin, parse_line, ParseError};
use crate::requirement::{Dependency, DependencyLine};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to write manifest {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse manifest: {0}")]
    Parse(#[from] ParseError),
    #[error("duplicate requirement '{name}' on lines {first_line} and {second_line}")]
    DuplicateRequirement {
        name: String,
        first_line: usize,
        second_line: usize,
    },
}

/// An ordered requirements manifest. Element `i` is line `i + 1` of the source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    lines: Vec<DependencyLine>,
}

/// A commented-out requirement, reported with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisabledPin {
    pub line: usize,
    pub dependency: Dependency,
}

impl Manifest {
    pub fn new(lines: Vec<DependencyLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[DependencyLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Active requirements in declaration order.
    pub fn dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.lines.iter().filter_map(DependencyLine::as_dependency)
    }

    /// Active requirements paired with their 1-based line numbers.
    pub fn dependencies_with_lines(&self) -> impl Iterator<Item = (usize, &Dependency)> {
        self.lines
            .iter()
            .enumerate()
            .filter_map(|(idx, line)| line.as_dependency().map(|dep| (idx + 1, dep)))
    }

    pub fn active_count(&self) -> usize {
        self.dependencies().count()
    }

    pub fn comment_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, DependencyLine::Comment { .. }))
            .count()
    }

    /// Names of all active requirements, as written.
    pub fn names(&self) -> BTreeSet<&str> {
        self.dependencies().map(|d| d.name.as_str()).collect()
    }

    /// First active requirement whose canonical name matches `name`.
    pub fn get(&self, name: &str) -> Option<&Dependency> {
        self.dependencies().find(|d| d.name.same_package(name))
    }

    /// Comments that hold a version-constrained requirement. They are never
    /// part of the active set.
    pub fn disabled_pins(&self) -> Vec<DisabledPin> {
        self.lines
            .iter()
            .enumerate()
            .filter_map(|(idx, line)| match line {
                DependencyLine::Comment { text } => parse_disabled_pin(text).map(|dependency| {
                    DisabledPin {
                        line: idx + 1,
                        dependency,
                    }
                }),
                _ => None,
            })
            .collect()
    }
}

impl FromStr for Manifest {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        let lines = input
            .lines()
            .enumerate()
            .map(|(idx, raw)| parse_line(idx + 1, raw))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { lines })
    }
}

impl fmt::Display for Manifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.emit(&EmitOptions::default()))
    }
}

pub fn parse_manifest_str(input: &str) -> Result<Manifest, ManifestError> {
    let manifest: Manifest = input.parse()?;
    debug!(
        "parsed {} lines, {} active requirements",
        manifest.lines.len(),
        manifest.active_count()
    );
    Ok(manifest)
}

pub fn parse_manifest_file(path: impl AsRef<Path>) -> Result<Manifest, ManifestError> {
    let path = path.as_ref();
    debug!("reading manifest {}", path.display());
    let content = fs::read_to_string(path)?;
    parse_manifest_str(&content)
}

/// Emit `manifest` to `path` through a temp file in the same directory.
pub fn write_manifest_file(
    path: impl AsRef<Path>,
    manifest: &Manifest,
    options: &EmitOptions,
) -> Result<(), ManifestError> {
    let path = path.as_ref();
    let content = manifest.emit(options);
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let write_err = |source: std::io::Error| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    std::io::Write::write_all(&mut tmp, content.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    if let Ok(f) = fs::File::open(dir) {
        let _ = f.sync_all();
    }
    debug!("wrote manifest {}", path.display());
    Ok(())
}
