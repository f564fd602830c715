//! Parsing, emission, normalization and identity for pip-style requirements manifests.
//!
//! This crate defines the schema layer: line classification and requirement
//! grammar (`parse_manifest_str`), the ordered `Manifest` model and its
//! whitespace-normalizing emitter, the canonical `NormalizedManifest`,
//! deterministic identity (`compute_manifest_id`), manifest diffs, and the
//! built-in templates.

pub mod diff;
pub mod emit;
pub mod identity;
pub mod manifest;
pub mod normalize;
pub mod parser;
pub mod requirement;
pub mod template;
pub mod types;

pub use diff::{diff_manifests, ManifestDiff, RequirementChange};
pub use emit::{emit_line, EmitOptions};
pub use identity::{compute_manifest_id, ManifestIdentity};
pub use manifest::{
    parse_manifest_file, parse_manifest_str, write_manifest_file, DisabledPin, Manifest,
    ManifestError,
};
pub use normalize::{NormalizedManifest, NormalizedRequirement};
pub use parser::{parse_line, ParseError, ParseErrorKind};
pub use requirement::{Comparator, Dependency, DependencyLine, VersionClause, VersionConstraint};
pub use template::{get_template, list_templates, Template, BUILTIN_TEMPLATES};
pub use types::{canonicalize_name, ManifestId, PackageName, ShortId};
