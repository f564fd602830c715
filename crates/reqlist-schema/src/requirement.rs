use crate::types::PackageName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Version comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Comparator {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "~=")]
    Compatible,
}

impl Comparator {
    pub const ALL: [Comparator; 6] = [
        Comparator::Eq,
        Comparator::Ge,
        Comparator::Le,
        Comparator::Compatible,
        Comparator::Gt,
        Comparator::Lt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Comparator::Eq => "==",
            Comparator::Ge => ">=",
            Comparator::Le => "<=",
            Comparator::Gt => ">",
            Comparator::Lt => "<",
            Comparator::Compatible => "~=",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionClause {
    pub comparator: Comparator,
    pub version: String,
}

impl fmt::Display for VersionClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.comparator, self.version)
    }
}

/// One or more comma-joined clauses, e.g. `>=1.0,<2.0`.
///
/// Never empty when produced by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionConstraint {
    clauses: Vec<VersionClause>,
}

impl VersionConstraint {
    pub fn new(clauses: Vec<VersionClause>) -> Self {
        Self { clauses }
    }

    pub fn clauses(&self) -> &[VersionClause] {
        &self.clauses
    }

    /// The version of a single `==` clause, if that is all the constraint says.
    pub fn exact_pin(&self) -> Option<&str> {
        match self.clauses.as_slice() {
            [VersionClause {
                comparator: Comparator::Eq,
                version,
            }] if !version.contains('*') => Some(version.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}

impl PartialEq<str> for VersionConstraint {
    fn eq(&self, other: &str) -> bool {
        self.to_string() == other
    }
}

impl PartialEq<&str> for VersionConstraint {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

/// An active requirement declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: PackageName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_constraint: Option<VersionConstraint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_comment: Option<String>,
}

impl Dependency {
    /// An unconstrained requirement on `name`.
    pub fn new(name: impl Into<PackageName>) -> Self {
        Self {
            name: name.into(),
            extras: None,
            version_constraint: None,
            marker: None,
            inline_comment: None,
        }
    }

    #[must_use]
    pub fn with_constraint(mut self, constraint: VersionConstraint) -> Self {
        self.version_constraint = Some(constraint);
        self
    }

    pub fn is_pinned(&self) -> bool {
        self.version_constraint
            .as_ref()
            .and_then(VersionConstraint::exact_pin)
            .is_some()
    }

    /// The requirement text without its inline comment, e.g. `smplx[all]>=0.1`.
    pub fn requirement_text(&self, name: &str) -> String {
        let mut out = name.to_owned();
        if let Some(extras) = &self.extras {
            out.push('[');
            out.push_str(&extras.iter().map(String::as_str).collect::<Vec<_>>().join(","));
            out.push(']');
        }
        if let Some(constraint) = &self.version_constraint {
            out.push_str(&constraint.to_string());
        }
        if let Some(marker) = &self.marker {
            out.push_str(" ; ");
            out.push_str(marker);
        }
        out
    }
}

/// A single classified manifest line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DependencyLine {
    Blank,
    Comment { text: String },
    Dependency(Dependency),
}

impl DependencyLine {
    pub fn as_dependency(&self) -> Option<&Dependency> {
        match self {
            DependencyLine::Dependency(dep) => Some(dep),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, DependencyLine::Dependency(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause(comparator: Comparator, version: &str) -> VersionClause {
        VersionClause {
            comparator,
            version: version.to_owned(),
        }
    }

    #[test]
    fn constraint_displays_joined_clauses() {
        let c = VersionConstraint::new(vec![
            clause(Comparator::Ge, "1.0"),
            clause(Comparator::Lt, "2.0"),
        ]);
        assert_eq!(c.to_string(), ">=1.0,<2.0");
        assert_eq!(c, ">=1.0,<2.0");
    }

    #[test]
    fn exact_pin_requires_single_eq_clause() {
        let pinned = VersionConstraint::new(vec![clause(Comparator::Eq, "2.3.0")]);
        assert_eq!(pinned.exact_pin(), Some("2.3.0"));

        let wildcard = VersionConstraint::new(vec![clause(Comparator::Eq, "2.*")]);
        assert_eq!(wildcard.exact_pin(), None);

        let range = VersionConstraint::new(vec![
            clause(Comparator::Eq, "1.0"),
            clause(Comparator::Lt, "2.0"),
        ]);
        assert_eq!(range.exact_pin(), None);
    }

    #[test]
    fn requirement_text_includes_extras_and_marker() {
        let mut dep = Dependency::new("imageio")
            .with_constraint(VersionConstraint::new(vec![clause(Comparator::Eq, "2.34.1")]));
        dep.extras = Some(["pyav".to_owned(), "ffmpeg".to_owned()].into_iter().collect());
        dep.marker = Some("python_version >= \"3.9\"".to_owned());
        assert_eq!(
            dep.requirement_text(dep.name.as_str()),
            "imageio[ffmpeg,pyav]==2.34.1 ; python_version >= \"3.9\""
        );
    }

    #[test]
    fn comparator_serializes_as_operator() {
        let json = serde_json::to_string(&Comparator::Compatible).unwrap();
        assert_eq!(json, "\"~=\"");
    }

    #[test]
    fn line_json_is_tagged() {
        let line = DependencyLine::Comment {
            text: "SfM".to_owned(),
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["kind"], "comment");
        assert_eq!(json["text"], "SfM");
    }
}
