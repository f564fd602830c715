//! Line classification and the dependency-token grammar.
//!
//! ```text
//! line        := blank | "#" text | requirement [ "#" text ]
//! requirement := name [ "[" extra ("," extra)* "]" ] [ clause ("," clause)* ] [ ";" marker ]
//! clause      := ("==" | ">=" | "<=" | "~=" | ">" | "<") version
//! ```
//!
//! Whitespace is allowed between the parts of a requirement. The inline
//! comment starts at the first `#` that is not preceded by a backslash.

use crate::requirement::{Comparator, Dependency, DependencyLine, VersionClause, VersionConstraint};
use std::collections::BTreeSet;
use thiserror::Error;

/// A manifest line that does not follow the requirement grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}: '{text}'")]
pub struct ParseError {
    /// 1-based line number.
    pub line: usize,
    /// The offending line, verbatim.
    pub text: String,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("expected a package name")]
    MissingName,
    #[error("unterminated extras list")]
    UnterminatedExtras,
    #[error("invalid extra name '{0}'")]
    InvalidExtra(String),
    #[error("malformed version comparator '{0}'")]
    MalformedComparator(String),
    #[error("comparator '{0}' is missing a version")]
    MissingVersion(String),
    #[error("trailing ',' in version constraint")]
    TrailingComma,
    #[error("empty environment marker after ';'")]
    EmptyMarker,
    #[error("unexpected input '{0}'")]
    UnexpectedInput(String),
}

/// Classify one manifest line. `line` is the 1-based line number used in errors.
pub fn parse_line(line: usize, raw: &str) -> Result<DependencyLine, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(DependencyLine::Blank);
    }
    if let Some(rest) = trimmed.strip_prefix('#') {
        return Ok(DependencyLine::Comment {
            text: rest.trim().to_owned(),
        });
    }

    let (token, comment) = split_inline_comment(trimmed);
    let mut dep = parse_requirement(token.trim()).map_err(|kind| ParseError {
        line,
        text: raw.to_owned(),
        kind,
    })?;
    dep.inline_comment = comment.map(|c| c.trim().to_owned());
    Ok(DependencyLine::Dependency(dep))
}

/// Parse comment text as a requirement, accepting it only when it carries a
/// version constraint. Used to surface commented-out pins.
pub fn parse_disabled_pin(text: &str) -> Option<Dependency> {
    let (token, comment) = split_inline_comment(text.trim());
    let mut dep = parse_requirement(token.trim()).ok()?;
    dep.version_constraint.as_ref()?;
    dep.inline_comment = comment.map(|c| c.trim().to_owned());
    Some(dep)
}

fn split_inline_comment(line: &str) -> (&str, Option<&str>) {
    let mut prev = None;
    for (idx, c) in line.char_indices() {
        if c == '#' && prev != Some('\\') {
            return (&line[..idx], Some(&line[idx + 1..]));
        }
        prev = Some(c);
    }
    (line, None)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

fn is_version_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-' | '_' | '*' | '!')
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '=' | '<' | '>' | '~' | '!')
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn is_done(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Consume an identifier that starts with an ASCII alphanumeric.
    fn take_identifier(&mut self, class: fn(char) -> bool) -> &'a str {
        let start = self.pos;
        if !self.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
            return "";
        }
        while self.peek().is_some_and(class) {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    fn take_while(&mut self, pred: fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(pred) {
            self.bump();
        }
        &self.src[start..self.pos]
    }
}

fn parse_requirement(token: &str) -> Result<Dependency, ParseErrorKind> {
    let mut cur = Cursor::new(token);

    let name = cur.take_identifier(is_name_char);
    if name.is_empty() {
        return Err(ParseErrorKind::MissingName);
    }
    let mut dep = Dependency::new(name);

    cur.skip_whitespace();
    if cur.peek() == Some('[') {
        dep.extras = Some(parse_extras(&mut cur)?);
        cur.skip_whitespace();
    }

    if cur.peek().is_some_and(is_operator_char) {
        dep.version_constraint = Some(parse_constraint(&mut cur)?);
        cur.skip_whitespace();
    }

    if cur.peek() == Some(';') {
        cur.bump();
        let marker = cur.rest().trim();
        if marker.is_empty() {
            return Err(ParseErrorKind::EmptyMarker);
        }
        dep.marker = Some(marker.to_owned());
        return Ok(dep);
    }

    if !cur.is_done() {
        return Err(ParseErrorKind::UnexpectedInput(cur.rest().to_owned()));
    }
    Ok(dep)
}

fn parse_extras(cur: &mut Cursor<'_>) -> Result<BTreeSet<String>, ParseErrorKind> {
    cur.bump();
    let rest = cur.rest();
    let Some(close) = rest.find(']') else {
        return Err(ParseErrorKind::UnterminatedExtras);
    };
    let inner = &rest[..close];
    cur.pos += close + 1;

    let mut extras = BTreeSet::new();
    if inner.trim().is_empty() {
        return Ok(extras);
    }
    for raw in inner.split(',') {
        let extra = raw.trim();
        let mut sub = Cursor::new(extra);
        let ident = sub.take_identifier(is_name_char);
        if ident.is_empty() || !sub.is_done() {
            return Err(ParseErrorKind::InvalidExtra(extra.to_owned()));
        }
        extras.insert(ident.to_owned());
    }
    Ok(extras)
}

fn parse_constraint(cur: &mut Cursor<'_>) -> Result<VersionConstraint, ParseErrorKind> {
    let mut clauses = Vec::new();
    loop {
        let comparator = parse_comparator(cur)?;
        cur.skip_whitespace();
        let version = cur.take_identifier(is_version_char);
        if version.is_empty() {
            return Err(ParseErrorKind::MissingVersion(comparator.as_str().to_owned()));
        }
        clauses.push(VersionClause {
            comparator,
            version: version.to_owned(),
        });

        cur.skip_whitespace();
        if cur.peek() != Some(',') {
            break;
        }
        cur.bump();
        cur.skip_whitespace();
        if cur.is_done() || cur.peek() == Some(';') {
            return Err(ParseErrorKind::TrailingComma);
        }
    }
    Ok(VersionConstraint::new(clauses))
}

fn parse_comparator(cur: &mut Cursor<'_>) -> Result<Comparator, ParseErrorKind> {
    let run = cur.take_while(is_operator_char);
    Comparator::ALL
        .into_iter()
        .find(|op| op.as_str() == run)
        .ok_or_else(|| ParseErrorKind::MalformedComparator(run.to_owned()))
}
