use crate::manifest::Manifest;
use crate::requirement::{Dependency, DependencyLine};
use serde::{Deserialize, Serialize};

/// Controls how a [`Manifest`] is written back to text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmitOptions {
    /// Spaces between a requirement and its inline comment.
    pub inline_comment_gap: usize,
    /// Write names in PEP 503 canonical form instead of as declared.
    pub canonical_names: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            inline_comment_gap: 2,
            canonical_names: false,
        }
    }
}

impl Manifest {
    /// Regenerate manifest text, one line per element, newline-terminated.
    pub fn emit(&self, options: &EmitOptions) -> String {
        let mut out = String::new();
        for line in self.lines() {
            out.push_str(&emit_line(line, options));
            out.push('\n');
        }
        out
    }
}

pub fn emit_line(line: &DependencyLine, options: &EmitOptions) -> String {
    match line {
        DependencyLine::Blank => String::new(),
        DependencyLine::Comment { text } if text.is_empty() => "#".to_owned(),
        DependencyLine::Comment { text } => format!("# {text}"),
        DependencyLine::Dependency(dep) => emit_dependency(dep, options),
    }
}

fn emit_dependency(dep: &Dependency, options: &EmitOptions) -> String {
    let name = if options.canonical_names {
        dep.name.canonical()
    } else {
        dep.name.to_string()
    };
    let mut out = dep.requirement_text(&name);
    if let Some(comment) = &dep.inline_comment {
        out.push_str(&" ".repeat(options.inline_comment_gap.max(1)));
        if comment.is_empty() {
            out.push('#');
        } else {
            out.push_str("# ");
            out.push_str(comment);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::parse_manifest_str;

    const MESSY: &str = "\
   #   PyTorch
lightning == 2.3.0
numpy>=1.23 ,<2.0
imageio[pyav , ffmpeg]==2.34.1#fast path
ultralytics==8.3.146        # YOLO

#
";

    #[test]
    fn normalizes_whitespace() {
        let manifest = parse_manifest_str(MESSY).unwrap();
        assert_eq!(
            manifest.emit(&EmitOptions::default()),
            "\
# PyTorch
lightning==2.3.0
numpy>=1.23,<2.0
imageio[ffmpeg,pyav]==2.34.1  # fast path
ultralytics==8.3.146  # YOLO

#
"
        );
    }

    #[test]
    fn reparse_of_emitted_text_is_identical() {
        let first = parse_manifest_str(MESSY).unwrap();
        let emitted = first.emit(&EmitOptions::default());
        let second = parse_manifest_str(&emitted).unwrap();
        assert_eq!(first, second);
        assert_eq!(second.emit(&EmitOptions::default()), emitted);
    }

    #[test]
    fn canonical_names_option() {
        let manifest = parse_manifest_str("hydra_colorlog\ntensorboardX>=2.6\n").unwrap();
        let opts = EmitOptions {
            canonical_names: true,
            ..EmitOptions::default()
        };
        assert_eq!(manifest.emit(&opts), "hydra-colorlog\ntensorboardx>=2.6\n");
    }

    #[test]
    fn comment_gap_is_at_least_one_space() {
        let manifest = parse_manifest_str("rich # pretty output\n").unwrap();
        let opts = EmitOptions {
            inline_comment_gap: 0,
            ..EmitOptions::default()
        };
        assert_eq!(manifest.emit(&opts), "rich # pretty output\n");
    }

    #[test]
    fn empty_inline_comment_keeps_its_place() {
        let manifest = parse_manifest_str("rich #\n").unwrap();
        assert_eq!(manifest.to_string(), "rich  #\n");
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let opts: EmitOptions = toml::from_str("canonical_names = true").unwrap();
        assert_eq!(opts.inline_comment_gap, 2);
        assert!(opts.canonical_names);
        assert!(toml::from_str::<EmitOptions>("sort = true").is_err());
    }
}
