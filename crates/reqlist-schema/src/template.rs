use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub description: &'static str,
    pub manifest: &'static str,
}

pub const BUILTIN_TEMPLATES: &[Template] = &[
    Template {
        name: "motion-capture",
        description: "Human motion recovery pipeline: training, vision, body models, tracking, SfM",
        manifest: include_str!("../templates/motion-capture.txt"),
    },
    Template {
        name: "tracking",
        description: "YOLO detection with linear-assignment multi-object tracking",
        manifest: include_str!("../templates/tracking.txt"),
    },
    Template {
        name: "minimal",
        description: "Single unconstrained requirement with a format reminder",
        manifest: include_str!("../templates/minimal.txt"),
    },
];

pub fn get_template(name: &str) -> Option<&'static Template> {
    BUILTIN_TEMPLATES.iter().find(|t| t.name == name)
}

pub fn list_templates() -> &'static [Template] {
    BUILTIN_TEMPLATES
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::parse_manifest_str;

    #[test]
    fn all_templates_parse_and_normalize() {
        for template in BUILTIN_TEMPLATES {
            let result = parse_manifest_str(template.manifest).and_then(|m| m.normalize());
            assert!(
                result.is_ok(),
                "template '{}' failed: {:?}",
                template.name,
                result.err()
            );
        }
    }

    #[test]
    fn get_template_by_name() {
        assert!(get_template("motion-capture").is_some());
        assert!(get_template("nonexistent").is_none());
    }

    #[test]
    fn all_templates_have_unique_names() {
        let mut names: Vec<&str> = BUILTIN_TEMPLATES.iter().map(|t| t.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), BUILTIN_TEMPLATES.len());
    }

    #[test]
    fn motion_capture_active_set_matches_line_count() {
        let text = get_template("motion-capture").unwrap().manifest;
        let manifest = parse_manifest_str(text).unwrap();

        let expected = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .count();
        assert_eq!(manifest.active_count(), expected);

        let names = manifest.names();
        for name in [
            "lightning",
            "hydra-core",
            "hydra_colorlog",
            "rich",
            "matplotlib",
            "ipdb",
            "setuptools",
            "black",
            "tensorboardX",
            "opencv-python",
            "ffmpeg-python",
            "scikit-image",
            "termcolor",
            "einops",
            "joblib",
            "trimesh",
            "chumpy",
            "smplx",
            "wis3d",
            "pycolmap",
            "ultralytics",
            "cython_bbox",
            "lapx",
            "yacs",
        ] {
            assert!(names.contains(name), "missing requirement '{name}'");
        }
        assert!(!names.contains("torch"));
    }

    #[test]
    fn motion_capture_roundtrips_byte_for_byte() {
        let text = get_template("motion-capture").unwrap().manifest;
        let manifest = parse_manifest_str(text).unwrap();
        assert_eq!(manifest.to_string(), text);
        assert_eq!(manifest.disabled_pins().len(), 5);
    }
}
