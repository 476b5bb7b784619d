//! Ecosystem tags and the marker table that maps directory contents to them.

use std::fmt;

use serde::Serialize;

/// The inferred category of project occupying a working directory.
///
/// The set is closed and known at build time; `Default` is the guaranteed
/// fallback when no marker matches, so detection never produces "no tag".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EcosystemTag {
    Nodejs,
    Python,
    Rust,
    Go,
    Java,
    Dotnet,
    Ruby,
    Default,
}

impl EcosystemTag {
    pub fn as_str(self) -> &'static str {
        match self {
            EcosystemTag::Nodejs => "nodejs",
            EcosystemTag::Python => "python",
            EcosystemTag::Rust => "rust",
            EcosystemTag::Go => "go",
            EcosystemTag::Java => "java",
            EcosystemTag::Dotnet => "dotnet",
            EcosystemTag::Ruby => "ruby",
            EcosystemTag::Default => "default",
        }
    }
}

impl fmt::Display for EcosystemTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for EcosystemTag {
    fn default() -> Self {
        EcosystemTag::Default
    }
}

/// A filename that signals an ecosystem, either exact or as a glob pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Name(&'static str),
    Glob(&'static str),
}

/// Association of an ecosystem tag with the markers that signal it.
#[derive(Debug)]
pub struct MarkerRule {
    pub tag: EcosystemTag,
    pub markers: &'static [Marker],
}

/// The detection table. The first rule with any matching marker wins, so
/// the order here is load-bearing and must stay stable: a directory with
/// both package.json and requirements.txt is nodejs, not python.
pub const MARKER_RULES: &[MarkerRule] = &[
    MarkerRule {
        tag: EcosystemTag::Nodejs,
        markers: &[Marker::Name("package.json")],
    },
    MarkerRule {
        tag: EcosystemTag::Python,
        markers: &[
            Marker::Name("requirements.txt"),
            Marker::Name("pyproject.toml"),
            Marker::Name("setup.py"),
            Marker::Name("setup.cfg"),
            Marker::Name("Pipfile"),
        ],
    },
    MarkerRule {
        tag: EcosystemTag::Rust,
        markers: &[Marker::Name("Cargo.toml")],
    },
    MarkerRule {
        tag: EcosystemTag::Go,
        markers: &[Marker::Name("go.mod")],
    },
    MarkerRule {
        tag: EcosystemTag::Java,
        markers: &[
            Marker::Name("pom.xml"),
            Marker::Name("build.gradle"),
            Marker::Name("build.gradle.kts"),
        ],
    },
    MarkerRule {
        tag: EcosystemTag::Dotnet,
        markers: &[
            Marker::Glob("*.csproj"),
            Marker::Glob("*.fsproj"),
            Marker::Glob("*.vbproj"),
        ],
    },
    MarkerRule {
        tag: EcosystemTag::Ruby,
        markers: &[Marker::Name("Gemfile")],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_table_order_is_stable() {
        let order: Vec<EcosystemTag> = MARKER_RULES.iter().map(|rule| rule.tag).collect();
        assert_eq!(
            order,
            vec![
                EcosystemTag::Nodejs,
                EcosystemTag::Python,
                EcosystemTag::Rust,
                EcosystemTag::Go,
                EcosystemTag::Java,
                EcosystemTag::Dotnet,
                EcosystemTag::Ruby,
            ]
        );
    }

    #[test]
    fn fallback_tag_is_not_in_the_table() {
        assert!(MARKER_RULES
            .iter()
            .all(|rule| rule.tag != EcosystemTag::Default));
    }

    #[test]
    fn tags_serialize_as_lowercase_strings() {
        assert_eq!(
            serde_json::to_value(EcosystemTag::Nodejs).unwrap(),
            serde_json::json!("nodejs")
        );
        assert_eq!(
            serde_json::to_value(EcosystemTag::Default).unwrap(),
            serde_json::json!("default")
        );
    }

    #[test]
    fn display_matches_wire_name() {
        assert_eq!(EcosystemTag::Dotnet.to_string(), "dotnet");
        assert_eq!(EcosystemTag::Go.as_str(), "go");
    }
}
