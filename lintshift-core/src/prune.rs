use crate::{Manifest, Section};
use regex::Regex;
use serde_json::{Map, Value};

/// Drops every dependency whose name matches `pattern`, in `dependencies` and
/// `devDependencies` alike. A section left empty is removed from the manifest.
pub fn prune_dependencies(manifest: &Manifest, pattern: &Regex) -> Manifest {
    let mut next = manifest.clone();

    for section in Section::DEPENDENCIES {
        let Some(map) = manifest.section(section) else {
            continue;
        };

        let kept: Map<String, Value> = map
            .iter()
            .filter(|(name, _)| !pattern.is_match(name))
            .map(|(name, range)| (name.clone(), range.clone()))
            .collect();

        if kept.is_empty() {
            next = next.without_section(section);
        } else if kept.len() != map.len() {
            next = next.with_section(section, kept);
        }
    }

    next
}

/// Names `prune_dependencies` would remove from `section`, in document order.
pub fn matching_dependencies<'a>(
    manifest: &'a Manifest,
    section: Section,
    pattern: &Regex,
) -> Vec<&'a str> {
    manifest
        .names(section)
        .filter(|name| pattern.is_match(name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LintTool;
    use crate::config::lint_tool;
    use serde_json::json;
    use std::path::Path;

    fn manifest(value: Value) -> Manifest {
        Manifest::from_value(Path::new("package.json"), value).unwrap()
    }

    fn eslint_pattern() -> &'static Regex {
        lint_tool(LintTool::Eslint).removal_pattern()
    }

    #[test]
    fn removes_matching_packages_from_both_sections() {
        let m = manifest(json!({
            "dependencies": { "eslint-plugin-react": "^7.0.0", "react": "^18.0.0" },
            "devDependencies": { "eslint": "^8.0.0", "eslint-config-ali": "^13.0.0" }
        }));

        let next = prune_dependencies(&m, eslint_pattern());

        assert_eq!(
            next.names(Section::Dependencies).collect::<Vec<_>>(),
            vec!["react"]
        );
        assert_eq!(
            next.names(Section::DevDependencies).collect::<Vec<_>>(),
            vec!["eslint"]
        );
    }

    #[test]
    fn drops_sections_left_empty() {
        let m = manifest(json!({
            "name": "app",
            "dependencies": { "eslint-plugin-x": "^1.0.0" }
        }));

        let next = prune_dependencies(&m, eslint_pattern());

        assert!(!next.fields().contains_key("dependencies"));
        assert!(!next.fields().contains_key("devDependencies"));
        assert_eq!(next.fields().get("name"), Some(&json!("app")));
    }

    #[test]
    fn drops_already_empty_sections_and_keeps_absent_ones_absent() {
        let m = manifest(json!({ "dependencies": {}, "scripts": {} }));

        let next = prune_dependencies(&m, eslint_pattern());

        assert!(!next.fields().contains_key("dependencies"));
        assert!(!next.fields().contains_key("devDependencies"));
        assert!(next.fields().contains_key("scripts"));
    }

    #[test]
    fn untouched_when_nothing_matches() {
        let m = manifest(json!({ "dependencies": { "react": "^18.0.0" } }));
        assert_eq!(prune_dependencies(&m, eslint_pattern()), m);
    }

    #[test]
    fn lists_matching_names() {
        let m = manifest(json!({
            "devDependencies": {
                "eslint-plugin-a": "1",
                "typescript": "5",
                "eslint-config-b": "2"
            }
        }));

        assert_eq!(
            matching_dependencies(&m, Section::DevDependencies, eslint_pattern()),
            vec!["eslint-plugin-a", "eslint-config-b"]
        );
    }
}
