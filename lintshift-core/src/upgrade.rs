use crate::{LintToolConfig, Manifest, Section};
use lintshift_semver::min_major;
use tracing::debug;

/// Whether `existing` must be replaced by `target`.
///
/// Only a strictly older major is upgraded. A range that cannot be reduced to a
/// major version (`latest`, `github:...`) is treated as outdated.
pub fn needs_upgrade(existing: &str, target: &str) -> bool {
    match (min_major(existing), min_major(target)) {
        (Ok(existing), Ok(target)) => target > existing,
        (Err(err), _) | (_, Err(err)) => {
            debug!("cannot compare {existing:?} with {target:?}: {err}");
            true
        }
    }
}

/// Makes sure `devDependencies[tool]` exists and is at least the target major.
pub fn upgrade_dev_dependency(manifest: &Manifest, config: &LintToolConfig) -> Manifest {
    let outdated = match manifest.get(Section::DevDependencies, config.name()) {
        None => true,
        Some(existing) => existing
            .as_str()
            .is_none_or(|existing| needs_upgrade(existing, config.version)),
    };

    if outdated {
        manifest.with_entry(Section::DevDependencies, config.name(), config.version)
    } else {
        manifest.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LintTool;
    use crate::config::lint_tool;
    use serde_json::{Value, json};
    use std::path::Path;

    fn manifest(value: Value) -> Manifest {
        Manifest::from_value(Path::new("package.json"), value).unwrap()
    }

    fn upgraded_eslint(value: Value) -> Option<String> {
        let next = upgrade_dev_dependency(&manifest(value), lint_tool(LintTool::Eslint));
        next.get_str(Section::DevDependencies, "eslint")
            .map(str::to_string)
    }

    #[test]
    fn adds_missing_tool() {
        assert_eq!(upgraded_eslint(json!({})).as_deref(), Some("^8.0.0"));
        assert_eq!(
            upgraded_eslint(json!({ "dependencies": { "eslint": "^7.0.0" } })).as_deref(),
            Some("^8.0.0")
        );
    }

    #[test]
    fn upgrades_older_major() {
        assert_eq!(
            upgraded_eslint(json!({ "devDependencies": { "eslint": "^7.0.0" } })).as_deref(),
            Some("^8.0.0")
        );
    }

    #[test]
    fn never_downgrades_or_touches_satisfied_installs() {
        for existing in ["^8.5.0", "^9.0.0", "~8.0.1", ">=8"] {
            assert_eq!(
                upgraded_eslint(json!({ "devDependencies": { "eslint": existing } })).as_deref(),
                Some(existing)
            );
        }
    }

    #[test]
    fn unparsable_ranges_are_overwritten() {
        for existing in [json!("latest"), json!("npm:eslint@8"), json!(8)] {
            assert_eq!(
                upgraded_eslint(json!({ "devDependencies": { "eslint": existing } })).as_deref(),
                Some("^8.0.0")
            );
        }
    }

    #[test]
    fn ranges_overflowing_the_version_space_are_overwritten() {
        for existing in [">1.2.18446744073709551615", ">18446744073709551615"] {
            assert_eq!(
                upgraded_eslint(json!({ "devDependencies": { "eslint": existing } })).as_deref(),
                Some("^8.0.0")
            );
        }
    }

    #[test]
    fn compares_major_versions_only() {
        assert!(needs_upgrade("^7.32.0", "^8.0.0"));
        assert!(!needs_upgrade("^8.0.0", "^8.9.0"));
        assert!(needs_upgrade("^8.0.0", "not a range"));
    }
}
