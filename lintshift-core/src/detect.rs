use crate::config::is_deprecated;
use crate::{Manifest, Section};

/// First deprecated package among `dependencies` and `devDependencies`.
///
/// Names are visited as if both sections were merged with `devDependencies`
/// winning: `dependencies` in document order, then the `devDependencies` names
/// not seen yet.
pub fn find_deprecated(manifest: &Manifest) -> Option<&str> {
    let dependencies = manifest.names(Section::Dependencies);
    let dev_only = manifest
        .names(Section::DevDependencies)
        .filter(|name| !manifest.contains(Section::Dependencies, name));

    dependencies.chain(dev_only).find(|name| is_deprecated(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::path::Path;

    fn manifest(value: Value) -> Manifest {
        Manifest::from_value(Path::new("package.json"), value).unwrap()
    }

    #[test]
    fn finds_nothing_in_clean_manifest() {
        let m = manifest(json!({
            "dependencies": { "react": "^18.0.0" },
            "devDependencies": { "eslint": "^8.0.0" }
        }));
        assert_eq!(find_deprecated(&m), None);
        assert_eq!(find_deprecated(&Manifest::default()), None);
    }

    #[test]
    fn finds_deprecated_in_either_section() {
        let m = manifest(json!({ "devDependencies": { "@ice/spec": "^1.0.0" } }));
        assert_eq!(find_deprecated(&m), Some("@ice/spec"));

        let m = manifest(json!({ "dependencies": { "@iceworks/spec": "^1.0.0" } }));
        assert_eq!(find_deprecated(&m), Some("@iceworks/spec"));
    }

    #[test]
    fn first_match_follows_merged_order() {
        let m = manifest(json!({
            "dependencies": { "react": "^18.0.0", "@iceworks/spec": "^1.0.0" },
            "devDependencies": { "@ice/spec": "^1.0.0", "@iceworks/spec": "^2.0.0" }
        }));
        assert_eq!(find_deprecated(&m), Some("@iceworks/spec"));
    }
}
