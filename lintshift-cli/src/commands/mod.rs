pub mod check;
pub mod migrate;

use anyhow::{Context, Result};
use lintshift_core::transform::{self, MANIFEST_FILE_NAME};
use lintshift_core::{Change, Migration, console};
use rayon::prelude::*;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct Processed {
    pub path: PathBuf,
    pub output: String,
    pub migration: Migration,
}

/// Directories stand for the `package.json` inside them; no path means the
/// current directory.
pub fn resolve_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if paths.is_empty() {
        let cwd = env::current_dir()?;
        return Ok(vec![cwd.join(MANIFEST_FILE_NAME)]);
    }

    Ok(paths
        .iter()
        .map(|path| {
            if path.is_dir() {
                path.join(MANIFEST_FILE_NAME)
            } else {
                path.clone()
            }
        })
        .collect())
}

/// Migrates every path independently, in parallel. Results keep input order.
pub fn process_all(paths: &[PathBuf]) -> Vec<(PathBuf, Result<Option<Processed>>)> {
    paths
        .par_iter()
        .map(|path| (path.clone(), process(path)))
        .collect()
}

fn process(path: &Path) -> Result<Option<Processed>> {
    if !transform::is_manifest_path(path) {
        return Ok(None);
    }

    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let Some(migration) = transform::migrate_source(path, &source)? else {
        return Ok(None);
    };

    debug!(
        "{}: {} changes, rewrite needed: {}",
        path.display(),
        migration.changes.len(),
        migration.is_changed()
    );
    let output = migration.render(path, &source)?;

    Ok(Some(Processed {
        path: path.to_path_buf(),
        output,
        migration,
    }))
}

pub fn report_changes(path: &Path, migration: &Migration) {
    console::file(path);

    for change in &migration.changes {
        let message = change.to_string();
        match change {
            Change::DeprecatedRemoved { .. } | Change::DependenciesPruned { .. } => {
                console::removed(&message)
            }
            Change::DependencyUpgraded { .. } => console::upgraded(&message),
            Change::SuccessorAdded { .. }
            | Change::ScriptsAdded { .. }
            | Change::DependencyAdded { .. } => console::added(&message),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    pub(crate) fn temp_dir(name: &str) -> PathBuf {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("lintshift_test_{}_{}", name, timestamp))
    }

    #[test]
    fn directories_resolve_to_their_manifest() {
        let dir = temp_dir("resolve_dir");
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join("index.ts");

        let resolved = resolve_paths(&[dir.clone(), file.clone()]).unwrap();

        assert_eq!(resolved, vec![dir.join("package.json"), file]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn processes_each_file_on_its_own() {
        let dir = temp_dir("process_all");
        fs::create_dir_all(dir.join("a")).unwrap();
        fs::create_dir_all(dir.join("b")).unwrap();
        fs::write(
            dir.join("a/package.json"),
            r#"{ "devDependencies": { "@ice/spec": "^1.0.0" } }"#,
        )
        .unwrap();
        fs::write(dir.join("b/package.json"), "{ oops").unwrap();
        fs::write(dir.join("index.ts"), "export {}").unwrap();

        let paths = vec![
            dir.join("a/package.json"),
            dir.join("b/package.json"),
            dir.join("index.ts"),
        ];
        let results = process_all(&paths);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0, paths[0]);

        let migrated = results[0].1.as_ref().unwrap().as_ref().unwrap();
        assert!(migrated.migration.is_changed());
        assert!(migrated.output.contains("@applint/spec"));

        assert!(results[1].1.is_err());
        assert!(matches!(results[2].1, Ok(None)));

        fs::remove_dir_all(&dir).unwrap();
    }
}
