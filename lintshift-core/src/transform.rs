use crate::config::{LINT_TOOLS, SUCCESSOR_NAME, SUCCESSOR_VERSION};
use crate::manifest::Layout;
use crate::{LintTool, LintToolConfig, Manifest, Result, Section};
use crate::{detect, prune, scripts, successor, upgrade};
use std::fmt;
use std::path::Path;
use tracing::{debug, trace};

pub const MANIFEST_FILE_NAME: &str = "package.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    DeprecatedRemoved {
        name: String,
    },
    SuccessorAdded {
        name: &'static str,
        version: &'static str,
    },
    ScriptsAdded {
        tool: LintTool,
        names: Vec<String>,
    },
    DependencyAdded {
        name: &'static str,
        version: &'static str,
    },
    DependencyUpgraded {
        name: &'static str,
        from: String,
        to: &'static str,
    },
    DependenciesPruned {
        section: Section,
        names: Vec<String>,
    },
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::DeprecatedRemoved { name } => write!(f, "removed deprecated {name}"),
            Change::SuccessorAdded { name, version } => write!(f, "added {name}@{version}"),
            Change::ScriptsAdded { tool, names } => {
                write!(f, "added {tool} scripts: {}", names.join(", "))
            }
            Change::DependencyAdded { name, version } => write!(f, "added {name}@{version}"),
            Change::DependencyUpgraded { name, from, to } => {
                write!(f, "upgraded {name} {from} -> {to}")
            }
            Change::DependenciesPruned { section, names } if names.is_empty() => {
                write!(f, "dropped empty {section}")
            }
            Change::DependenciesPruned { section, names } => {
                write!(f, "removed from {section}: {}", names.join(", "))
            }
        }
    }
}

/// Result of running the whole pipeline over one manifest.
#[derive(Debug, Clone)]
pub struct Migration {
    pub manifest: Manifest,
    pub changes: Vec<Change>,
    changed: bool,
}

impl Migration {
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Text to write back. An unchanged manifest yields `source` verbatim,
    /// otherwise the JSON keeps the source's indentation, line endings and
    /// final newline.
    pub fn render(&self, path: &Path, source: &str) -> Result<String> {
        if !self.changed {
            return Ok(source.to_string());
        }

        self.manifest.to_json_string(path, &Layout::detect(source))
    }
}

pub fn is_manifest_path(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == MANIFEST_FILE_NAME)
}

/// Parses and migrates `source`; `None` when `path` is not a `package.json`.
pub fn migrate_source(path: &Path, source: &str) -> Result<Option<Migration>> {
    if !is_manifest_path(path) {
        trace!("skipping {}", path.display());
        return Ok(None);
    }

    let manifest = Manifest::parse(path, source)?;
    Ok(Some(transform_manifest(&manifest)))
}

/// Migrated text of `source`, or `source` itself for any file that is not a
/// `package.json`.
pub fn transform_source(path: &Path, source: &str) -> Result<String> {
    match migrate_source(path, source)? {
        Some(migration) => migration.render(path, source),
        None => Ok(source.to_string()),
    }
}

pub fn transform_manifest(manifest: &Manifest) -> Migration {
    let mut changes = Vec::new();

    let mut next = match detect::find_deprecated(manifest) {
        Some(deprecated) => {
            debug!("replacing {deprecated} with {SUCCESSOR_NAME}");
            changes.push(Change::DeprecatedRemoved {
                name: deprecated.to_string(),
            });
            changes.push(Change::SuccessorAdded {
                name: SUCCESSOR_NAME,
                version: SUCCESSOR_VERSION,
            });
            successor::replace_with_successor(manifest, deprecated)
        }
        None => manifest.clone(),
    };

    for config in &LINT_TOOLS {
        next = apply_tool(&next, config, &mut changes);
    }

    let changed = next != *manifest;

    Migration {
        manifest: next,
        changes,
        changed,
    }
}

fn apply_tool(
    manifest: &Manifest,
    config: &LintToolConfig,
    changes: &mut Vec<Change>,
) -> Manifest {
    trace!(tool = %config.tool, "merging scripts");
    let with_scripts = scripts::merge_default_scripts(manifest, config);
    let added: Vec<String> = with_scripts
        .names(Section::Scripts)
        .filter(|name| !manifest.contains(Section::Scripts, name))
        .map(str::to_string)
        .collect();
    if !added.is_empty() {
        debug!(tool = %config.tool, "adding default scripts {added:?}");
        changes.push(Change::ScriptsAdded {
            tool: config.tool,
            names: added,
        });
    }

    trace!(tool = %config.tool, "checking installed version");
    let upgraded = upgrade::upgrade_dev_dependency(&with_scripts, config);
    let after = upgraded.get(Section::DevDependencies, config.name());
    match with_scripts.get(Section::DevDependencies, config.name()) {
        None => changes.push(Change::DependencyAdded {
            name: config.name(),
            version: config.version,
        }),
        Some(before) if after != Some(before) => {
            let from = before
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| before.to_string());
            debug!(tool = %config.tool, "upgrading {from} to {}", config.version);
            changes.push(Change::DependencyUpgraded {
                name: config.name(),
                from,
                to: config.version,
            });
        }
        Some(_) => {}
    }

    trace!(tool = %config.tool, "pruning obsolete packages");
    let pattern = config.removal_pattern();
    for section in Section::DEPENDENCIES {
        if !upgraded.has_section(section) {
            continue;
        }
        let names = prune::matching_dependencies(&upgraded, section, pattern);
        if names.is_empty() && upgraded.names(section).next().is_some() {
            continue;
        }
        changes.push(Change::DependenciesPruned {
            section,
            names: names.into_iter().map(str::to_string).collect(),
        });
    }

    prune::prune_dependencies(&upgraded, pattern)
}
