use crate::{LintToolConfig, Manifest, Section};
use serde_json::Value;

/// Names of scripts whose command mentions the tool anywhere, e.g. a `lint`
/// script running `eslint ./` counts for eslint.
pub fn existing_scripts<'a>(manifest: &'a Manifest, config: &LintToolConfig) -> Vec<&'a str> {
    let Some(scripts) = manifest.section(Section::Scripts) else {
        return Vec::new();
    };

    scripts
        .iter()
        .filter(|(_, command)| {
            command
                .as_str()
                .is_some_and(|command| command.contains(config.name()))
        })
        .map(|(name, _)| name.as_str())
        .collect()
}

/// Adds the tool's default scripts unless the user already runs the tool
/// somewhere. Defaults never replace a script of the same name.
pub fn merge_default_scripts(manifest: &Manifest, config: &LintToolConfig) -> Manifest {
    if !existing_scripts(manifest, config).is_empty() {
        return manifest.clone();
    }

    let mut scripts = manifest.section_or_default(Section::Scripts);
    let mut added = false;

    for (name, command) in config.scripts {
        if scripts.contains_key(*name) {
            continue;
        }
        scripts.insert(name.to_string(), Value::String(command.to_string()));
        added = true;
    }

    if added {
        manifest.with_section(Section::Scripts, scripts)
    } else {
        manifest.clone()
    }
}
