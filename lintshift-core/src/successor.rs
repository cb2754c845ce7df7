use crate::config::{SUCCESSOR_NAME, SUCCESSOR_VERSION};
use crate::{Manifest, Section};

/// Drops `deprecated` from both dependency sections and pins the successor
/// package in `devDependencies`. Sections emptied here are kept; the pruner
/// decides whether they go.
pub fn replace_with_successor(manifest: &Manifest, deprecated: &str) -> Manifest {
    let mut next = manifest.clone();

    for section in Section::DEPENDENCIES {
        if !manifest.contains(section, deprecated) {
            continue;
        }

        let mut map = manifest.section_or_default(section);
        map.shift_remove(deprecated);
        next = next.with_section(section, map);
    }

    next.with_entry(Section::DevDependencies, SUCCESSOR_NAME, SUCCESSOR_VERSION)
}
