use super::{process_all, report_changes, resolve_paths};
use anyhow::{Result, bail};
use clap::Args;
use lintshift_core::console;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// package.json files, or directories containing one. Defaults to the
    /// current directory.
    #[arg(value_name = "PATHS", value_hint = clap::ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,
}

pub fn run(args: CheckArgs) -> Result<()> {
    console::header("check", env!("CARGO_PKG_VERSION"));

    let paths = resolve_paths(&args.paths)?;
    let total = paths.len();
    let mut pending = 0;
    let mut failed = 0;

    for (path, result) in process_all(&paths) {
        match result {
            Ok(Some(processed)) if processed.migration.is_changed() => {
                report_changes(&path, &processed.migration);
                pending += 1;
            }
            Ok(Some(_)) => console::unchanged(&path),
            Ok(None) => {
                console::warn(&format!("{} is not a package.json, skipped", path.display()))
            }
            Err(err) => {
                console::error(&format!("{}: {:#}", path.display(), err));
                failed += 1;
            }
        }
    }

    console::summary("need migrating", pending, total);

    if failed > 0 {
        bail!("{failed} of {total} manifests could not be read");
    }

    if pending > 0 {
        bail!("{pending} of {total} manifests need migrating, run `lintshift migrate`");
    }

    Ok(())
}
