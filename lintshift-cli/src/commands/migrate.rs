use super::{Processed, process_all, report_changes, resolve_paths};
use anyhow::{Context, Result, bail};
use clap::Args;
use lintshift_core::console;
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// package.json files, or directories containing one. Defaults to the
    /// current directory.
    #[arg(value_name = "PATHS", value_hint = clap::ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,
    /// Print migrated manifests instead of writing them
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

pub fn run(args: MigrateArgs) -> Result<()> {
    console::header("migrate", env!("CARGO_PKG_VERSION"));

    let paths = resolve_paths(&args.paths)?;
    let total = paths.len();
    let mut changed = 0;
    let mut failed = 0;

    for (path, result) in process_all(&paths) {
        let processed = match result {
            Ok(Some(processed)) => processed,
            Ok(None) => {
                console::warn(&format!("{} is not a package.json, skipped", path.display()));
                continue;
            }
            Err(err) => {
                console::error(&format!("{}: {:#}", path.display(), err));
                failed += 1;
                continue;
            }
        };

        if !processed.migration.is_changed() {
            console::unchanged(&path);
            continue;
        }

        report_changes(&path, &processed.migration);

        if let Err(err) = write_back(&args, &processed) {
            console::error(&format!("{:#}", err));
            failed += 1;
            continue;
        }

        changed += 1;
    }

    let verb = if args.dry_run { "would change" } else { "migrated" };
    console::summary(verb, changed, total);

    if failed > 0 {
        bail!("{failed} of {total} manifests could not be migrated");
    }

    Ok(())
}

fn write_back(args: &MigrateArgs, processed: &Processed) -> Result<()> {
    if args.dry_run {
        return console::raw(&processed.output).with_context(|| {
            format!(
                "failed to print migrated {} to stdout",
                processed.path.display()
            )
        });
    }

    fs::write(&processed.path, &processed.output)
        .with_context(|| format!("failed to write {}", processed.path.display()))
}
