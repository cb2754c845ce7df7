use std::env;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Instant;

static START_TIME: OnceLock<Instant> = OnceLock::new();

fn use_color() -> bool {
    static USE_COLOR: OnceLock<bool> = OnceLock::new();
    *USE_COLOR.get_or_init(|| env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal())
}

fn paint(code: &str, text: &str) -> String {
    if use_color() {
        format!("\u{1b}[{}m{}\u{1b}[0m", code, text)
    } else {
        text.to_string()
    }
}

fn dim(text: &str) -> String {
    paint("2", text)
}

fn bold(text: &str) -> String {
    paint("1", text)
}

fn green(text: &str) -> String {
    paint("32", text)
}

fn cyan(text: &str) -> String {
    paint("36", text)
}

fn yellow(text: &str) -> String {
    paint("33", text)
}

fn red(text: &str) -> String {
    paint("31", text)
}

fn elapsed_seconds() -> f32 {
    START_TIME
        .get()
        .map(|t| t.elapsed().as_secs_f32())
        .unwrap_or(0.0)
}

pub fn header(command: &str, version: &str) {
    START_TIME.get_or_init(Instant::now);
    eprintln!("{}", dim(&format!("lintshift {} v{}", command, version)));
    eprintln!();
}

pub fn file(path: &Path) {
    println!("{}", bold(&path.display().to_string()));
}

pub fn added(message: &str) {
    println!("  {} {}", green("+"), message);
}

pub fn removed(message: &str) {
    println!("  {} {}", red("-"), message);
}

pub fn upgraded(message: &str) {
    println!("  {} {}", cyan("^"), message);
}

pub fn unchanged(path: &Path) {
    println!("{}", dim(&format!("{} (unchanged)", path.display())));
}

/// `verb` is what happened to the changed files, e.g. "migrated".
pub fn summary(verb: &str, changed: usize, total: usize) {
    println!();
    let seconds = elapsed_seconds();
    let time_str = if seconds < 1.0 {
        format!("{:.0}ms", seconds * 1000.0)
    } else {
        format!("{:.2}s", seconds)
    };
    let noun = if total == 1 { "manifest" } else { "manifests" };
    println!(
        "{} of {} {} {} {}",
        changed,
        total,
        noun,
        verb,
        dim(&format!("[{}]", time_str))
    );
}

pub fn warn(message: &str) {
    let tag = yellow("warn");
    eprintln!("{} {}", tag, message);
}

pub fn error(message: &str) {
    let tag = red("error");
    eprintln!("{} {}", tag, message);
}

/// Writes `text` as-is to stdout, used for `--dry-run` output.
pub fn raw(text: &str) -> io::Result<()> {
    write_raw(&mut io::stdout().lock(), text)
}

fn write_raw(out: &mut impl Write, text: &str) -> io::Result<()> {
    out.write_all(text.as_bytes())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn raw_output_is_written_verbatim() {
        let mut out = Vec::new();
        write_raw(&mut out, "{\r\n}\r\n").unwrap();
        assert_eq!(out, b"{\r\n}\r\n");
    }

    #[test]
    fn raw_output_reports_write_failures() {
        let err = write_raw(&mut ClosedPipe, "{}\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
