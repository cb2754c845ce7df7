use crate::{LintshiftError, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Dependencies,
    DevDependencies,
    Scripts,
}

impl Section {
    pub const ALL: [Section; 3] = [
        Section::Dependencies,
        Section::DevDependencies,
        Section::Scripts,
    ];

    pub const DEPENDENCIES: [Section; 2] = [Section::Dependencies, Section::DevDependencies];

    pub fn key(self) -> &'static str {
        match self {
            Section::Dependencies => "dependencies",
            Section::DevDependencies => "devDependencies",
            Section::Scripts => "scripts",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A parsed `package.json`.
///
/// Only the three [`Section`]s are interpreted; every other field is carried
/// through as-is and object key order is kept. Updates never mutate in place:
/// `with_*` methods return a new manifest.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Manifest {
    fields: Map<String, Value>,
}

impl Manifest {
    pub fn parse(path: &Path, source: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(source).map_err(|source| LintshiftError::ParseJson {
                path: path.to_path_buf(),
                source,
            })?;

        Self::from_value(path, value)
    }

    pub fn from_value(path: &Path, value: Value) -> Result<Self> {
        let Value::Object(fields) = value else {
            return Err(LintshiftError::ManifestInvalid {
                path: path.to_path_buf(),
                reason: "top-level value is not an object".into(),
            });
        };

        for section in Section::ALL {
            match fields.get(section.key()) {
                None | Some(Value::Null) | Some(Value::Object(_)) => {}
                Some(other) => {
                    return Err(LintshiftError::ManifestInvalid {
                        path: path.to_path_buf(),
                        reason: format!("{} must be an object, found {}", section, kind(other)),
                    });
                }
            }
        }

        Ok(Manifest { fields })
    }

    /// The section's map; `None` when the key is absent or `null`.
    pub fn section(&self, section: Section) -> Option<&Map<String, Value>> {
        self.fields.get(section.key()).and_then(Value::as_object)
    }

    pub fn has_section(&self, section: Section) -> bool {
        self.section(section).is_some()
    }

    pub fn get(&self, section: Section, name: &str) -> Option<&Value> {
        self.section(section)?.get(name)
    }

    pub fn get_str(&self, section: Section, name: &str) -> Option<&str> {
        self.get(section, name)?.as_str()
    }

    pub fn contains(&self, section: Section, name: &str) -> bool {
        self.get(section, name).is_some()
    }

    pub fn names(&self, section: Section) -> impl Iterator<Item = &str> {
        self.section(section)
            .into_iter()
            .flat_map(|map| map.keys().map(String::as_str))
    }

    /// Copy of the section, empty when absent.
    pub fn section_or_default(&self, section: Section) -> Map<String, Value> {
        self.section(section).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn with_section(&self, section: Section, map: Map<String, Value>) -> Manifest {
        let mut fields = self.fields.clone();
        fields.insert(section.key().to_string(), Value::Object(map));
        Manifest { fields }
    }

    #[must_use]
    pub fn without_section(&self, section: Section) -> Manifest {
        let mut fields = self.fields.clone();
        fields.shift_remove(section.key());
        Manifest { fields }
    }

    #[must_use]
    pub fn with_entry(&self, section: Section, name: &str, value: &str) -> Manifest {
        let mut map = self.section_or_default(section);
        map.insert(name.to_string(), Value::String(value.to_string()));
        self.with_section(section, map)
    }

    #[cfg(test)]
    pub(crate) fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    #[cfg(test)]
    pub(crate) fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    /// Pretty-prints using the indentation and line endings of `layout`.
    pub fn to_json_string(&self, path: &Path, layout: &Layout<'_>) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(layout.indent.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);

        self.fields
            .serialize(&mut ser)
            .map_err(|source| LintshiftError::SerializeJson {
                path: path.to_path_buf(),
                source,
            })?;

        let mut out = String::from_utf8(buf).map_err(|err| LintshiftError::ManifestInvalid {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

        if layout.newline != "\n" {
            // Raw newlines only occur between tokens; string contents are escaped.
            out = out.replace('\n', layout.newline);
        }

        if layout.trailing_newline {
            out.push_str(layout.newline);
        }

        Ok(out)
    }
}

/// Text layout of a manifest on disk, reproduced when it is written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout<'a> {
    pub indent: &'a str,
    pub newline: &'static str,
    pub trailing_newline: bool,
}

impl<'a> Layout<'a> {
    pub fn detect(source: &'a str) -> Self {
        let newline = if source.contains("\r\n") { "\r\n" } else { "\n" };

        Layout {
            indent: detect_indent(source),
            newline,
            trailing_newline: source.ends_with('\n'),
        }
    }
}

/// Indentation of the first indented line, two spaces when nothing is indented.
fn detect_indent(source: &str) -> &str {
    source
        .lines()
        .skip(1)
        .find_map(|line| {
            let trimmed = line.trim_start_matches([' ', '\t']);
            let width = line.len() - trimmed.len();
            (width > 0 && !trimmed.is_empty()).then(|| &line[..width])
        })
        .unwrap_or("  ")
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
