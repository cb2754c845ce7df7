use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Package that replaces every entry of [`DEPRECATED_PACKAGES`].
pub const SUCCESSOR_NAME: &str = "@applint/spec";
pub const SUCCESSOR_VERSION: &str = "^1.2.3";

pub const DEPRECATED_PACKAGES: &[&str] = &[
    "@ice/spec",
    "@iceworks/spec",
    "@ice/eslint-config",
    "@ice/stylelint-config",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LintTool {
    Eslint,
    Stylelint,
}

impl LintTool {
    pub fn as_str(self) -> &'static str {
        match self {
            LintTool::Eslint => "eslint",
            LintTool::Stylelint => "stylelint",
        }
    }
}

impl fmt::Display for LintTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct LintToolConfig {
    pub tool: LintTool,
    pub version: &'static str,
    pub scripts: &'static [(&'static str, &'static str)],
    removal_pattern: &'static LazyLock<Regex>,
}

impl LintToolConfig {
    /// Binary and package name of the tool, also the token looked for in scripts.
    pub fn name(&self) -> &'static str {
        self.tool.as_str()
    }

    pub fn removal_pattern(&self) -> &Regex {
        self.removal_pattern
    }
}

static ESLINT_PACKAGES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^eslint-").expect("eslint removal pattern"));

static STYLELINT_PACKAGES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^stylelint-").expect("stylelint removal pattern"));

/// Applied in this order for every manifest.
pub static LINT_TOOLS: [LintToolConfig; 2] = [
    LintToolConfig {
        tool: LintTool::Eslint,
        version: "^8.0.0",
        scripts: &[
            ("eslint", "eslint --cache --ext .js,.jsx,.ts,.tsx ./"),
            ("eslint:fix", "npm run eslint -- --fix"),
        ],
        removal_pattern: &ESLINT_PACKAGES,
    },
    LintToolConfig {
        tool: LintTool::Stylelint,
        version: "^14.0.0",
        scripts: &[
            ("stylelint", "stylelint \"./**/*.{css,scss,less}\" --cache"),
            ("stylelint:fix", "npm run stylelint -- --fix"),
        ],
        removal_pattern: &STYLELINT_PACKAGES,
    },
];

#[cfg(test)]
pub(crate) fn lint_tool(tool: LintTool) -> &'static LintToolConfig {
    match tool {
        LintTool::Eslint => &LINT_TOOLS[0],
        LintTool::Stylelint => &LINT_TOOLS[1],
    }
}

pub fn is_deprecated(package: &str) -> bool {
    DEPRECATED_PACKAGES.contains(&package)
}
