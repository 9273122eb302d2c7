//! Launches an external three-way diff/merge application.
//!
//! Each tool is an argv template where `{L}`, `{C}` and `{R}` stand for the
//! left (cleaned), center (the file being edited) and right (original)
//! paths.

use std::path::Path;
use std::process::{Command, ExitStatus};

use tracing::debug;

use crate::{err_msg, CMakeError};

const TOOLS: &[(&str, &[&str])] = &[
    (
        "diffmergemac",
        &[
            "/Applications/DiffMerge.app/Contents/MacOS/DiffMerge",
            "-t1='Decrufted'",
            "-t2='Result'",
            "-t3='Original'",
            "{L}",
            "{C}",
            "{R}",
        ],
    ),
    ("meld", &["meld", "--diff", "{L}", "{C}", "{R}"]),
    ("diffuse", &["diffuse", "{L}", "{C}", "{R}"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeTool {
    name: &'static str,
    template: &'static [&'static str],
}

impl MergeTool {
    /// Names of the supported tools.
    pub fn names() -> impl Iterator<Item = &'static str> {
        TOOLS.iter().map(|(name, _)| *name)
    }

    pub fn from_name(name: &str) -> Result<Self, CMakeError> {
        TOOLS
            .iter()
            .find(|(tool, _)| *tool == name)
            .map(|&(name, template)| MergeTool { name, template })
            .ok_or_else(|| {
                err_msg!(
                    Internal,
                    "unknown merge tool `{}` (supported: {})",
                    name,
                    Self::names().collect::<Vec<_>>().join(", ")
                )
            })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The argv for comparing `left` and `right` into `center`.
    pub fn command(&self, left: &Path, center: &Path, right: &Path) -> Vec<String> {
        let (left, center, right) = (
            left.display().to_string(),
            center.display().to_string(),
            right.display().to_string(),
        );
        self.template
            .iter()
            .map(|arg| {
                arg.replace("{L}", &left)
                    .replace("{C}", &center)
                    .replace("{R}", &right)
            })
            .collect()
    }

    /// Runs the tool and waits for it to exit.
    pub fn run(&self, left: &Path, center: &Path, right: &Path) -> Result<ExitStatus, CMakeError> {
        let argv = self.command(left, center, right);
        let Some((program, args)) = argv.split_first() else {
            return Err(err_msg!(Internal, "merge tool `{}` has an empty command", self.name));
        };
        debug!(tool = self.name, ?argv, "launching merge tool");
        Command::new(program)
            .args(args)
            .status()
            .map_err(|e| CMakeError::io(format!("launching {}", program), e))
    }
}
