//! Pipeline result and report export

use regex::Regex;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Final text produced by the last task of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineResult {
    text: String,
}

impl PipelineResult {
    pub(crate) fn new(text: String) -> Self {
        Self { text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Write the report as markdown into `dir`, named after the topic
    pub fn export(&self, dir: impl AsRef<Path>, topic: &str) -> io::Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(report_filename(topic));
        std::fs::write(&path, &self.text)?;
        Ok(path)
    }
}

/// File name for a report: `CREW_X_<topic>.md` with every
/// non-alphanumeric character of the trimmed topic replaced by `_`
pub fn report_filename(topic: &str) -> String {
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
    let pattern =
        NON_ALNUM.get_or_init(|| Regex::new(r"[^A-Za-z0-9]").expect("filename pattern is valid"));
    format!("CREW_X_{}.md", pattern.replace_all(topic.trim(), "_"))
}
