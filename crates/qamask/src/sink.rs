//! Destination for a rendered [RuleList].

use std::{
    fs::File,
    io::{self, BufWriter},
    path::{Path, PathBuf},
};

use log::debug;

use crate::rules::RuleList;

/// Where rules are written: standard output or a named file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    Stdout,
    File(PathBuf),
}

impl Sink {
    /// `None` selects standard output.
    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Sink::File(path.to_path_buf()),
            None => Sink::Stdout,
        }
    }

    /// Writes the rules. A file is created (or truncated) only by this call and is
    /// closed before it returns.
    pub fn write(&self, rules: &RuleList) -> io::Result<()> {
        match self {
            Sink::Stdout => rules.write_to(BufWriter::new(io::stdout().lock())),
            Sink::File(path) => {
                let file = File::create(path)?;
                let mut writer = BufWriter::new(file);
                rules.write_to(&mut writer)?;
                writer.into_inner().map_err(|e| e.into_error())?.sync_all()?;
                debug!("wrote {} rules to {}", rules.len() + 1, path.display());
                Ok(())
            }
        }
    }
}
