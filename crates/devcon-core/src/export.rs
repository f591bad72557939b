//! Persistence collaborator for `save_logs`.
//!
//! The console hands the exporter the full persistent log and the raw input
//! line. Parsing the target name and every file-system concern live here.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{ExportConfig, ExportFormat};
use crate::error::{ConsoleError, Result};
use crate::terminal::arguments;

/// Writes a snapshot of the persistent log somewhere durable.
pub trait LogExporter {
    /// Export `lines`. `args` is the raw `save_logs` input line. Returns the
    /// location written to.
    fn export(&mut self, lines: &[String], args: &str) -> Result<PathBuf>;
}

/// Exports into a file under a configured directory.
#[derive(Debug, Clone)]
pub struct FileExporter {
    config: ExportConfig,
}

#[derive(Serialize)]
struct ExportRecord<'a> {
    index: usize,
    line: &'a str,
}

impl FileExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Resolve the output path for a `save_logs` input line.
    ///
    /// The first non-empty argument names the file; without one the
    /// configured default is used, with its extension replaced by the export
    /// format's. Directory components are rejected and a missing extension
    /// is filled in from the export format.
    pub fn target_path(&self, args: &str) -> Result<PathBuf> {
        let explicit = arguments(args).find(|token| !token.is_empty());
        let requested = explicit.unwrap_or(self.config.default_file_name.as_str());

        let file_name = Path::new(requested)
            .file_name()
            .filter(|name| Path::new(name) == Path::new(requested))
            .ok_or_else(|| ConsoleError::Export(format!("invalid file name: {requested}")))?;

        let mut path = self.config.directory.join(file_name);
        if explicit.is_none() || path.extension().is_none() {
            path.set_extension(self.config.format.extension());
        }
        Ok(path)
    }

    fn write_lines(&self, path: &Path, lines: &[String]) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        match self.config.format {
            ExportFormat::Plain => {
                for line in lines {
                    writeln!(out, "{line}")?;
                }
            },
            ExportFormat::JsonLines => {
                for (index, line) in lines.iter().enumerate() {
                    serde_json::to_writer(&mut out, &ExportRecord { index, line })?;
                    out.write_all(b"\n")?;
                }
            },
        }
        out.flush()?;
        Ok(())
    }
}

impl LogExporter for FileExporter {
    fn export(&mut self, lines: &[String], args: &str) -> Result<PathBuf> {
        let path = self.target_path(args)?;
        if !self.config.directory.as_os_str().is_empty() {
            fs::create_dir_all(&self.config.directory)?;
        }
        self.write_lines(&path, lines)?;
        log::debug!("Exported {} lines to {}", lines.len(), path.display());
        Ok(path)
    }
}
