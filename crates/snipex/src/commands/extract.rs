//! `snipex extract` command implementation.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use snipex_config::{CliSettings, Config};
use snipex_engine::{CaptureEngine, Severity};
use snipex_fs::{Scanner, Writer};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the extract command.
#[derive(Args)]
pub(crate) struct ExtractArgs {
    /// Snippet source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for extracted snippets (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Number of spaces to replace tabs with (overrides config).
    #[arg(long)]
    tab_width: Option<usize>,

    /// Keep common leading whitespace instead of trimming it.
    #[arg(long)]
    no_trim: bool,

    /// Path to configuration file (default: auto-discover snipex.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ExtractArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            output_dir: self.output_dir.clone(),
            tab_width: self.tab_width,
            trim_spaces: self.no_trim.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let extract = &config.extract_resolved;

        if !extract.source_dir.is_dir() {
            return Err(CliError::Validation(format!(
                "source directory not found: {}",
                extract.source_dir.display()
            )));
        }

        output.info(&format!("Source: {}", extract.source_dir.display()));
        output.info(&format!("Output: {}", extract.output_dir.display()));

        let files = Scanner::new(extract.source_dir.clone()).scan();
        let mut engine = CaptureEngine::new(extract.tab_width);

        for path in &files {
            // A file that vanished or won't decode is skipped; the rest of
            // the run continues.
            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(err) => {
                    output.warning(&format!("skipping {}: {err}", path.display()));
                    continue;
                }
            };

            for diagnostic in engine.consume_file(content.lines()) {
                match diagnostic.severity() {
                    Severity::Warning => {
                        output.warning(&format!("{}: {diagnostic}", path.display()));
                    }
                    Severity::Info => {
                        tracing::info!(file = %path.display(), "{diagnostic}");
                    }
                }
            }
        }

        let snippets = engine.into_snippets(extract.trim_spaces);
        let count = snippets.len();

        let writer = Writer::new(extract.output_dir.clone());
        let failures = writer.write_all(&snippets)?;
        for failure in &failures {
            output.error(&failure.to_string());
        }

        output.success(&format!(
            "Extracted {} snippet{} from {} file{} to {}",
            count - failures.len(),
            if count - failures.len() == 1 { "" } else { "s" },
            files.len(),
            if files.len() == 1 { "" } else { "s" },
            extract.output_dir.display()
        ));
        Ok(())
    }
}
