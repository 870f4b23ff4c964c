use clap::Parser;
use std::path::{Path, PathBuf};

use imgpeek::mime_from_extension;

#[derive(Parser)]
#[command(name = "imgpeek")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Read image dimensions from file headers without decoding", long_about = None)]
pub struct Cli {
    /// Image files to measure
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// MIME type hint applied to every file, e.g. image/jpeg
    #[arg(short, long, value_name = "HINT")]
    pub mime: Option<String>,

    /// Do not derive a MIME hint from the file extension
    #[arg(long)]
    pub no_extension_hint: bool,

    /// Fail when a hint is invalid or contradicted by the file contents
    #[arg(long)]
    pub strict: bool,

    /// Emit one JSON object per file
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,
}

impl Cli {
    /// The explicit `--mime` hint wins over the extension.
    pub fn hint_for<'a>(&'a self, path: &Path) -> Option<&'a str> {
        if let Some(mime) = self.mime.as_deref() {
            return Some(mime);
        }
        if self.no_extension_hint {
            return None;
        }
        mime_from_extension(path)
    }
}
