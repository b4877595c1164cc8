use clap::Parser;
use std::path::PathBuf;

/// notepick – browse, filter, and create tagged Markdown notes
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Notes directory (defaults to $NOTEPICK_DIR, then ~/notes)
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,
}
