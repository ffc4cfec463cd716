// src/cli.rs
// =============================================================================
// Command-line interface, defined with clap's derive API.
//
//   docs-scraper <MODE> [--clear-cache] [--output pretty|file] [--base-dir DIR] [-v]
//
// --docs-url and --peps-url point the scraper at a mirror of either site.
//
// MODE is one of: whats-new, latest-versions, download, pep
// =============================================================================

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::{MAIN_DOC_URL, PEP_SITE_URL};
use crate::modes::Mode;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "docs-scraper",
    version,
    about = "Scrapes the Python documentation and PEP sites",
    long_about = "docs-scraper collects \"What's New\" articles, the latest documentation \
                  versions and their status, downloads the PDF documentation archive, and \
                  checks PEP statuses in the PEP index against each PEP's own page."
)]
pub struct Cli {
    /// What to scrape
    #[arg(value_enum)]
    pub mode: Mode,

    /// Clear the response cache before running
    #[arg(short, long)]
    pub clear_cache: bool,

    /// Output format (plain console lines when omitted)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Directory that holds downloads/, results/, logs/ and the cache
    #[arg(long, default_value = ".")]
    pub base_dir: PathBuf,

    /// Root of the Python documentation
    #[arg(long, default_value = MAIN_DOC_URL)]
    pub docs_url: String,

    /// Root of the PEP site
    #[arg(long, default_value = PEP_SITE_URL)]
    pub peps_url: String,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
