// src/modes/pep.rs
// =============================================================================
// PEP status audit.
//
// How it works:
// 1. Fetch the PEP site root and read the numerical index table
// 2. For each row, take the status code from the first cell
//    ("SF" -> "F": the first letter is the PEP type, not its status)
// 3. For each PEP link in the row (skipping the purely numeric ones),
//    fetch the PEP page and read the value next to its "Status" label
// 4. Check that value against the statuses the code allows:
//    - allowed          -> count it
//    - not allowed      -> mismatch diagnostic
//    - code not known   -> unknown-status diagnostic
// 5. Emit one row per counted status (sorted by name) plus a Total row
//
// A PEP page that fails to load, or has no Status label, is logged and
// skipped; the audit carries on with the rest of the index.
// =============================================================================

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{info, warn};
use url::Url;

use super::status::StatusTable;
use super::{progress_bar, Step};
use crate::config::{join_url, Settings};
use crate::error::{Result, ScraperError};
use crate::extract::{find_tag, find_tag_where, next_element_sibling, parse_document, select_all, text_of};
use crate::fetch::CachedClient;
use crate::output::ResultTable;

pub const HEADER: [&str; 2] = ["Status", "Count"];
pub const TOTAL_LABEL: &str = "Total";

const INDEX_ROWS: &str = "tbody tr";
const PEP_LINKS: &str = "a.pep.reference.internal[href]";
const STATUS_LABEL: &str = "Status";

/// One row of the numerical index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRow {
    /// Status code with the type letter removed; may be empty
    pub code: String,
    pub links: Vec<IndexLink>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexLink {
    pub text: String,
    pub href: String,
}

impl IndexLink {
    /// Links whose text is just the PEP number point at the same page as the
    /// title link, so they are never followed
    pub fn is_numeric(&self) -> bool {
        numeric_pattern().is_match(&self.text)
    }
}

fn numeric_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+$").expect("numeric pattern is valid"))
}

/// What one PEP page told us
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The page status is allowed by the index code
    Counted(String),
    Mismatch {
        link: String,
        declared: String,
        expected: Vec<String>,
    },
    UnknownCode { link: String, code: String },
}

impl Verdict {
    fn diagnostic(&self) -> Option<String> {
        match self {
            Verdict::Counted(_) => None,
            Verdict::Mismatch {
                link,
                declared,
                expected,
            } => Some(format!(
                "Mismatched statuses: {} Status on page: {} Expected statuses: {:?}",
                link, declared, expected
            )),
            Verdict::UnknownCode { link, code } => Some(format!(
                "Unknown status '{}' for {} in the numerical index",
                code, link
            )),
        }
    }
}

/// Decides what a declared page status means for an index code
pub fn classify(table: &StatusTable, code: &str, link: &str, declared: &str) -> Verdict {
    match table.permitted(code) {
        None => Verdict::UnknownCode {
            link: link.to_string(),
            code: code.to_string(),
        },
        Some(expected) if expected.iter().any(|s| s == declared) => {
            Verdict::Counted(declared.to_string())
        }
        Some(expected) => Verdict::Mismatch {
            link: link.to_string(),
            declared: declared.to_string(),
            expected: expected.to_vec(),
        },
    }
}

/// Counts and diagnostics gathered during one audit pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Audit {
    /// Sorted by status name, so the output order falls out of the map
    pub tally: BTreeMap<String, usize>,
    pub diagnostics: Vec<String>,
    pub skipped: Vec<String>,
}

impl Audit {
    pub fn record(&mut self, verdict: Verdict) {
        if let Some(message) = verdict.diagnostic() {
            self.diagnostics.push(message);
        } else if let Verdict::Counted(status) = verdict {
            *self.tally.entry(status).or_insert(0) += 1;
        }
    }

    pub fn skip(&mut self, url: String, reason: String) {
        self.skipped.push(format!("Failed to load {}: {}", url, reason));
    }

    pub fn total(&self) -> usize {
        self.tally.values().sum()
    }

    pub fn to_table(&self) -> ResultTable {
        let mut table = ResultTable::new(HEADER);
        for (status, count) in &self.tally {
            table.push_row([status.clone(), count.to_string()]);
        }
        table.push_row([TOTAL_LABEL.to_string(), self.total().to_string()]);
        table
    }
}

/// Reads the numerical index from the PEP site root page
pub fn parse_index(html: &str) -> Result<Vec<IndexRow>> {
    let document = parse_document(html);
    let index = find_tag(document.root_element(), "section", Some("#numerical-index"))?;

    let mut rows = Vec::new();
    for tr in select_all(index, INDEX_ROWS)? {
        // Rows without data cells are not index entries
        let Ok(first_cell) = find_tag(tr, "td", None) else {
            continue;
        };
        let code: String = text_of(first_cell).trim().chars().skip(1).collect();

        let links = select_all(tr, PEP_LINKS)?
            .into_iter()
            .filter_map(|a| {
                a.value().attr("href").map(|href| IndexLink {
                    text: text_of(a).trim().to_string(),
                    href: href.to_string(),
                })
            })
            .collect();

        rows.push(IndexRow { code, links });
    }

    Ok(rows)
}

/// Reads the value printed next to the "Status" label of a PEP page
pub fn parse_page_status(html: &str) -> Result<String> {
    let document = parse_document(html);
    let label = find_tag_where(document.root_element(), "dt", None, |dt| {
        text_of(*dt).contains(STATUS_LABEL)
    })?;

    let value = next_element_sibling(label).ok_or_else(|| ScraperError::TagNotFound {
        tag: "dd".to_string(),
        filter: format!("after <dt>{}", STATUS_LABEL),
    })?;

    Ok(text_of(value).trim().to_string())
}

/// Runs the audit over every PEP listed in the index
pub async fn audit(client: &CachedClient, peps_url: &Url, table: &StatusTable) -> Result<Audit> {
    let rows = parse_index(&client.get_text(peps_url).await?)?;
    let mut audit = Audit::default();

    let progress = progress_bar(rows.len(), "PEP index");
    for row in &rows {
        for link in row.links.iter().filter(|link| !link.is_numeric()) {
            let pep_url = join_url(peps_url, &link.href)?;

            if !table.knows(&row.code) {
                audit.record(classify(table, &row.code, pep_url.as_str(), ""));
                continue;
            }

            let fetched = fetch_page_status(client, &pep_url).await;
            let skippable = |e: &ScraperError| e.is_connection() || e.is_structural();
            match Step::catch(pep_url.as_str(), fetched, skippable)? {
                Step::Done(declared) => {
                    audit.record(classify(table, &row.code, pep_url.as_str(), &declared));
                }
                Step::Skipped { url, reason } => audit.skip(url, reason),
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok(audit)
}

async fn fetch_page_status(client: &CachedClient, url: &Url) -> Result<String> {
    let body = client.get_text(url).await?;
    parse_page_status(&body)
}

/// The `pep` mode: audit, log what went wrong, return the tally table
pub async fn pep(client: &CachedClient, settings: &Settings) -> Result<ResultTable> {
    let table = StatusTable::default();
    let audit = audit(client, &settings.peps_url, &table).await?;

    for message in &audit.skipped {
        warn!("{}", message);
    }
    for message in &audit.diagnostics {
        info!("{}", message);
    }
    info!(
        "Audited {} PEPs: {} diagnostics, {} skipped",
        audit.total(),
        audit.diagnostics.len(),
        audit.skipped.len()
    );

    Ok(audit.to_table())
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why is the code read from the first cell and not from <abbr>?
//    - Some rows split the code over two <abbr> elements ("S" + "F")
//    - The cell text joins them back into "SF", so each row is read once
//    - Every title link in that row is then checked against the same code
//
// 2. Why skip links whose text is a number?
//    - Each row links the PEP twice: once by number, once by title
//    - Both point at the same page, so following one is enough
//
// 3. Why does the tally use a BTreeMap?
//    - Iteration is ordered by key, so to_table() is already sorted by status
//    - The Total row is pushed last, after the loop
//
// 4. Why are unknown codes checked before fetching?
//    - The verdict does not depend on the page, so there is nothing to load
// -----------------------------------------------------------------------------
