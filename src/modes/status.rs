// src/modes/status.rs
// =============================================================================
// Which full PEP statuses each one-letter index code allows.
//
// The numerical index marks every PEP with a type letter followed by an
// optional status letter ("SF" = Standards Track, Final). After stripping
// the type letter, the remaining code (possibly empty) must map to one of
// the sets below. The table is built once and never changes.
// =============================================================================

use std::collections::BTreeMap;

const EXPECTED_STATUS: &[(&str, &[&str])] = &[
    ("A", &["Active", "Accepted"]),
    ("D", &["Deferred"]),
    ("F", &["Final"]),
    ("P", &["Provisional"]),
    ("R", &["Rejected"]),
    ("S", &["Superseded"]),
    ("W", &["Withdrawn"]),
    ("", &["Draft", "Active"]),
];

#[derive(Debug, Clone)]
pub struct StatusTable {
    permitted: BTreeMap<String, Vec<String>>,
}

impl Default for StatusTable {
    fn default() -> Self {
        Self::from_pairs(EXPECTED_STATUS.iter().map(|(code, statuses)| (*code, *statuses)))
    }
}

impl StatusTable {
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [&'a str])>,
    {
        let permitted = pairs
            .into_iter()
            .map(|(code, statuses)| {
                let statuses = statuses.iter().map(|s| s.to_string()).collect();
                (code.to_string(), statuses)
            })
            .collect();
        Self { permitted }
    }

    /// Statuses allowed for `code`, or None if the code is unknown
    pub fn permitted(&self, code: &str) -> Option<&[String]> {
        self.permitted.get(code).map(Vec::as_slice)
    }

    pub fn knows(&self, code: &str) -> bool {
        self.permitted.contains_key(code)
    }

    /// True if any code allows `status`
    #[cfg(test)]
    pub fn allows_anywhere(&self, status: &str) -> bool {
        self.permitted
            .values()
            .any(|statuses| statuses.iter().any(|s| s == status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_codes() {
        let table = StatusTable::default();
        assert_eq!(
            table.permitted("A").unwrap(),
            ["Active".to_string(), "Accepted".to_string()]
        );
        assert_eq!(table.permitted("F").unwrap(), ["Final".to_string()]);
        assert_eq!(
            table.permitted("").unwrap(),
            ["Draft".to_string(), "Active".to_string()]
        );
        assert!(table.permitted("Z").is_none());
        assert!(!table.knows("Z"));
    }

    #[test]
    fn test_allows_anywhere() {
        let table = StatusTable::default();
        assert!(table.allows_anywhere("Superseded"));
        assert!(table.allows_anywhere("Draft"));
        assert!(!table.allows_anywhere("April Fool!"));
    }
}
