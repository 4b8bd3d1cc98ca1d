//! Person block extraction.

use regex::Regex;
use tracing::{debug, trace};

use super::patterns::{record_pattern, PERSON_HEADER, WHITESPACE_RUN};

/// Raw fields captured for one person, before numeral parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonBlock {
    /// Name with internal whitespace collapsed.
    pub name: String,
    /// Identification digits.
    pub national_id: String,
    /// Numeral printed just before the `Total:` line.
    pub first_numeral: String,
    /// Numeral on the `Total:` line.
    pub total_numeral: String,
}

/// Result of scanning a report for person blocks.
#[derive(Debug, Clone, Default)]
pub struct BlockScan {
    /// Complete blocks in text order.
    pub blocks: Vec<PersonBlock>,
    /// Number of person headers seen, complete or not.
    pub headers: usize,
}

impl BlockScan {
    /// Headers whose block lacked the anchor phrase or the total line.
    pub fn incomplete(&self) -> usize {
        self.headers - self.blocks.len()
    }
}

/// Extracts person blocks delimited by name/identification headers.
pub struct BlockExtractor {
    record_pattern: Regex,
}

impl BlockExtractor {
    /// Create an extractor for reports using the given anchor phrase.
    pub fn new(anchor_phrase: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            record_pattern: record_pattern(anchor_phrase)?,
        })
    }

    /// Split the text at person headers and match each segment.
    ///
    /// A segment runs from one header to the next, so an incomplete block
    /// never borrows the totals of the person after it.
    pub fn scan(&self, text: &str) -> BlockScan {
        let starts: Vec<usize> = PERSON_HEADER.find_iter(text).map(|m| m.start()).collect();
        let mut scan = BlockScan {
            blocks: Vec::with_capacity(starts.len()),
            headers: starts.len(),
        };

        for (i, &start) in starts.iter().enumerate() {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            let segment = &text[start..end];

            let Some(caps) = self.record_pattern.captures(segment) else {
                trace!("Incomplete person block at byte {}", start);
                continue;
            };

            let block = PersonBlock {
                name: collapse_whitespace(&caps["name"]),
                national_id: caps["id"].to_string(),
                first_numeral: caps["first"].to_string(),
                total_numeral: caps["total"].to_string(),
            };
            debug!(
                "Matched block for {} ({}) at byte {}",
                block.name, block.national_id, start
            );
            scan.blocks.push(block);
        }

        scan
    }
}

fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s.trim(), " ").into_owned()
}
