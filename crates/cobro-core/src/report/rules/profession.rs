//! Profession detection within one person's section of the report.

use tracing::warn;

use super::patterns::person_section_pattern;

/// Whether `keyword` appears in the section that starts at this person's
/// name/identification lines and ends at the anchor phrase.
///
/// The section is located by a fresh search over the full text, so it does
/// not depend on how the person's block was matched. The comparison is done
/// on the uppercased section.
pub fn detect_profession(
    text: &str,
    name: &str,
    national_id: &str,
    anchor_phrase: &str,
    keyword: &str,
) -> bool {
    let pattern = match person_section_pattern(name, national_id, anchor_phrase) {
        Ok(pattern) => pattern,
        Err(e) => {
            warn!("Could not build section pattern for {}: {}", name, e);
            return false;
        }
    };

    let keyword = keyword.to_uppercase();
    pattern
        .find(text)
        .map(|section| section.as_str().to_uppercase().contains(&keyword))
        .unwrap_or(false)
}
