//! # Month Slicing
//!
//! The DHN table prints each month under its Portuguese name. A month block
//! is the text from the first occurrence of the month's name up to the first
//! occurrence of the following month's name found after it. We only ever use
//! the first occurrence of each name; later repeats (page headers, legends)
//! stay inside whatever block they fall in.

use regex::{Regex, RegexBuilder};

/// Portuguese month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Name of a month numbered 1–12, or `None` outside that range.
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(index).copied()
}

fn name_pattern(name: &str) -> Regex {
    RegexBuilder::new(&regex::escape(name))
        .case_insensitive(true)
        .build()
        .expect("escaped month name should be a valid pattern")
}

/// Return the text block for `month` (1–12), or `None` if its name never
/// appears in `text`.
///
/// The search is case-insensitive. December, or a month whose successor is
/// not found, extends to the end of the text.
///
/// # Example
/// ```
/// use tide_table_lib::months::slice_month_block;
///
/// let text = "JANEIRO\n01 QUI 0512 1.3\nFEVEREIRO\n01 DOM 0601 1.1";
/// assert_eq!(slice_month_block(text, 1), Some("JANEIRO\n01 QUI 0512 1.3\n"));
/// assert_eq!(slice_month_block(text, 3), None);
/// ```
pub fn slice_month_block(text: &str, month: u32) -> Option<&str> {
    let name = month_name(month)?;
    let found = name_pattern(name).find(text)?;
    let start = found.start();

    let Some(next_name) = month_name(month + 1) else {
        return Some(&text[start..]);
    };

    // Successor search starts strictly after the current name ends
    let end = name_pattern(next_name)
        .find_at(text, found.end())
        .map_or(text.len(), |m| m.start());

    Some(&text[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_name_bounds() {
        assert_eq!(month_name(1), Some("Janeiro"));
        assert_eq!(month_name(12), Some("Dezembro"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn test_block_ends_at_next_month() {
        let text = "header Abril 01 QUA 0100 1.0 Maio 01 SEX 0200 2.0";
        assert_eq!(slice_month_block(text, 4), Some("Abril 01 QUA 0100 1.0 "));
        assert_eq!(slice_month_block(text, 5), Some("Maio 01 SEX 0200 2.0"));
    }

    #[test]
    fn test_case_insensitive_with_cedilla() {
        let text = "MARÇO\n02 SEG 0300 0.4\nABRIL";
        assert_eq!(slice_month_block(text, 3), Some("MARÇO\n02 SEG 0300 0.4\n"));
    }

    #[test]
    fn test_missing_successor_runs_to_end() {
        let text = "Junho\n01 SEG 0100 1.0\nAgosto";
        assert_eq!(slice_month_block(text, 6), Some(text));
    }

    #[test]
    fn test_december_runs_to_end() {
        let text = "Dezembro\n31 QUI 2300 1.9\nJaneiro";
        assert_eq!(slice_month_block(text, 12), Some(text));
    }

    #[test]
    fn test_only_first_occurrence_is_used() {
        let text = "Julho a Agosto b Julho c Agosto d";
        assert_eq!(slice_month_block(text, 7), Some("Julho a "));
        assert_eq!(slice_month_block(text, 8), Some("Agosto b Julho c Agosto d"));
    }

    #[test]
    fn test_successor_before_month_is_ignored() {
        // "Junho" appearing before "Maio" must not produce an empty block
        let text = "Junho legend\nMaio\n01 SEX 0200 2.0\nJunho\n01 SEG 0300 1.0";
        assert_eq!(slice_month_block(text, 5), Some("Maio\n01 SEX 0200 2.0\n"));
    }

    #[test]
    fn test_absent_month() {
        assert_eq!(slice_month_block("nothing here", 2), None);
        assert_eq!(slice_month_block("", 1), None);
    }
}
