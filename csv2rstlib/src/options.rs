//! Layout options that control the final column widths.
//!
//! Options are plain values passed into [`ColumnWidths::adjusted`]; nothing is
//! read from global state.
//!
//! [`ColumnWidths::adjusted`]: crate::ColumnWidths::adjusted

use serde::{Deserialize, Serialize};

use crate::error::Csv2RstError;
use crate::Result;

/// How a table is laid out on top of its natural column widths.
///
/// `None` means the option was not given. `Some(0)` padding is a valid,
/// distinct value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// Extra spaces added to every column's natural width
    pub padding: Option<usize>,
    /// Upper bound for every column's final width, applied after padding
    pub wordwrap: Option<usize>,
    /// Separate the first row with the regular `-` border instead of `=`
    pub skip_title: bool,
}

impl LayoutOptions {
    /// Options with no padding, no wrap limit and a distinguished first row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set extra padding
    pub fn padding(mut self, padding: Option<usize>) -> Self {
        self.padding = padding;
        self
    }

    /// Builder: set wrap limit
    pub fn wordwrap(mut self, wordwrap: Option<usize>) -> Self {
        self.wordwrap = wordwrap;
        self
    }

    /// Builder: set whether the first row loses its `=` border
    pub fn skip_title(mut self, skip: bool) -> Self {
        self.skip_title = skip;
        self
    }

    /// Check that both numeric options are within [`MAX_OPTION_WIDTH`].
    pub fn validate(&self) -> Result<()> {
        check_option_limit("padding", self.padding)?;
        check_option_limit("wordwrap", self.wordwrap)
    }

    /// Final width of a column whose natural width is `natural`.
    ///
    /// Padding is added first, then the wrap limit caps the result.
    pub fn final_width(&self, natural: usize) -> Result<usize> {
        let padded = match self.padding {
            Some(padding) => natural.checked_add(padding),
            None => Some(natural),
        };
        match (padded, self.wordwrap) {
            (Some(width), Some(limit)) => Ok(width.min(limit)),
            (Some(width), None) => Ok(width),
            // anything that overflowed is above any limit
            (None, Some(limit)) => Ok(limit),
            (None, None) => Err(Csv2RstError::TooWide { columns: 1 }),
        }
    }
}

/// Largest value accepted for `--extrapadding` and `--wordwrap`.
pub const MAX_OPTION_WIDTH: usize = 10_000;

fn check_option_limit(name: &'static str, value: Option<usize>) -> Result<()> {
    match value {
        Some(width) if width > MAX_OPTION_WIDTH => Err(Csv2RstError::InvalidOption {
            name,
            value: width.to_string(),
            reason: format!("must be at most {MAX_OPTION_WIDTH}"),
        }),
        _ => Ok(()),
    }
}

/// Parse a non-negative width option such as `--extrapadding`.
///
/// Values above [`MAX_OPTION_WIDTH`] are rejected.
pub fn parse_width_option(name: &'static str, value: &str) -> Result<usize> {
    let width = value
        .trim()
        .parse::<usize>()
        .map_err(|e| Csv2RstError::InvalidOption {
            name,
            value: value.to_string(),
            reason: format!("expected a non-negative integer ({e})"),
        })?;
    if width > MAX_OPTION_WIDTH {
        return Err(Csv2RstError::InvalidOption {
            name,
            value: value.to_string(),
            reason: format!("must be at most {MAX_OPTION_WIDTH}"),
        });
    }
    Ok(width)
}

/// Parse a width option that must be at least 1, such as `--wordwrap`.
pub fn parse_positive_width_option(name: &'static str, value: &str) -> Result<usize> {
    match parse_width_option(name, value)? {
        0 => Err(Csv2RstError::InvalidOption {
            name,
            value: value.to_string(),
            reason: "must be greater than zero".to_string(),
        }),
        width => Ok(width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = LayoutOptions::default();
        assert_eq!(options.padding, None);
        assert_eq!(options.wordwrap, None);
        assert!(!options.skip_title);
    }

    #[test]
    fn test_final_width_without_options() {
        assert_eq!(LayoutOptions::new().final_width(7).unwrap(), 7);
    }

    #[test]
    fn test_final_width_padding_only() {
        let options = LayoutOptions::new().padding(Some(3));
        assert_eq!(options.final_width(7).unwrap(), 10);
        assert_eq!(options.final_width(0).unwrap(), 3);
    }

    #[test]
    fn test_final_width_zero_padding_is_kept() {
        let options = LayoutOptions::new().padding(Some(0));
        assert_eq!(options.padding, Some(0));
        assert_eq!(options.final_width(4).unwrap(), 4);
    }

    #[test]
    fn test_final_width_wordwrap_only() {
        let options = LayoutOptions::new().wordwrap(Some(5));
        assert_eq!(options.final_width(12).unwrap(), 5);
        assert_eq!(options.final_width(2).unwrap(), 2);
    }

    #[test]
    fn test_final_width_padding_then_wordwrap() {
        let options = LayoutOptions::new().padding(Some(4)).wordwrap(Some(10));
        assert_eq!(options.final_width(3).unwrap(), 7);
        // padding is applied before the cap
        assert_eq!(options.final_width(8).unwrap(), 10);
    }

    #[test]
    fn test_parse_width_option() {
        assert_eq!(parse_width_option("--extrapadding", "0").unwrap(), 0);
        assert_eq!(parse_width_option("--extrapadding", " 12 ").unwrap(), 12);
    }

    #[test]
    fn test_parse_width_option_rejects_garbage() {
        for bad in ["", "-1", "abc", "1.5"] {
            let err = parse_width_option("--extrapadding", bad).unwrap_err();
            assert!(matches!(
                err,
                Csv2RstError::InvalidOption {
                    name: "--extrapadding",
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_parse_positive_width_option() {
        assert_eq!(parse_positive_width_option("--wordwrap", "40").unwrap(), 40);
        let err = parse_positive_width_option("--wordwrap", "0").unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_final_width_overflowing_padding_is_capped() {
        let options = LayoutOptions::new()
            .padding(Some(usize::MAX))
            .wordwrap(Some(12));
        assert_eq!(options.final_width(5).unwrap(), 12);
    }

    #[test]
    fn test_final_width_overflow_without_cap_is_an_error() {
        let options = LayoutOptions::new().padding(Some(usize::MAX));
        let err = options.final_width(5).unwrap_err();
        assert!(matches!(err, Csv2RstError::TooWide { .. }));
    }

    #[test]
    fn test_validate_rejects_huge_options() {
        assert!(LayoutOptions::new()
            .padding(Some(MAX_OPTION_WIDTH))
            .wordwrap(Some(1))
            .validate()
            .is_ok());
        let err = LayoutOptions::new()
            .padding(Some(usize::MAX))
            .validate()
            .unwrap_err();
        assert!(matches!(err, Csv2RstError::InvalidOption { name: "padding", .. }));
        let err = LayoutOptions::new()
            .wordwrap(Some(MAX_OPTION_WIDTH + 1))
            .validate()
            .unwrap_err();
        assert!(matches!(err, Csv2RstError::InvalidOption { name: "wordwrap", .. }));
    }

    #[test]
    fn test_parse_width_option_upper_limit() {
        assert_eq!(
            parse_width_option("--extrapadding", "10000").unwrap(),
            MAX_OPTION_WIDTH
        );
        for too_big in ["10001", "18446744073709551615", "99999999999999999999999"] {
            let err = parse_width_option("--extrapadding", too_big).unwrap_err();
            assert!(matches!(err, Csv2RstError::InvalidOption { .. }));
        }
        let err = parse_width_option("--extrapadding", "10001").unwrap_err();
        assert!(err.to_string().contains("at most 10000"));
    }
}
