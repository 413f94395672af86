//! Column width computation.
//!
//! Natural widths are measured on the raw cell text, before any padding or
//! wrapping, in `char`s. [`ColumnWidths::adjusted`] then applies the layout
//! options to produce the widths used for rendering.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Csv2RstError;
use crate::options::LayoutOptions;
use crate::table::Table;
use crate::Result;

/// Length of a cell as used for sizing: one unit per `char`.
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// One width per column index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnWidths(Vec<usize>);

impl ColumnWidths {
    /// Natural widths of `table`: entry `i` is the longest cell `i` over all
    /// rows that have one. The length is the longest row's length.
    pub fn natural(table: &Table) -> Self {
        let mut widths: Vec<usize> = Vec::new();
        for row in table {
            for (i, cell) in row.iter().enumerate() {
                let width = text_width(cell);
                match widths.get_mut(i) {
                    Some(current) => *current = (*current).max(width),
                    None => widths.push(width),
                }
            }
        }
        debug!(?widths, "computed natural column widths");
        Self(widths)
    }

    /// Widths after applying padding and the wrap limit.
    ///
    /// Fails if an option is out of range or a width does not fit in `usize`.
    pub fn adjusted(&self, options: &LayoutOptions) -> Result<Self> {
        options.validate()?;
        let widths = self
            .0
            .iter()
            .map(|&w| options.final_width(w))
            .collect::<Result<Vec<usize>>>()
            .map_err(|_| Csv2RstError::TooWide {
                columns: self.0.len(),
            })?;
        debug!(
            padding = ?options.padding,
            wordwrap = ?options.wordwrap,
            ?widths,
            "adjusted column widths"
        );
        Ok(Self(widths))
    }

    /// Length in chars of one rendered line: every width plus a border
    /// character per column boundary.
    pub fn line_width(&self) -> Result<usize> {
        self.0
            .iter()
            .try_fold(1usize, |total, &w| total.checked_add(w)?.checked_add(1))
            .ok_or(Csv2RstError::TooWide {
                columns: self.0.len(),
            })
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no columns at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Width of column `index`, if it exists.
    pub fn get(&self, index: usize) -> Option<usize> {
        self.0.get(index).copied()
    }

    /// Iterate over the widths in column order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// The widths as a slice.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for ColumnWidths {
    fn from(widths: Vec<usize>) -> Self {
        Self(widths)
    }
}
