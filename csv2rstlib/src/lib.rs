//! # csv2rstlib
//!
//! Render CSV data as reStructuredText grid tables.
//!
//! ## Overview
//!
//! The conversion is a short pipeline:
//!
//! 1. **Source**: read every CSV record into an in-memory [`Table`]
//! 2. **Widths**: compute each column's natural width ([`ColumnWidths::natural`])
//! 3. **Layout**: apply padding and the wrap limit ([`ColumnWidths::adjusted`])
//! 4. **Render**: write the bordered, word-wrapped grid ([`write_grid`])
//!
//! The table is buffered in full, so input that cannot be rewound (such as
//! standard input) works the same as a file.
//!
//! ## Example
//!
//! ```rust
//! use csv2rstlib::{convert, LayoutOptions};
//!
//! let input = "a,b\nccc,d\n";
//! let mut output = Vec::new();
//! convert(input.as_bytes(), &mut output, &LayoutOptions::new()).unwrap();
//!
//! assert_eq!(
//!     String::from_utf8(output).unwrap(),
//!     "+---+-+\n|a  |b|\n+===+=+\n|ccc|d|\n+---+-+\n"
//! );
//! ```
//!
//! Word-wrapping a long column:
//!
//! ```rust
//! use csv2rstlib::{render_table, LayoutOptions, Table};
//!
//! let table = Table::from_rows([vec!["hello world", "x"]]);
//! let options = LayoutOptions::new().wordwrap(Some(5));
//! let rendered = render_table(&table, &options).unwrap();
//!
//! assert_eq!(rendered, "+-----+-+\n|hello|x|\n|world| |\n+=====+=+\n");
//! ```

pub mod error;
pub mod options;
pub mod render;
pub mod source;
pub mod table;
pub mod widths;

use std::io::{Read, Write};

use tracing::debug;

pub use error::Csv2RstError;
pub use options::{parse_positive_width_option, parse_width_option, LayoutOptions};
pub use render::{border_line, render_row, render_table, wrap_cell, wrap_text, write_table};
pub use source::{create_output, open_input, read_table, read_table_from_path};
pub use table::{Row, Table};
pub use widths::ColumnWidths;

/// Result type for csv2rstlib operations
pub type Result<T> = std::result::Result<T, Csv2RstError>;

/// Read CSV from `reader` and write it to `writer` as a grid table.
///
/// Returns the column widths the table was rendered with. The writer is
/// flushed before returning.
pub fn convert<R, W>(reader: R, writer: &mut W, options: &LayoutOptions) -> Result<ColumnWidths>
where
    R: Read,
    W: Write + ?Sized,
{
    let table = read_table(reader)?;
    write_grid(&table, writer, options)
}

/// Lay out an already-read `table` and write it to `writer`, then flush.
///
/// Returns the column widths the table was rendered with. Nothing is written
/// if the options are out of range.
pub fn write_grid<W>(
    table: &Table,
    writer: &mut W,
    options: &LayoutOptions,
) -> Result<ColumnWidths>
where
    W: Write + ?Sized,
{
    let widths = ColumnWidths::natural(table).adjusted(options)?;
    write_table(table, &widths, options.skip_title, writer)?;
    writer.flush()?;
    debug!(rows = table.len(), columns = widths.len(), "table written");
    Ok(widths)
}
