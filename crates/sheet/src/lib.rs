//! Workbook I/O for sheetdb
//!
//! Holds a workbook in memory as an ordered set of named grids of cell
//! values, reads it from `.xlsx` files with calamine and writes it back
//! with rust_xlsxwriter. Nothing here knows about headers or records;
//! that lives in `sheetdb-core`.
//!
//! # Examples
//!
//! ```
//! use sheetdb_sheet::{Book, CellValue};
//!
//! let mut book = Book::with_sheet("Data");
//! book.create_sheet("Summary").unwrap();
//! book.write_grid("Data", vec![vec![CellValue::from("id")], vec![CellValue::Int(1)]]);
//!
//! assert_eq!(book.sheet_names(), vec!["Data", "Summary"]);
//! assert_eq!(book.read_grid("Data").unwrap().len(), 2);
//! ```
//!
//! ```no_run
//! use sheetdb_sheet::{Book, XlsxReadOptions};
//!
//! let book = Book::open_or_create("data.xlsx", "Sheet1", &XlsxReadOptions::default()).unwrap();
//! book.save_as_xlsx("copy.xlsx").unwrap();
//! ```

mod book;
mod cell;
mod error;
mod xlsx;

/// Re-export book types.
pub use book::{Book, Grid};
/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export XLSX read options.
pub use xlsx::XlsxReadOptions;
