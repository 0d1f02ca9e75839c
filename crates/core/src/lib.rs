//! # sheetdb-core
//!
//! Record-level access to one sheet of an `.xlsx` workbook.
//!
//! The first row of the sheet is the header; each following row is a
//! record mapping column name to cell value. [`TableStore`] keeps all
//! records in memory, answers equality queries, and rewrites the workbook
//! after every insert, update, delete, or column change.
//!
//! # Examples
//!
//! ```no_run
//! use sheetdb_core::{row, CellValue, TableStore};
//!
//! let mut table = TableStore::open("people.xlsx")?;
//! table.insert(row([("id", CellValue::Int(1)), ("name", "Alice".into())]))?;
//! table.insert(row([("id", CellValue::Int(2)), ("name", "Bob".into())]))?;
//!
//! let bob = table.get_column_value("id", &CellValue::Int(2), "name");
//! assert_eq!(bob, Some(&CellValue::from("Bob")));
//!
//! table.update(&row([("id", 1)]), &row([("name", "Alicia")]))?;
//! table.delete(&row([("id", 2)]))?;
//! assert!(table.select(&row([("id", 2)])).is_none());
//! # Ok::<(), sheetdb_core::SheetError>(())
//! ```
//!
//! # Persistence
//!
//! Every mutation reads the workbook, replaces the table's sheet, and
//! writes the whole file. Only cell values survive that rewrite. There is
//! no locking: two stores on the same file overwrite each other.

mod options;
mod row;
mod schema;
mod store;

pub use options::{TableOptions, DEFAULT_SHEET_NAME};
pub use row::{matches, row, Predicate, Row};
pub use schema::Schema;
pub use store::TableStore;

/// Re-export cell and error types from the workbook layer.
pub use sheetdb_sheet::{CellValue, Result, SheetError};
