//! A single sheet of a workbook treated as a table of records.
//!
//! Row 0 of the sheet is the header; every following row is one record.
//! The whole table lives in memory and every mutation rewrites the
//! workbook file before returning, so each call costs O(rows) I/O.

use crate::options::TableOptions;
use crate::row::{matches, value_of, Predicate, Row};
use crate::schema::Schema;
use sheetdb_sheet::{Book, CellValue, Grid, Result, SheetError};
use std::path::{Path, PathBuf};

/// In-memory rows of one sheet, kept in sync with the workbook on disk.
///
/// Not safe to share a file between several stores: the last one to save
/// overwrites the whole workbook.
#[derive(Debug, Clone)]
pub struct TableStore {
    path: PathBuf,
    options: TableOptions,
    schema: Schema,
    rows: Vec<Row>,
}

impl TableStore {
    /// Open the default sheet (`Sheet1`) of the workbook at `path`.
    ///
    /// A missing file or sheet is created empty.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, TableOptions::default())
    }

    /// Open a named sheet of the workbook at `path`.
    pub fn open_sheet<P: AsRef<Path>>(path: P, sheet_name: &str) -> Result<Self> {
        Self::open_with_options(path, TableOptions::default().with_sheet_name(sheet_name))
    }

    pub fn open_with_options<P: AsRef<Path>>(path: P, options: TableOptions) -> Result<Self> {
        let mut store = TableStore {
            path: path.as_ref().to_path_buf(),
            options,
            schema: Schema::new(),
            rows: Vec::new(),
        };
        store.reload()?;
        Ok(store)
    }

    /// Discard the in-memory rows and read them again from disk.
    ///
    /// This is the way back to a consistent state after a failed save.
    pub fn reload(&mut self) -> Result<()> {
        let sheet = self.options.sheet_name.as_str();
        let mut book =
            Book::open_or_create(&self.path, sheet, &self.options.read_options())?;

        let (schema, rows) = if book.has_sheet(sheet) {
            grid_to_rows(book.read_grid(sheet)?)
        } else {
            book.create_sheet(sheet)?;
            book.save_as_xlsx(&self.path)?;
            tracing::info!("Created sheet '{}' in {}", sheet, self.path.display());
            (Schema::new(), Vec::new())
        };

        tracing::debug!(
            "Loaded {} rows ({} columns) from sheet '{}' in {}",
            rows.len(),
            schema.len(),
            sheet,
            self.path.display()
        );
        self.schema = schema;
        self.rows = rows;
        Ok(())
    }

    /// Write the current rows over the table's sheet.
    ///
    /// Other sheets of the workbook are read and written back unchanged.
    pub fn save(&self) -> Result<()> {
        let sheet = self.options.sheet_name.as_str();
        let mut book = self.open_book()?;
        book.write_grid(sheet, rows_to_grid(&self.schema, &self.rows));
        book.save_as_xlsx(&self.path)?;

        tracing::debug!(
            "Saved {} rows to sheet '{}' in {}",
            self.rows.len(),
            sheet,
            self.path.display()
        );
        Ok(())
    }

    fn open_book(&self) -> Result<Book> {
        if self.path.exists() {
            Book::from_xlsx(&self.path, &self.options.read_options())
        } else {
            Ok(Book::new())
        }
    }

    // ===== Accessors =====

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn sheet_name(&self) -> &str {
        &self.options.sheet_name
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Columns written as the header, in order.
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        self.schema.columns().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    // ===== Queries =====

    /// All rows matching `predicate`, in table order.
    ///
    /// Returns `None` when nothing matches; a returned vector is never empty.
    #[must_use]
    pub fn select(&self, predicate: &Predicate) -> Option<Vec<&Row>> {
        let found: Vec<&Row> = self
            .rows
            .iter()
            .filter(|row| matches(row, predicate))
            .collect();
        if found.is_empty() {
            None
        } else {
            Some(found)
        }
    }

    /// Value of `target_column` in the first row whose `search_column`
    /// equals `search_value`.
    #[must_use]
    pub fn get_column_value(
        &self,
        search_column: &str,
        search_value: &CellValue,
        target_column: &str,
    ) -> Option<&CellValue> {
        self.rows
            .iter()
            .find(|row| value_of(row, search_column) == search_value)
            .and_then(|row| row.get(target_column))
    }

    /// Number of rows whose `column` holds something other than null or "".
    #[must_use]
    pub fn count_non_empty(&self, column: &str) -> usize {
        self.rows
            .iter()
            .filter(|row| !value_of(row, column).is_empty())
            .count()
    }

    // ===== Mutations =====

    /// Append a row as given and save.
    pub fn insert(&mut self, row: Row) -> Result<()> {
        self.schema.extend_from(&row);
        self.rows.push(row);
        self.save()
    }

    /// Merge `patch` into every row matching `predicate` and save.
    ///
    /// Returns the number of rows updated.
    pub fn update(&mut self, predicate: &Predicate, patch: &Row) -> Result<usize> {
        let mut updated = 0;
        for row in self.rows.iter_mut().filter(|row| matches(row, predicate)) {
            for (column, value) in patch {
                row.insert(column.clone(), value.clone());
            }
            updated += 1;
        }
        if updated > 0 {
            self.schema.extend_from(patch);
        }
        self.save()?;
        Ok(updated)
    }

    /// Remove every row matching `predicate` and save.
    ///
    /// Returns the number of rows removed.
    pub fn delete(&mut self, predicate: &Predicate) -> Result<usize> {
        let before = self.rows.len();
        self.rows.retain(|row| !matches(row, predicate));
        self.save()?;
        Ok(before - self.rows.len())
    }

    // ===== Columns =====

    /// Give every row lacking `column` the value `default` and save.
    pub fn add_column(&mut self, column: &str, default: impl Into<CellValue>) -> Result<()> {
        let default = default.into();
        for row in &mut self.rows {
            row.entry(column.to_string())
                .or_insert_with(|| default.clone());
        }
        self.schema.push(column);
        self.save()
    }

    /// Drop `column` from every row and from the header, then save.
    pub fn remove_column(&mut self, column: &str) -> Result<()> {
        for row in &mut self.rows {
            row.shift_remove(column);
        }
        self.schema.remove(column);
        self.save()
    }

    // ===== Sheets =====

    /// Create another sheet in the same workbook, optionally seeded with rows.
    ///
    /// The header is the union of the seed rows' keys by first appearance.
    pub fn add_sheet(&self, name: &str, initial_rows: &[Row]) -> Result<()> {
        let mut book = self.open_book()?;
        book.create_sheet(name)?;
        if !initial_rows.is_empty() {
            let schema = Schema::from_rows(initial_rows);
            book.write_grid(name, rows_to_grid(&schema, initial_rows));
        }
        book.save_as_xlsx(&self.path)?;

        tracing::info!(
            "Added sheet '{}' with {} rows to {}",
            name,
            initial_rows.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Delete another sheet from the workbook.
    ///
    /// The table's own sheet cannot be removed through its store.
    pub fn remove_sheet(&self, name: &str) -> Result<()> {
        if name.to_lowercase() == self.sheet_name().to_lowercase() {
            return Err(SheetError::SheetInUse {
                name: name.to_string(),
            });
        }
        let mut book = self.open_book()?;
        book.remove_sheet(name)?;
        book.save_as_xlsx(&self.path)?;

        tracing::info!("Removed sheet '{}' from {}", name, self.path.display());
        Ok(())
    }

    /// Whether the workbook has a sheet called `name`, ignoring case.
    pub fn sheet_exists(&self, name: &str) -> Result<bool> {
        let wanted = name.to_lowercase();
        Ok(self
            .list_sheet_names()?
            .iter()
            .any(|sheet| sheet.to_lowercase() == wanted))
    }

    /// Names of all sheets in the workbook, in workbook order.
    pub fn list_sheet_names(&self) -> Result<Vec<String>> {
        Book::xlsx_sheet_names(&self.path)
    }
}

/// Split a sheet grid into its header and records.
///
/// Columns whose header cell is blank are dropped, as are rows with no
/// value at all. Short rows read as null in their missing columns.
fn grid_to_rows(grid: &Grid) -> (Schema, Vec<Row>) {
    let Some((header, body)) = grid.split_first() else {
        return (Schema::new(), Vec::new());
    };

    let mut schema = Schema::new();
    let mut names: Vec<Option<String>> = Vec::with_capacity(header.len());
    for (idx, cell) in header.iter().enumerate() {
        if cell.is_empty() {
            tracing::warn!("Skipping column {} with a blank header", idx + 1);
            names.push(None);
            continue;
        }
        let name = cell.as_str();
        if !schema.push(&name) {
            tracing::warn!("Duplicate header '{}'; the rightmost column wins", name);
        }
        names.push(Some(name));
    }

    let rows: Vec<Row> = body
        .iter()
        .filter(|cells| !cells.iter().all(CellValue::is_null))
        .map(|cells| {
            names
                .iter()
                .enumerate()
                .filter_map(|(idx, name)| {
                    let name = name.as_ref()?;
                    Some((name.clone(), cells.get(idx).cloned().unwrap_or_default()))
                })
                .collect::<Row>()
        })
        .collect();

    (schema, rows)
}

/// Lay rows out under `schema`; keys outside the schema are not written.
fn rows_to_grid(schema: &Schema, rows: &[Row]) -> Grid {
    if rows.is_empty() {
        return Grid::new();
    }

    let mut grid = Grid::with_capacity(rows.len() + 1);
    grid.push(schema.columns().map(CellValue::from).collect());
    for row in rows {
        grid.push(
            schema
                .columns()
                .map(|column| value_of(row, column).clone())
                .collect(),
        );
    }
    grid
}
