use crate::book::{Book, Grid};
use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use calamine::{open_workbook, Data, Range, Reader, Xlsx, XlsxError};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Options for reading Excel files
#[derive(Debug, Clone)]
pub struct XlsxReadOptions {
    /// Read whole-valued numbers back as integers
    pub normalize_integers: bool,
}

impl Default for XlsxReadOptions {
    fn default() -> Self {
        XlsxReadOptions {
            normalize_integers: true,
        }
    }
}

impl XlsxReadOptions {
    /// Set whether whole-valued numbers are read back as integers
    #[must_use]
    pub fn with_normalize_integers(mut self, normalize: bool) -> Self {
        self.normalize_integers = normalize;
        self
    }
}

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::DateTime(dt) => {
            // Excel stores dates as days since 1899-12-30
            CellValue::Float(dt.as_f64())
        }
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#ERROR: {e:?}")),
    }
}

/// Convert a used range into a grid anchored at A1.
///
/// calamine trims leading empty rows and columns from the range, so the
/// offset of its start cell is restored with empty cells.
fn range_to_grid(range: &Range<Data>, options: &XlsxReadOptions) -> Grid {
    let Some((start_row, start_col)) = range.start() else {
        return Grid::new();
    };

    let convert = |data: &Data| {
        let value = data_to_cell_value(data);
        if options.normalize_integers {
            value.normalize_integer()
        } else {
            value
        }
    };

    let mut grid: Grid = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = vec![CellValue::Null; start_col as usize];
        cells.extend(row.iter().map(convert));
        grid.push(cells);
    }
    grid
}

fn open_xlsx(path: &Path) -> Result<Xlsx<BufReader<File>>> {
    open_workbook(path).map_err(|e: XlsxError| SheetError::io(e))
}

/// Write grid data to a worksheet
fn write_to_worksheet(worksheet: &mut Worksheet, grid: &Grid) -> Result<()> {
    for (row_idx, row) in grid.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let row_num = u32::try_from(row_idx).map_err(|_| SheetError::io("Row index overflow"))?;
            let col_num =
                u16::try_from(col_idx).map_err(|_| SheetError::io("Column index overflow"))?;

            match cell {
                CellValue::Null => {} // Leave empty
                CellValue::Bool(b) => {
                    worksheet
                        .write_boolean(row_num, col_num, *b)
                        .map_err(SheetError::io)?;
                }
                CellValue::Int(i) => {
                    // Note: Excel stores all numbers as f64, so integers > 2^53
                    // (9,007,199,254,740,992) may lose precision
                    worksheet
                        .write_number(row_num, col_num, *i as f64)
                        .map_err(SheetError::io)?;
                }
                CellValue::Float(f) => {
                    if !f.is_finite() {
                        return Err(SheetError::io(format!(
                            "Cannot store non-finite number {f} at row {}, column {}",
                            row_idx + 1,
                            col_idx + 1
                        )));
                    }
                    worksheet
                        .write_number(row_num, col_num, *f)
                        .map_err(SheetError::io)?;
                }
                CellValue::String(s) => {
                    worksheet
                        .write_string(row_num, col_num, s)
                        .map_err(SheetError::io)?;
                }
            }
        }
    }

    Ok(())
}

impl Book {
    /// Load a book from an Excel file (all sheets)
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be opened or read.
    pub fn from_xlsx<P: AsRef<Path>>(path: P, options: &XlsxReadOptions) -> Result<Self> {
        let mut workbook = open_xlsx(path.as_ref())?;

        let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
        let mut book = Book::new();

        for sheet_name in sheet_names {
            let range = workbook
                .worksheet_range(&sheet_name)
                .map_err(|e: XlsxError| SheetError::io(e))?;
            book.write_grid(&sheet_name, range_to_grid(&range, options));
        }

        Ok(book)
    }

    /// Load a book, or create and save one holding a single empty sheet
    /// when nothing exists at `path` yet.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, or the new one cannot be written.
    pub fn open_or_create<P: AsRef<Path>>(
        path: P,
        default_sheet: &str,
        options: &XlsxReadOptions,
    ) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_xlsx(path, options);
        }

        let book = Book::with_sheet(default_sheet);
        book.save_as_xlsx(path)?;
        Ok(book)
    }

    /// Save the book to an Excel file, replacing whatever is there
    ///
    /// The file is only touched once the whole workbook has been built, so
    /// an invalid sheet name or cell leaves the previous file intact.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be created or written.
    pub fn save_as_xlsx<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut workbook = Workbook::new();

        for (name, grid) in self.sheets() {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(name).map_err(SheetError::io)?;
            write_to_worksheet(worksheet, grid)?;
        }

        let buffer = workbook.save_to_buffer().map_err(SheetError::io)?;
        std::fs::write(path.as_ref(), buffer)?;

        Ok(())
    }

    /// Get sheet names from an Excel file without loading data
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be opened.
    pub fn xlsx_sheet_names<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
        let workbook = open_xlsx(path.as_ref())?;
        Ok(workbook.sheet_names().to_vec())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::approx_constant)]
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_xlsx_types() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("types.xlsx");

        let mut book = Book::new();
        book.write_grid(
            "Types",
            vec![vec![
                CellValue::String("text".to_string()),
                CellValue::Int(42),
                CellValue::Float(3.14),
                CellValue::Bool(true),
                CellValue::Null,
            ]],
        );
        book.save_as_xlsx(&path).unwrap();

        let loaded = Book::from_xlsx(&path, &XlsxReadOptions::default()).unwrap();
        let grid = loaded.read_grid("Types").unwrap();

        assert_eq!(grid.len(), 1);
        // Note: trailing empty cells are not preserved in Excel files
        assert_eq!(grid[0].len(), 4);
        assert_eq!(grid[0][0], CellValue::String("text".to_string()));
        assert_eq!(grid[0][1], CellValue::Int(42));
        assert!(matches!(grid[0][2], CellValue::Float(f) if (f - 3.14).abs() < 0.01));
        assert_eq!(grid[0][3], CellValue::Bool(true));
    }

    #[test]
    fn test_xlsx_without_integer_normalization() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("floats.xlsx");

        let mut book = Book::new();
        book.write_grid("Data", vec![vec![CellValue::Int(42)]]);
        book.save_as_xlsx(&path).unwrap();

        let options = XlsxReadOptions::default().with_normalize_integers(false);
        let loaded = Book::from_xlsx(&path, &options).unwrap();

        // Int becomes Float in Excel
        assert!(matches!(
            loaded.read_grid("Data").unwrap()[0][0],
            CellValue::Float(f) if (f - 42.0).abs() < 0.01
        ));
    }

    #[test]
    fn test_leading_blanks_keep_position() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("offset.xlsx");

        let mut book = Book::new();
        book.write_grid(
            "Data",
            vec![
                vec![],
                vec![CellValue::Null, CellValue::from("b2")],
            ],
        );
        book.save_as_xlsx(&path).unwrap();

        let loaded = Book::from_xlsx(&path, &XlsxReadOptions::default()).unwrap();
        let grid = loaded.read_grid("Data").unwrap();

        assert_eq!(grid.len(), 2);
        assert!(grid[0].is_empty());
        assert_eq!(grid[1], vec![CellValue::Null, CellValue::from("b2")]);
    }

    #[test]
    fn test_xlsx_sheet_names_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("multi.xlsx");

        let mut book = Book::new();
        book.create_sheet("First").unwrap();
        book.create_sheet("Second").unwrap();
        book.create_sheet("Third").unwrap();
        book.save_as_xlsx(&path).unwrap();

        let names = Book::xlsx_sheet_names(&path).unwrap();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_open_or_create_new_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("new.xlsx");

        let book = Book::open_or_create(&path, "People", &XlsxReadOptions::default()).unwrap();

        assert!(path.exists());
        assert_eq!(book.sheet_names(), vec!["People"]);
        assert!(book.read_grid("People").unwrap().is_empty());

        let reopened = Book::open_or_create(&path, "Other", &XlsxReadOptions::default()).unwrap();
        assert_eq!(reopened.sheet_names(), vec!["People"]);
    }

    #[test]
    fn test_non_finite_float_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nan.xlsx");

        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut book = Book::new();
            book.write_grid("Data", vec![vec![CellValue::Int(1), CellValue::Float(value)]]);

            let result = book.save_as_xlsx(&path);
            assert!(matches!(result, Err(SheetError::Io(_))));
            assert!(!path.exists());
        }
    }

    #[test]
    fn test_failed_save_keeps_previous_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("keep.xlsx");

        let mut book = Book::with_sheet("Data");
        book.write_grid("Data", vec![vec![CellValue::from("kept")]]);
        book.save_as_xlsx(&path).unwrap();

        // '[' is not allowed in sheet names
        book.create_sheet("bad[name]").unwrap();
        assert!(matches!(book.save_as_xlsx(&path), Err(SheetError::Io(_))));

        let loaded = Book::from_xlsx(&path, &XlsxReadOptions::default()).unwrap();
        assert_eq!(loaded.sheet_names(), vec!["Data"]);
        assert_eq!(
            loaded.read_grid("Data").unwrap(),
            &vec![vec![CellValue::from("kept")]]
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.xlsx");

        let result = Book::from_xlsx(&path, &XlsxReadOptions::default());
        assert!(matches!(result, Err(SheetError::Io(_))));
    }
}
