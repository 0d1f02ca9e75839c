use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use indexmap::IndexMap;

/// A 2-D block of cell values, row-major
pub type Grid = Vec<Vec<CellValue>>;

/// A workbook held in memory: named grids in sheet order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Book {
    sheets: IndexMap<String, Grid>,
}

impl Book {
    /// Create a new empty book
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a book holding a single empty sheet
    #[must_use]
    pub fn with_sheet(name: &str) -> Self {
        let mut sheets = IndexMap::new();
        sheets.insert(name.to_string(), Grid::new());
        Book { sheets }
    }

    /// Get all sheet names in order
    #[must_use]
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.keys().cloned().collect()
    }

    /// Check if a sheet exists, ignoring case as Excel does
    #[must_use]
    pub fn has_sheet(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Position of the sheet whose name equals `name` ignoring case.
    fn index_of(&self, name: &str) -> Option<usize> {
        let wanted = name.to_lowercase();
        self.sheets
            .keys()
            .position(|existing| existing.to_lowercase() == wanted)
    }

    /// Iterate over `(name, grid)` pairs in sheet order
    pub fn sheets(&self) -> impl Iterator<Item = (&str, &Grid)> {
        self.sheets.iter().map(|(name, grid)| (name.as_str(), grid))
    }

    // ===== Sheet Management =====

    /// Append a new empty sheet
    pub fn create_sheet(&mut self, name: &str) -> Result<()> {
        if self.has_sheet(name) {
            return Err(SheetError::SheetAlreadyExists {
                name: name.to_string(),
            });
        }
        self.sheets.insert(name.to_string(), Grid::new());
        Ok(())
    }

    /// Remove a sheet by name, returning its grid
    pub fn remove_sheet(&mut self, name: &str) -> Result<Grid> {
        self.index_of(name)
            .and_then(|index| self.sheets.shift_remove_index(index))
            .map(|(_, grid)| grid)
            .ok_or_else(|| SheetError::SheetNotFound {
                name: name.to_string(),
            })
    }

    // ===== Grid Access =====

    /// Get the grid of a sheet
    pub fn read_grid(&self, name: &str) -> Result<&Grid> {
        self.index_of(name)
            .and_then(|index| self.sheets.get_index(index))
            .map(|(_, grid)| grid)
            .ok_or_else(|| SheetError::SheetNotFound {
                name: name.to_string(),
            })
    }

    /// Replace the whole contents of a sheet.
    ///
    /// An existing sheet keeps its position and name; a missing one is appended.
    pub fn write_grid(&mut self, name: &str, grid: Grid) {
        match self.index_of(name) {
            Some(index) => {
                if let Some((_, existing)) = self.sheets.get_index_mut(index) {
                    *existing = grid;
                }
            }
            None => {
                self.sheets.insert(name.to_string(), grid);
            }
        }
    }
}
