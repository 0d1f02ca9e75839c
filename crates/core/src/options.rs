//! Table configuration.

use serde::Deserialize;
use sheetdb_sheet::XlsxReadOptions;

/// Name of the sheet a table uses when none is given.
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Options for opening a [`TableStore`](crate::TableStore)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Sheet holding the table
    pub sheet_name: String,
    /// Read whole-valued numbers back as integers
    pub normalize_integers: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            normalize_integers: true,
        }
    }
}

impl TableOptions {
    /// Set the sheet holding the table
    #[must_use]
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// Set whether whole-valued numbers are read back as integers
    #[must_use]
    pub fn with_normalize_integers(mut self, normalize: bool) -> Self {
        self.normalize_integers = normalize;
        self
    }

    pub(crate) fn read_options(&self) -> XlsxReadOptions {
        XlsxReadOptions::default().with_normalize_integers(self.normalize_integers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = TableOptions::default();
        assert_eq!(options.sheet_name, "Sheet1");
        assert!(options.normalize_integers);
    }

    #[test]
    fn test_deserialize_partial() {
        let options: TableOptions = serde_json::from_str(r#"{"sheet_name": "People"}"#).unwrap();
        assert_eq!(options, TableOptions::default().with_sheet_name("People"));

        let options: TableOptions =
            serde_json::from_str(r#"{"normalize_integers": false}"#).unwrap();
        assert_eq!(options.sheet_name, "Sheet1");
        assert!(!options.normalize_integers);
    }
}
