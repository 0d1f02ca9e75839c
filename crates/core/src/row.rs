//! Records and equality predicates.

use indexmap::IndexMap;
use sheetdb_sheet::CellValue;

/// One record: column name to cell value.
pub type Row = IndexMap<String, CellValue>;

/// An equality filter: every listed column must hold the given value.
pub type Predicate = Row;

/// Build a row from `(column, value)` pairs.
///
/// ```
/// use sheetdb_core::{row, CellValue};
///
/// let r = row([("id", CellValue::Int(1)), ("name", "Alice".into())]);
/// assert_eq!(r["name"], CellValue::from("Alice"));
/// ```
pub fn row<I, K, V>(pairs: I) -> Row
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<CellValue>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Value of `column` in `row`, reading a missing key as null.
pub(crate) fn value_of<'a>(row: &'a Row, column: &str) -> &'a CellValue {
    const NULL: &CellValue = &CellValue::Null;
    row.get(column).unwrap_or(NULL)
}

/// Check whether `row` satisfies every pair of `predicate`.
///
/// Comparison is strict: `Int(1)` does not match `"1"` or `Float(1.0)`.
/// An empty predicate matches every row.
#[must_use]
pub fn matches(row: &Row, predicate: &Predicate) -> bool {
    predicate
        .iter()
        .all(|(column, expected)| value_of(row, column) == expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Row {
        row([
            ("id", CellValue::Int(1)),
            ("name", "Alice".into()),
            ("age", CellValue::Int(30)),
        ])
    }

    #[test]
    fn test_empty_predicate_matches() {
        assert!(matches(&alice(), &Predicate::new()));
        assert!(matches(&Row::new(), &Predicate::new()));
    }

    #[test]
    fn test_all_pairs_must_match() {
        assert!(matches(&alice(), &row([("name", "Alice")])));
        assert!(matches(
            &alice(),
            &row([("id", CellValue::Int(1)), ("age", CellValue::Int(30))])
        ));
        assert!(!matches(
            &alice(),
            &row([("id", CellValue::Int(1)), ("age", CellValue::Int(31))])
        ));
    }

    #[test]
    fn test_types_are_not_coerced() {
        assert!(!matches(&alice(), &row([("id", "1")])));
        assert!(!matches(&alice(), &row([("id", 1.0)])));
    }

    #[test]
    fn test_missing_column_reads_as_null() {
        assert!(matches(&alice(), &row([("email", CellValue::Null)])));
        assert!(!matches(&alice(), &row([("email", "")])));
    }
}
