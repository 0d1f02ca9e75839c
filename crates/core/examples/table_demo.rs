//! Walk through the table operations against a scratch workbook.
//!
//! Run with: RUST_LOG=debug cargo run --example table_demo -p sheetdb-core

use sheetdb_core::{row, CellValue, Predicate, TableStore};
use std::env;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let path = env::temp_dir().join("sheetdb_demo.xlsx");
    if path.exists() {
        std::fs::remove_file(&path)?;
    }

    println!("=== TableStore Demo ===\n");

    let mut table = TableStore::open(&path)?;
    table.insert(row([("id", CellValue::Int(1)), ("name", "Alice".into()), ("age", 30.into())]))?;
    table.insert(row([("id", CellValue::Int(2)), ("name", "Bob".into()), ("age", 25.into())]))?;
    println!("Columns: {:?}", table.columns());

    let alice = table.select(&row([("name", "Alice")]));
    println!("select name=Alice: {:?}", alice);

    let bob = table.get_column_value("id", &CellValue::Int(2), "name");
    println!("name of id=2: {:?}", bob);

    table.update(&row([("id", 1)]), &row([("age", 31)]))?;
    println!(
        "age of id=1 after update: {:?}",
        table.get_column_value("id", &CellValue::Int(1), "age")
    );

    table.delete(&row([("id", 2)]))?;
    println!("select id=2 after delete: {:?}", table.select(&row([("id", 2)])));

    table.add_column("email", "unknown@example.com")?;
    println!("Non-empty emails: {}", table.count_non_empty("email"));
    table.remove_column("email")?;

    table.add_sheet("Archive", &[row([("id", CellValue::Int(2)), ("name", "Bob".into())])])?;
    println!("Sheets: {:?}", table.list_sheet_names()?);

    let reopened = TableStore::open(&path)?;
    println!("Rows after reopen: {:?}", reopened.select(&Predicate::new()));
    println!("\nWorkbook written to {}", path.display());

    Ok(())
}
