use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use sheetdb_core::{row, CellValue, Row, TableStore};
use sheetdb_sheet::{Book, Grid};
use std::path::Path;
use tempfile::tempdir;

fn person(id: i64) -> Row {
    row([
        ("id", CellValue::Int(id)),
        ("name", format!("person-{id}").into()),
        ("age", CellValue::Int(20 + id % 50)),
    ])
}

/// Write `size` people in one pass and open the table over them.
fn seeded(path: &Path, size: i64) -> TableStore {
    let mut grid: Grid = vec![vec!["id".into(), "name".into(), "age".into()]];
    grid.extend((0..size).map(|id| person(id).into_values().collect::<Vec<_>>()));

    let mut book = Book::with_sheet("Sheet1");
    book.write_grid("Sheet1", grid);
    book.save_as_xlsx(path).expect("seed workbook");
    TableStore::open(path).expect("open")
}

/// Each insert rewrites the whole workbook, so cost grows with table size.
fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_into_table");
    group.sample_size(10);

    for size in [10_i64, 100, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let dir = tempdir().expect("tempdir");
                    let table = seeded(&dir.path().join("bench.xlsx"), size);
                    (dir, table)
                },
                |(_dir, mut table)| table.insert(person(size)).expect("insert"),
                BatchSize::PerIteration,
            );
        });
    }

    group.finish();
}

fn bench_select(c: &mut Criterion) {
    let dir = tempdir().expect("tempdir");
    let table = seeded(&dir.path().join("select.xlsx"), 1_000);

    c.bench_function("select_by_id_1000_rows", |b| {
        let predicate = row([("id", CellValue::Int(999))]);
        b.iter(|| table.select(std::hint::black_box(&predicate)));
    });
}

criterion_group!(benches, bench_insert, bench_select);
criterion_main!(benches);
