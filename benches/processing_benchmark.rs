use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use inmet_processor::models::RecordTable;
use inmet_processor::processors::{GridAssembler, TemporalIndexBuilder};
use inmet_processor::utils::sanitize::sanitize_labels;

/// Synthetic observation table: one row per hour over `days` days,
/// `variables` numeric columns.
fn create_test_table(days: usize, variables: usize) -> RecordTable {
    let mut columns = vec!["Data".to_string(), "Hora UTC".to_string()];
    for v in 0..variables {
        columns.push(format!("VARIAVEL {} (°C)", v));
    }

    let mut rows = Vec::with_capacity(days * 24);
    for day in 0..days {
        for hour in 0..24 {
            let mut row = vec![
                Some(format!("2024/01/{:02}", (day % 28) + 1)),
                Some(format!("{:02}00 UTC", hour)),
            ];
            for v in 0..variables {
                row.push(Some(format!("{}.5", (day + hour + v) % 40)));
            }
            rows.push(row);
        }
    }

    RecordTable {
        columns,
        date_index: 0,
        hour_index: 1,
        rows,
    }
}

fn benchmark_grid_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_assembly");

    for days in [7, 28] {
        let table = create_test_table(days, 8);
        group.bench_with_input(BenchmarkId::from_parameter(days), &table, |b, table| {
            b.iter(|| {
                let index = TemporalIndexBuilder::new().build(black_box(table));
                let grids = GridAssembler::new().assemble(black_box(table), &index);
                black_box(grids)
            })
        });
    }

    group.finish();
}

fn benchmark_sanitizer(c: &mut Criterion) {
    let labels: Vec<String> = (0..64)
        .map(|i| format!("PRECIPITAÇÃO TOTAL, HORÁRIO {} (mm/h²)", i))
        .collect();

    c.bench_function("sanitize_labels", |b| {
        b.iter(|| {
            let names = sanitize_labels(labels.iter().map(String::as_str));
            black_box(names)
        })
    });
}

criterion_group!(benches, benchmark_grid_assembly, benchmark_sanitizer);
criterion_main!(benches);
