use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use salesdesk_core::AggregateId;
use salesdesk_sales::{Ledger, LedgerId, LineField};

fn filled_ledger(rows: usize) -> Ledger {
    let mut ledger = Ledger::new(LedgerId::new(AggregateId::new()));
    for i in 0..rows {
        let quantity = (i % 50 + 1).to_string();
        let price = format!("{}.{:02}", i % 1000, i % 100);
        ledger.add_item("Widget", &quantity, &price).unwrap();
    }
    ledger
}

fn bench_add_item(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_item");
    group.throughput(Throughput::Elements(1));

    for rows in [0usize, 100, 1_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(rows), rows, |b, &rows| {
            let template = filled_ledger(rows);
            b.iter_batched(
                || template.clone(),
                |mut ledger| {
                    ledger
                        .add_item(black_box("Pen"), black_box("10"), black_box("2.50"))
                        .unwrap();
                    ledger
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_edit_and_total(c: &mut Criterion) {
    let mut group = c.benchmark_group("edit_and_total");

    for rows in [100usize, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), rows, |b, &rows| {
            let mut ledger = filled_ledger(rows);
            let target = ledger.items()[rows / 2].id_typed();
            let mut flip = false;
            b.iter(|| {
                flip = !flip;
                let quantity = if flip { "7" } else { "3" };
                ledger.edit_item(target, LineField::Quantity, quantity).unwrap();
                black_box(ledger.total())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_add_item, bench_edit_and_total);
criterion_main!(benches);
