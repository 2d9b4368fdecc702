use std::sync::Arc;

use common::LineItem;
use criterion::{Criterion, criterion_group, criterion_main};
use inventory::StockTable;

fn bench_reserve_single_sku(c: &mut Criterion) {
    let stock = StockTable::new([("SKU-BENCH", u32::MAX)]);
    let items = vec![LineItem::new("SKU-BENCH", 1)];

    c.bench_function("inventory/reserve_single_sku", |b| {
        b.iter(|| stock.reserve(&items).unwrap());
    });
}

fn bench_reserve_batch(c: &mut Criterion) {
    let stock = StockTable::new((0..32).map(|i| (format!("SKU-{i:03}"), u32::MAX)));
    let items: Vec<LineItem> = (0..32)
        .map(|i| LineItem::new(format!("SKU-{i:03}"), 1))
        .collect();

    c.bench_function("inventory/reserve_batch_32", |b| {
        b.iter(|| stock.reserve(&items).unwrap());
    });
}

fn bench_contended_reserve(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let stock = Arc::new(StockTable::new([("SKU-HOT", u32::MAX)]));

    c.bench_function("inventory/contended_reserve_8_tasks", |b| {
        b.iter(|| {
            rt.block_on(async {
                let handles: Vec<_> = (0..8)
                    .map(|_| {
                        let stock = stock.clone();
                        tokio::spawn(async move {
                            stock.reserve(&[LineItem::new("SKU-HOT", 1)]).unwrap();
                        })
                    })
                    .collect();
                for handle in handles {
                    handle.await.unwrap();
                }
            });
        });
    });
}

criterion_group!(
    benches,
    bench_reserve_single_sku,
    bench_reserve_batch,
    bench_contended_reserve
);
criterion_main!(benches);
