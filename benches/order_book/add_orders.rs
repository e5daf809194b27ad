use criterion::{BenchmarkId, Criterion};
use level_book::{OrderBook, OrderId, Side};
use std::hint::black_box;

/// Register all benchmarks for adding orders to an order book
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("OrderBook - Add Orders");

    group.bench_function("create_order_book", |b| {
        b.iter(|| black_box(OrderBook::new("TEST-SYMBOL")))
    });

    // every order opens a new level
    group.bench_function("add_distinct_levels", |b| {
        b.iter(|| {
            let order_book = OrderBook::new("TEST-SYMBOL");
            for i in 0..100u64 {
                let _ = black_box(order_book.add_order(
                    OrderId(i),
                    1000.0 + i as f64,
                    Side::Bid,
                    10,
                ));
            }
        })
    });

    // every order queues behind the previous one
    group.bench_function("add_same_level", |b| {
        b.iter(|| {
            let order_book = OrderBook::new("TEST-SYMBOL");
            for i in 0..100u64 {
                let _ = black_box(order_book.add_order(OrderId(i), 1000.0, Side::Offer, 10));
            }
        })
    });

    for order_count in [100u64, 1_000, 10_000].iter() {
        group.bench_with_input(
            BenchmarkId::new("add_spread_over_50_levels", order_count),
            order_count,
            |b, &order_count| {
                b.iter(|| {
                    let order_book = OrderBook::new("TEST-SYMBOL");
                    for i in 0..order_count {
                        let side = if i % 2 == 0 { Side::Bid } else { Side::Offer };
                        let price = 1000.0 + (i % 50) as f64 * 0.5;
                        let _ = black_box(order_book.add_order(OrderId(i), price, side, 10));
                    }
                })
            },
        );
    }

    group.finish();
}
