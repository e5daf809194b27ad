use level_book::{OrderBook, OrderId, Side, setup_logger};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

// Number of threads to use for the test
const THREAD_COUNT: usize = 8;
// Duration of the test in seconds
const TEST_DURATION_SECS: u64 = 3;

fn main() {
    setup_logger();
    info!("Multi-threaded OrderBook Performance Test");
    info!("----------------------------------------");
    info!("Threads: {}", THREAD_COUNT);
    info!("Duration: {} seconds", TEST_DURATION_SECS);

    let book = Arc::new(OrderBook::new("PERF-TEST"));
    let next_id = Arc::new(AtomicU64::new(0));
    let running = Arc::new(AtomicBool::new(true));
    let barrier = Arc::new(Barrier::new(THREAD_COUNT + 1));

    let handles: Vec<_> = (0..THREAD_COUNT)
        .map(|thread_id| {
            let book = Arc::clone(&book);
            let next_id = Arc::clone(&next_id);
            let running = Arc::clone(&running);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let mut operations = 0u64;
                let mut own_orders = Vec::new();

                while running.load(Ordering::Relaxed) {
                    match thread_id % 4 {
                        // readers
                        3 => {
                            let _ = book.order_count(Side::Bid, 1);
                            let _ = book.price_at(Side::Offer, 1);
                        }
                        // writers: add, occasionally resize, then cancel older orders
                        _ => {
                            let id = OrderId(next_id.fetch_add(1, Ordering::Relaxed));
                            let side = if operations % 2 == 0 { Side::Bid } else { Side::Offer };
                            let base = if side == Side::Bid { 99.0 } else { 101.0 };
                            let price = base + (operations % 10) as f64 * 0.1;
                            if book.add_order(id, price, side, 10).is_ok() {
                                own_orders.push(id);
                            }
                            if let Some(id) = own_orders.last().filter(|_| operations % 5 == 0) {
                                let _ = book.change_size(*id, 5);
                            }
                            if own_orders.len() > 100 {
                                let oldest = own_orders.remove(0);
                                let _ = book.remove(oldest);
                            }
                        }
                    }
                    operations += 1;
                }
                operations
            })
        })
        .collect();

    barrier.wait();
    let start = Instant::now();
    thread::sleep(Duration::from_secs(TEST_DURATION_SECS));
    running.store(false, Ordering::Relaxed);

    let total: u64 = handles
        .into_iter()
        .map(|handle| handle.join().unwrap_or(0))
        .sum();
    let elapsed = start.elapsed().as_secs_f64();

    info!("Total operations: {}", total);
    info!("Operations/second: {:.2}", total as f64 / elapsed);
    info!("Resting orders: {}", book.len());
    info!("Bid levels: {}, offer levels: {}", book.depth(Side::Bid), book.depth(Side::Offer));
    info!("Level guards allocated: {}", book.lock_count());
    info!("Best bid: {:?}, best offer: {:?}", book.best_bid(), book.best_offer());
}
