//! Multi-threaded tests of the per-level locking scheme

#[cfg(test)]
mod concurrency_tests {
    use level_book::{Order, OrderBook, OrderBookError, OrderId, Side, SizeChangePolicy};
    use std::collections::HashSet;
    use std::sync::{Arc, Barrier};
    use std::thread;

    const THREAD_COUNT: u64 = 8;
    const ORDERS_PER_THREAD: u64 = 500;

    fn side_for(id: u64) -> Side {
        if id % 2 == 0 { Side::Bid } else { Side::Offer }
    }

    fn price_for(id: u64) -> f64 {
        100.0 + (id % 10) as f64
    }

    /// Checks that the locator and both indices agree with each other
    fn assert_consistent(book: &OrderBook) {
        let mut seen = HashSet::new();
        for side in [Side::Bid, Side::Offer] {
            let mut previous: Option<f64> = None;
            for level in 1..=book.depth(side) {
                let orders = book.orders_at_level(side, level);
                assert!(!orders.is_empty(), "{side} level {level} is empty");
                let price = orders[0].price();
                assert!(orders.iter().all(|o| o.price() == price && o.side() == side));
                if let Some(previous) = previous {
                    match side {
                        Side::Bid => assert!(price < previous),
                        Side::Offer => assert!(price > previous),
                    }
                }
                previous = Some(price);
                for order in orders {
                    assert!(seen.insert(order.id()), "order {} seen twice", order.id());
                    assert_eq!(book.get_order(order.id()), Some(order));
                }
            }
        }
        assert_eq!(seen.len(), book.len());
    }

    #[test]
    fn test_concurrent_adds() {
        let book = Arc::new(OrderBook::new("CONCURRENT"));
        let barrier = Arc::new(Barrier::new(THREAD_COUNT as usize));

        let handles: Vec<_> = (0..THREAD_COUNT)
            .map(|thread_id| {
                let book = Arc::clone(&book);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..ORDERS_PER_THREAD {
                        let id = thread_id * ORDERS_PER_THREAD + i;
                        book.add_order(OrderId(id), price_for(id), side_for(id), 1)
                            .unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(book.len() as u64, THREAD_COUNT * ORDERS_PER_THREAD);
        let total: usize = [Side::Bid, Side::Offer]
            .iter()
            .map(|side| book.all_orders(*side).count())
            .sum();
        assert_eq!(total as u64, THREAD_COUNT * ORDERS_PER_THREAD);
        assert_consistent(&book);
    }

    #[test]
    fn test_concurrent_add_and_remove() {
        let book = Arc::new(OrderBook::new("CONCURRENT"));
        let barrier = Arc::new(Barrier::new(THREAD_COUNT as usize));

        let handles: Vec<_> = (0..THREAD_COUNT)
            .map(|thread_id| {
                let book = Arc::clone(&book);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..ORDERS_PER_THREAD {
                        let id = thread_id * ORDERS_PER_THREAD + i;
                        book.add_order(OrderId(id), price_for(id), side_for(id), 1)
                            .unwrap();
                        // keep every third order
                        if i % 3 != 0 {
                            book.remove(OrderId(id)).unwrap();
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let expected = THREAD_COUNT * ORDERS_PER_THREAD.div_ceil(3);
        assert_eq!(book.len() as u64, expected);
        assert_consistent(&book);
    }

    #[test]
    fn test_concurrent_size_changes_on_shared_level() {
        let book = Arc::new(OrderBook::with_size_change_policy(
            "CONCURRENT",
            SizeChangePolicy::RequeueOnIncrease,
        ));
        for id in 0..100 {
            book.add_order(OrderId(id), 50.0, Side::Bid, 10).unwrap();
        }
        let barrier = Arc::new(Barrier::new(THREAD_COUNT as usize));

        let handles: Vec<_> = (0..THREAD_COUNT)
            .map(|thread_id| {
                let book = Arc::clone(&book);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for round in 0..200u64 {
                        let id = (thread_id * 13 + round) % 100;
                        let new_size = (thread_id + round) % 20 + 1;
                        book.change_size(OrderId(id), new_size).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(book.len(), 100);
        assert_eq!(book.depth(Side::Bid), 1);
        assert_eq!(book.order_count(Side::Bid, 1), 100);
        assert_consistent(&book);
    }

    #[test]
    fn test_racing_removes_of_same_order() {
        for round in 0..50u64 {
            let book = Arc::new(OrderBook::new("RACE"));
            book.add_order(OrderId(round), 10.0, Side::Offer, 1).unwrap();
            let barrier = Arc::new(Barrier::new(4));

            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let book = Arc::clone(&book);
                    let barrier = Arc::clone(&barrier);
                    thread::spawn(move || {
                        barrier.wait();
                        book.remove(OrderId(round))
                    })
                })
                .collect();

            let results: Vec<Result<Order, OrderBookError>> =
                handles.into_iter().map(|h| h.join().unwrap()).collect();
            let successes = results.iter().filter(|r| r.is_ok()).count();
            assert_eq!(successes, 1);
            assert!(
                results
                    .iter()
                    .filter(|r| r.is_err())
                    .all(|r| *r == Err(OrderBookError::OrderNotFound(OrderId(round))))
            );
            assert!(book.is_empty());
            assert_eq!(book.depth(Side::Offer), 0);
        }
    }

    #[test]
    fn test_racing_duplicate_adds() {
        for round in 0..50u64 {
            let book = Arc::new(OrderBook::new("RACE"));
            let barrier = Arc::new(Barrier::new(4));

            let handles: Vec<_> = (0..4u64)
                .map(|thread_id| {
                    let book = Arc::clone(&book);
                    let barrier = Arc::clone(&barrier);
                    thread::spawn(move || {
                        barrier.wait();
                        // same id at different prices so the adds take different guards
                        book.add_order(OrderId(round), 10.0 + thread_id as f64, Side::Bid, 1)
                    })
                })
                .collect();

            let successes = handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|r| r.is_ok())
                .count();
            assert_eq!(successes, 1);
            assert_eq!(book.len(), 1);
            assert_eq!(book.all_orders(Side::Bid).count(), 1);
        }
    }

    #[test]
    fn test_readers_during_writes() {
        let book = Arc::new(OrderBook::new("READERS"));
        let barrier = Arc::new(Barrier::new(3));

        let writer = {
            let book = Arc::clone(&book);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for id in 0..2_000u64 {
                    book.add_order(OrderId(id), price_for(id), Side::Offer, 1)
                        .unwrap();
                    if id % 2 == 1 {
                        book.remove(OrderId(id - 1)).unwrap();
                    }
                }
            })
        };

        let readers: Vec<_> = (0..2)
            .map(|_| {
                let book = Arc::clone(&book);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for _ in 0..500 {
                        let depth = book.depth(Side::Offer);
                        let _ = book.order_count(Side::Offer, 1);
                        if let Ok(price) = book.price_at(Side::Offer, 1) {
                            assert!((100.0..110.0).contains(&price));
                        }
                        let prices: Vec<f64> =
                            book.all_orders(Side::Offer).map(|o| o.price()).collect();
                        assert!(prices.windows(2).all(|w| w[0] <= w[1]));
                        assert!(depth <= 10);
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }

        assert_eq!(book.len(), 1_000);
        assert_consistent(&book);
    }
}
