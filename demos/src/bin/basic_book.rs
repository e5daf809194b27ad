use level_book::{OrderBook, OrderBookError, OrderId, Side, SizeChangePolicy, setup_logger};
use tracing::{info, warn};

fn main() -> Result<(), OrderBookError> {
    setup_logger();
    info!("Basic OrderBook walkthrough");

    let book = OrderBook::new("DEMO");

    for (id, price, side, size) in [
        (1, 3.2, 'B', 1),
        (2, 4.2, 'B', 3),
        (3, 1.2, 'B', 5),
        (4, 3.2, 'B', 1),
        (5, 3.4, 'O', 2),
        (6, 4.0, 'O', 10),
        (7, 3.4, 'O', 4),
    ] {
        book.add_raw(id, price, side, size)?;
    }
    print_book(&book);

    info!("Removing order 2 (the only order at the best bid)");
    book.remove(OrderId(2))?;
    print_book(&book);

    info!("Resizing order 5; it goes to the back of its level");
    book.change_size(OrderId(5), 1)?;
    print_book(&book);

    match book.add_raw(8, 2.0, 'X', 1) {
        Ok(_) => warn!("Unexpectedly accepted an invalid side"),
        Err(err) => info!("Rejected: {}", err),
    }
    match book.remove(OrderId(99)) {
        Ok(_) => warn!("Unexpectedly removed an unknown order"),
        Err(err) => info!("Rejected: {}", err),
    }

    let retaining =
        OrderBook::with_size_change_policy("DEMO-RETAIN", SizeChangePolicy::RetainPriority);
    retaining.add_order(OrderId(1), 10.0, Side::Offer, 5)?;
    retaining.add_order(OrderId(2), 10.0, Side::Offer, 5)?;
    retaining.change_size(OrderId(1), 50)?;
    info!(
        "With {} the resized order stays first: {:?}",
        retaining.size_change_policy(),
        retaining
            .all_orders(Side::Offer)
            .map(|order| order.id().as_u64())
            .collect::<Vec<_>>()
    );

    let snapshot = book.create_snapshot(3);
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => info!("Snapshot:\n{}", json),
        Err(err) => warn!("Could not serialise snapshot: {}", err),
    }

    Ok(())
}

fn print_book(book: &OrderBook) {
    for side in [Side::Offer, Side::Bid] {
        info!("{} side, {} levels", side, book.depth(side));
        for level in 1..=book.depth(side) {
            if let Ok(price) = book.price_at(side, level) {
                info!(
                    "  level {}: price {:>6.2} orders {} size {}",
                    level,
                    price,
                    book.order_count(side, level),
                    book.total_size_at(side, level)
                );
            }
        }
    }
    if let Some(spread) = book.spread() {
        info!("Spread: {:.2}", spread);
    }
}
