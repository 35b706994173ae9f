/*
[INPUT]:  Instrument name (e.g., "BTC-PERPETUAL")
[OUTPUT]: Top of book and spread
[POS]:    Examples - public market data queries
[UPDATE]: When adding new market data endpoints
*/

use deribit_adapter::*;

/// Example: Query an order book (no authentication required)
#[tokio::main]
async fn main() {
    println!("=== Deribit Order Book Example ===\n");

    let client = match DeribitClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created for {}\n", client.base_url());

    let instrument = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "BTC-PERPETUAL".to_string());

    println!("Querying order book for {}...", instrument);
    match client
        .get_order_book(None, &OrderBookRequest::new(instrument.as_str()))
        .await
    {
        Ok(reply) => {
            let book = reply.value;
            println!("✓ Received in {:?}", reply.latency);
            if let Some(bid) = book.bids.first() {
                println!("  best bid: {} x {}", bid.price(), bid.amount());
            }
            if let Some(ask) = book.asks.first() {
                println!("  best ask: {} x {}", ask.price(), ask.amount());
            }
            if let Some(spread) = book.spread() {
                println!("  spread:   {}", spread);
            }
        }
        Err(e) => println!("✗ Error [{}]: {}", e.kind().as_str(), e),
    }
}
