/*
[INPUT]:  DERIBIT_CLIENT_ID / DERIBIT_CLIENT_SECRET and order parameters
[OUTPUT]: Order placement result and a follow-up order book read
[POS]:    Examples - authenticated trading round trip
[UPDATE]: When trading API changes
*/

use std::sync::Arc;

use deribit_adapter::dispatch::run_trading_loop;
use deribit_adapter::*;
use rust_decimal::Decimal;

/// Example: authenticate, place a testnet limit order, read the book.
///
/// Credentials come from the environment; nothing is sent without them.
#[tokio::main]
async fn main() {
    println!("=== Deribit Trading Example ===\n");

    let (Ok(client_id), Ok(client_secret)) = (
        std::env::var("DERIBIT_CLIENT_ID"),
        std::env::var("DERIBIT_CLIENT_SECRET"),
    ) else {
        eprintln!("Set DERIBIT_CLIENT_ID and DERIBIT_CLIENT_SECRET to run this example");
        return;
    };

    let credentials = match Credentials::new(client_id, client_secret) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid credentials: {}", e);
            return;
        }
    };

    let client = match DeribitClient::new() {
        Ok(c) => Arc::new(c),
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created for {}", client.base_url());

    let session = match AuthManager::new(client.clone()).authenticate(&credentials).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("✗ Authentication failed: {}", e);
            return;
        }
    };
    println!("✓ Authenticated: {:?}", session);

    let report = run_trading_loop(
        client.as_ref(),
        &session,
        PlaceOrderRequest::limit("BTC-PERPETUAL", Decimal::from(92_500), Decimal::from(10)),
        OrderBookRequest::new("BTC-PERPETUAL"),
    )
    .await;

    match report.order {
        Ok(reply) => println!("✓ Order placed in {:?}: {:?}", reply.latency, reply.value),
        Err(e) => println!("✗ Order failed [{}]: {}", e.kind().as_str(), e),
    }
    match report.book {
        Ok(reply) => println!("✓ Order book read in {:?}", reply.latency),
        Err(e) => println!("✗ Order book failed [{}]: {}", e.kind().as_str(), e),
    }
    println!("\nEnd-to-end: {:?}", report.end_to_end);
}
