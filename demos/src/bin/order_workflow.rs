//! Demo 2: Order Workflow
//!
//! Showcases: authentication, wallets, and the order lifecycle
//! (create, inspect, cancel).
//!
//! Run: BITPIN_API_KEY=... BITPIN_SECRET_KEY=... cargo run --bin order_workflow

use bitpin_rest::{
    BitpinClient, ClientConfig, GetOrdersParams, OrderParams, OrderSide, OrderState,
    RequestOptions,
};
use colored::*;
use rust_decimal_macros::dec;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  ORDER WORKFLOW".cyan().bold());
    println!("{}", "  Bitpin SDK Demo - Private Endpoints".cyan());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let api_key = std::env::var("BITPIN_API_KEY")?;
    let secret_key = std::env::var("BITPIN_SECRET_KEY")?;

    let config = ClientConfig::new().with_credentials(api_key, secret_key);
    let client = BitpinClient::connect(config).await?;
    println!("{} Authenticated", "✓".green());

    let wallets = client
        .get_wallets(Default::default(), RequestOptions::new())
        .await?;
    println!("{} {} wallets\n", "✓".green(), wallets.results.len());
    for wallet in &wallets.results {
        println!(
            "  {:<8} balance {:>18}  available {:>18}",
            wallet.asset,
            wallet.balance,
            wallet.available()
        );
    }

    // A deliberately unmarketable bid, so it rests until we cancel it
    let order = OrderParams::limit("BTC_USDT", OrderSide::Buy, dec!(0.001), dec!(1000));
    let status = client.create_order(&order, RequestOptions::new()).await?;
    println!(
        "\n{} Placed order {} ({} {})",
        "✓".green(),
        status.id,
        status.side,
        status.symbol
    );

    let open = client
        .get_orders(
            GetOrdersParams {
                state: Some(OrderState::Active),
                ..Default::default()
            },
            RequestOptions::new(),
        )
        .await?;
    println!("{} {} open orders", "✓".green(), open.results.len());

    client
        .cancel_order(&status.id.to_string(), RequestOptions::new())
        .await?;
    println!("{} Cancel requested for order {}", "✓".green(), status.id);

    Ok(())
}
