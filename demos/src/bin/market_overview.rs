//! Demo 1: Market Overview
//!
//! Showcases: public market data endpoints (no credentials needed)
//!
//! Run: cargo run --bin market_overview

use bitpin_rest::{BitpinClient, RequestOptions};
use bitpin_types::Symbol;
use colored::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  MARKET OVERVIEW".cyan().bold());
    println!("{}", "  Bitpin SDK Demo - Public Endpoints".cyan());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = BitpinClient::new();

    let tickers = client.get_tickers(RequestOptions::new()).await?;
    println!("{} {} markets ticking\n", "✓".green(), tickers.len());

    println!("  {:<14} {:>16} {:>12}", "SYMBOL".yellow(), "PRICE".yellow(), "24H Δ".yellow());
    for ticker in tickers.iter().take(10) {
        let change = if ticker.daily_change_price.is_sign_negative() {
            format!("{}", ticker.daily_change_price).red()
        } else {
            format!("+{}", ticker.daily_change_price).green()
        };
        println!("  {:<14} {:>16} {:>12}", ticker.symbol, ticker.price, change);
    }

    let symbol = Symbol::new("BTC_USDT");
    let book = client.get_order_book(&symbol, RequestOptions::new()).await?;
    println!();
    println!("{} {} order book", "✓".green(), symbol);
    if let (Some(bid), Some(ask), Some(spread)) = (book.best_bid(), book.best_ask(), book.spread())
    {
        println!(
            "  {} {}  {} {}  {} {}",
            "BID:".yellow(),
            bid,
            "ASK:".yellow(),
            ask,
            "SPREAD:".green(),
            spread
        );
    }

    let trades = client
        .get_recent_trades(&symbol, RequestOptions::new())
        .await?;
    println!("{} {} recent trades", "✓".green(), trades.len());

    Ok(())
}
