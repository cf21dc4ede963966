use anyhow::{Context, Result};
use clap::Parser;
use eth_price::cli::PriceArgs;
use eth_price::utils::logging::init_logging;
use eth_price::{
    format_eth, format_fee, format_fiat_with_symbol, EthPrice, NetworkPriceFeed, PriceReport,
    SendQuote,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    init_logging();

    let args = PriceArgs::parse();
    let feed = NetworkPriceFeed::new(args.feed_config()?)?;
    let service = EthPrice::new(args.fiats.clone(), feed);

    info!("loading ETH prices for {:?}", args.fiats);
    service.load().await.context("Failed to load ETH prices")?;

    if args.json {
        let mut report = PriceReport::new(&service);
        if let Some(fiat) = args.quote_fiat() {
            let quote = SendQuote::new(&service, args.amount, args.unit, fiat);
            report = report.with_quote(quote, args.wallet);
        }
        let json = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
        println!("{json}");
        return Ok(());
    }

    for fiat in service.fiats() {
        match service.fiat_price(*fiat) {
            Some(price) => println!(
                "1 ETH = {:<16} ({}s)",
                format_fiat_with_symbol(price, *fiat),
                fiat.display_unit()
            ),
            None => println!("1 ETH = n/a ({} not quoted)", fiat.code()),
        }
    }
    println!("Est. network fees: {}", format_fee(service.estimated_network_fees()));

    let Some(fiat) = args.quote_fiat() else {
        return Ok(());
    };
    let quote = SendQuote::new(&service, args.amount, args.unit, fiat);
    println!(
        "{} ETH = {}",
        format_eth(quote.eth_amount),
        format_fiat_with_symbol(quote.fiat_amount, fiat)
    );
    if let Some(wallet) = args.wallet {
        println!("{}", quote.send_label(wallet));
    }

    Ok(())
}
