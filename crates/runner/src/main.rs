//! Command-line access to the read-only OKEx endpoints.
//!
//! ```text
//! runner time
//! runner ticker BTC-USDT
//! runner book BTC-USDT [--inverse]
//! runner candles BTC-USDT [granularity_secs]
//! runner balances
//! runner orders BTC-USDT
//! ```
//!
//! Credentials and server are read from `OKEX_*` environment variables
//! (or a `.env` file).

use okex_rest::{OkexRestClient, OkexRestError};
use serde_json::Value;
use tracing::{error, info};

const USAGE: &str =
    "usage: runner <time | ticker PAIR | book PAIR [--inverse] | candles PAIR [SECS] | balances | orders PAIR>";

#[tokio::main]
async fn main() {
    common::init_logging();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let Some(command) = args.first() else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };

    let client = match OkexRestClient::from_env() {
        Ok(client) => client.with_span(tracing::info_span!("runner", command = %command)),
        Err(e) => {
            error!(error = %e, "Failed to create client");
            std::process::exit(1);
        }
    };

    info!(client = ?client, "Client ready");

    match run(&client, command, &args[1..]).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            error!(
                error = %e,
                transport = e.is_transport(),
                protocol = e.is_protocol(),
                "Command failed"
            );
            std::process::exit(1);
        }
    }
}

async fn run(client: &OkexRestClient, command: &str, args: &[String]) -> Result<String, OkexRestError> {
    let pair = || {
        args.first()
            .map(String::as_str)
            .ok_or_else(|| OkexRestError::Validation(format!("'{}' needs a pair", command)))
    };

    let value = match command {
        "time" => {
            let time = client.server_time().await?;
            serde_json::json!({ "iso": time.iso, "epoch": time.epoch.to_string() })
        }
        "ticker" => client.ticker(pair()?).await?,
        "book" => {
            let book = client.order_book(pair()?).await?;
            let book = if args.iter().any(|a| a == "--inverse") {
                book.inverse()?
            } else {
                book
            };
            to_value(&book)?
        }
        "candles" => {
            let granularity = match args.get(1) {
                Some(raw) => raw.parse::<u32>().map_err(|_| {
                    OkexRestError::Validation(format!("invalid granularity '{}'", raw))
                })?,
                None => 60,
            };
            to_value(&client.candles(pair()?, granularity).await?)?
        }
        "balances" => to_value(&client.get_balances().await?)?,
        "orders" => to_value(&client.get_orders(pair()?).await?)?,
        other => {
            return Err(OkexRestError::Validation(format!(
                "unknown command '{}'; {}",
                other, USAGE
            )))
        }
    };

    serde_json::to_string_pretty(&value)
        .map_err(|e| OkexRestError::Validation(format!("output: {}", e)))
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, OkexRestError> {
    serde_json::to_value(value).map_err(|e| OkexRestError::Validation(format!("output: {}", e)))
}
