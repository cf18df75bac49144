use binance_futures_order::config::{ClientSettings, Credentials};
use binance_futures_order::diagnostics::Diagnostics;
use binance_futures_order::error::OrderError;
use binance_futures_order::order::report::{format_order_request, format_order_response};
use binance_futures_order::order::{place_order, validate_order, RawOrder};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Parsed command-line options
#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    symbol: String,
    side: String,
    order_type: String,
    quantity: String,
    price: Option<String>,
    json: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Place(CliArgs),
    Help,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let cli = match parse_args(&args) {
        Ok(Command::Place(cli)) => cli,
        Ok(Command::Help) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("error: {}", message);
            eprintln!();
            print_usage();
            return ExitCode::from(2);
        }
    };

    // Loaded before the filter is built so RUST_LOG may come from .env
    let dotenv_result = dotenv::dotenv();

    // Diagnostics go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter())
        .init();

    if let Err(err) = dotenv_result {
        tracing::debug!("No .env file loaded: {}", err);
    }

    tracing::info!(
        "CLI arguments received: symbol={}, side={}, type={}, quantity={}, price={:?}",
        cli.symbol,
        cli.side,
        cli.order_type,
        cli.quantity,
        cli.price
    );

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::from(1)
        }
    }
}

async fn run(cli: &CliArgs) -> Result<(), OrderError> {
    let raw = RawOrder {
        symbol: &cli.symbol,
        side: &cli.side,
        order_type: &cli.order_type,
        quantity: &cli.quantity,
        price: cli.price.as_deref(),
    };
    let request = validate_order(&raw)?;

    if !cli.json {
        println!("{}", format_order_request(&request));
    }

    let credentials = Credentials::from_env()?;
    let settings = ClientSettings::from_env()?;
    let result = place_order(credentials, &settings, Diagnostics::tracing(), &raw).await?;

    if cli.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(err) => tracing::error!("Failed to serialize order result: {}", err),
        }
    } else {
        println!("{}", format_order_response(&result));
        println!("Order placed successfully!");
    }

    tracing::info!(
        "ORDER SUCCESS: orderId={}, status={}",
        result.order_id,
        result.status
    );
    Ok(())
}

/// `RUST_LOG` from the process environment, `info` otherwise
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn report_error(err: &OrderError) {
    tracing::error!(error_type = err.error_type(), "{}", err);

    match err {
        OrderError::Validation(e) => eprintln!("Validation Error: {}", e),
        OrderError::Configuration(e) => eprintln!("Configuration Error: {}", e),
        OrderError::Transport(e) => eprintln!("Network Error: {}", e),
        OrderError::MalformedResponse(e) => eprintln!("Unexpected Response: {}", e),
        OrderError::Api(e) => match e.reason() {
            Some(reason) => eprintln!("{} ({})", e, reason),
            None => eprintln!("{}", e),
        },
    }
}

/// Parse command-line arguments
fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut symbol = None;
    let mut side = None;
    let mut order_type = None;
    let mut quantity = None;
    let mut price = None;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--help" | "-h" => return Ok(Command::Help),
            "--json" => json = true,
            "--symbol" | "-s" | "--side" | "--type" | "--quantity" | "-q" | "--price" | "-p" => {
                let value = args
                    .get(i + 1)
                    .ok_or_else(|| format!("option {} requires a value", flag))?
                    .clone();
                match flag {
                    "--symbol" | "-s" => symbol = Some(value),
                    "--side" => side = Some(value),
                    "--type" => order_type = Some(value),
                    "--quantity" | "-q" => quantity = Some(value),
                    _ => price = Some(value),
                }
                i += 1;
            }
            _ => return Err(format!("unknown argument: {}", flag)),
        }
        i += 1;
    }

    Ok(Command::Place(CliArgs {
        symbol: symbol.ok_or("missing required option --symbol")?,
        side: side.ok_or("missing required option --side")?,
        order_type: order_type.ok_or("missing required option --type")?,
        quantity: quantity.ok_or("missing required option --quantity")?,
        price,
        json,
    }))
}

/// Print usage information
fn print_usage() {
    println!("futures-order - place a single USDT-M futures order on Binance");
    println!();
    println!("USAGE:");
    println!("    futures-order --symbol <SYMBOL> --side <SIDE> --type <TYPE> --quantity <QTY> [--price <PRICE>]");
    println!();
    println!("OPTIONS:");
    println!("    -s, --symbol <SYMBOL>     Trading pair, e.g. BTCUSDT (USDT-M pairs only)");
    println!("        --side <SIDE>         BUY or SELL");
    println!("        --type <TYPE>         MARKET or LIMIT");
    println!("    -q, --quantity <QTY>      Order quantity in base asset units");
    println!("    -p, --price <PRICE>       Limit price (required for LIMIT, ignored for MARKET)");
    println!("        --json                Print the order result as JSON");
    println!("    -h, --help                Print this help message");
    println!();
    println!("ENVIRONMENT VARIABLES (also read from .env):");
    println!("    BINANCE_TESTNET_API_KEY        API key (required)");
    println!("    BINANCE_TESTNET_API_SECRET     API secret (required)");
    println!("    BINANCE_FUTURES_BASE_URL       API base URL (default: https://testnet.binancefuture.com)");
    println!("    BINANCE_REQUEST_TIMEOUT_SECS   Per-call timeout (default: 10)");
    println!("    BINANCE_MAX_ATTEMPTS           Attempts on connection errors/timeouts (default: 3)");
    println!("    BINANCE_RETRY_BACKOFF_MS       Linear backoff base (default: 1000)");
    println!("    BINANCE_RECV_WINDOW_MS         recvWindow for signed requests (default: unset)");
    println!("    RUST_LOG                       Logging level (default: info)");
    println!();
    println!("NOTE:");
    println!("    Orders are not deduplicated: running the same command twice places two orders.");
    println!();
    println!("EXAMPLES:");
    println!("    futures-order --symbol BTCUSDT --side BUY --type MARKET --quantity 0.01");
    println!("    futures-order -s ETHUSDT --side SELL --type LIMIT -q 0.5 -p 3500");
}
