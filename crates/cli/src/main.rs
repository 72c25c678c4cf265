//! Browse API samples.
//!
//! Run with: `cargo run -p browsekit-cli -- --appid <id> --certid <secret>`
//!
//! This is a demo for developers, so `println!` is used for user-facing
//! output; diagnostics go through `tracing`.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use browsekit_domain::constants::DEFAULT_CONFIG_FILE;
use browsekit_domain::{BrowseConfig, BrowseError, Verb};
use browsekit_infra::{config, Connection, Params};
use clap::Parser;
use serde_json::{json, Value};
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "browsekit")]
#[command(about = "eBay Browse API samples", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Name of the YAML defaults file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    yaml: PathBuf,

    /// eBay application id to use
    #[arg(short, long)]
    appid: Option<String>,

    /// eBay cert id to use
    #[arg(short, long)]
    certid: Option<String>,

    /// eBay domain to use (e.g. api.ebay.com)
    #[arg(long)]
    domain: Option<String>,
}

impl Cli {
    fn resolve_config(&self) -> anyhow::Result<BrowseConfig> {
        let mut explicit = BrowseConfig::builder();
        if let Some(domain) = &self.domain {
            explicit = explicit.domain(domain);
        }
        if let Some(appid) = &self.appid {
            explicit = explicit.appid(appid);
        }
        if let Some(certid) = &self.certid {
            explicit = explicit.certid(certid);
        }

        config::load(explicit.overrides(), Some(self.yaml.as_path()))
            .context("failed to load configuration")
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn params(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        _ => Params::new(),
    }
}

fn str_field<'a>(value: &'a Value, pointer: &str, fallback: &'a str) -> &'a str {
    value.pointer(pointer).and_then(Value::as_str).unwrap_or(fallback)
}

fn search_request() -> Params {
    params(json!({
        "q": "Rust programming books",
        "limit": 5,
        "filter": "conditionIds:{3000|4000}",
        "sort": "price",
        "order": "asc",
    }))
}

/// Title, price, condition and description lines for a `getItem` body.
fn item_details(item: &Value) -> Vec<String> {
    let description: String =
        str_field(item, "/description", "N/A").chars().take(100).collect();
    vec![
        format!("Item Title: {}", str_field(item, "/title", "N/A")),
        format!(
            "Item Price: {} {}",
            str_field(item, "/price/value", "N/A"),
            str_field(item, "/price/currency", "")
        ),
        format!("Item Condition: {}", str_field(item, "/condition", "N/A")),
        format!("Item Description: {description}..."),
    ]
}

fn run_search_sample(conn: &mut Connection) -> Result<(), BrowseError> {
    let request = search_request();

    println!("Searching for: {}", request.get("q").and_then(Value::as_str).unwrap_or_default());
    let response = conn.execute(Verb::Search, &request)?;
    println!("Response Status: {}", response.status_code());

    if response.status_code() != 200 {
        let message = conn.error().unwrap_or_default();
        warn!(error = %message, "Search sample failed");
        println!("Error: {message}");
        return Ok(());
    }

    let data: Value = response.json()?;
    let items = data.get("itemSummaries").and_then(Value::as_array).cloned().unwrap_or_default();
    println!("Found {} items", items.len());

    for (i, item) in items.iter().enumerate() {
        let title: String = str_field(item, "/title", "No title").chars().take(50).collect();
        println!(
            "{}. {}... - {} {} ({})",
            i + 1,
            title,
            str_field(item, "/price/currency", ""),
            str_field(item, "/price/value", "N/A"),
            str_field(item, "/condition", "Unknown"),
        );
    }

    Ok(())
}

fn run_get_item_sample(conn: &mut Connection) -> Result<(), BrowseError> {
    println!("Getting an item ID from search...");
    let response = conn.execute(Verb::Search, &params(json!({"q": "iPhone", "limit": 1})))?;

    if response.status_code() != 200 {
        println!("Error in search: {}", conn.error().unwrap_or_default());
        return Ok(());
    }

    let data: Value = response.json()?;
    let Some(item_id) = data.pointer("/itemSummaries/0/itemId").and_then(Value::as_str) else {
        println!("No items found in search");
        return Ok(());
    };
    println!("Using item ID: {item_id}");

    println!("Getting detailed item information...");
    let response = conn.execute(
        Verb::GetItem,
        &params(json!({"item_id": item_id, "fieldgroups": "PRODUCT"})),
    )?;

    if response.status_code() != 200 {
        println!("Error getting item details: {}", conn.error().unwrap_or_default());
        return Ok(());
    }

    let item: Value = response.json()?;
    for line in item_details(&item) {
        println!("{line}");
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    println!("eBay Browse API Samples for version {}", env!("CARGO_PKG_VERSION"));
    println!("=====================");
    println!("Note: These samples require OAuth credentials (appid and certid).");
    println!();

    let mut conn = match cli.resolve_config().and_then(|c| Ok(Connection::new(c)?)) {
        Ok(conn) => conn,
        Err(err) => {
            error!(error = %format!("{err:#}"), "Failed to set up connection");
            eprintln!("Error: {err:#}");
            return ExitCode::FAILURE;
        }
    };
    debug!(domain = %conn.config().domain, siteid = %conn.config().siteid, "Running samples");

    if let Err(err) = run_search_sample(&mut conn) {
        warn!(error = %err, "Search sample aborted");
        println!("Connection Error: {err}");
    }
    println!();
    if let Err(err) = run_get_item_sample(&mut conn) {
        warn!(error = %err, "Get item sample aborted");
        println!("Connection Error: {err}");
    }

    println!("\nSample completed!");
    ExitCode::SUCCESS
}
