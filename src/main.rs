use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use brother_lib::{Brother, Config, PrinterType, SensorRecord};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Read status, toner and drum counters from a Brother printer over SNMP.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Printer IP address or hostname.
    #[arg(default_value = "brother")]
    host: String,
    /// Printer family: `laser` or `ink`.
    #[arg(default_value = "laser")]
    printer_type: String,
    /// SNMP port.
    #[arg(short, long, default_value_t = brother_lib::config::DEFAULT_PORT)]
    port: u16,
    /// SNMP community.
    #[arg(short, long, default_value = brother_lib::config::DEFAULT_COMMUNITY)]
    community: String,
    /// Seconds to wait for each answer.
    #[arg(short, long, default_value_t = 2)]
    timeout: u64,
    /// Print the record as JSON instead of text.
    #[arg(long)]
    json: bool,
    /// Optional path to a file to write logs to, in addition to the console.
    #[arg(short, long)]
    log_file: Option<PathBuf>,
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn setup_logging(log_file_path: Option<PathBuf>, verbosity: &Verbosity<InfoLevel>) -> Result<Option<WorkerGuard>> {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .without_time();

    let (file_layer, guard) = if let Some(ref path) = log_file_path {
        let log_file = File::create(path).with_context(|| format!("Failed to create log file at: {:?}", path))?;
        let (non_blocking_writer, guard) = tracing_appender::non_blocking(log_file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking_writer)
            .with_ansi(false)
            .with_target(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    // INFO by default, DEBUG with -v, TRACE with -vv; RUST_LOG wins when set
    let filter = EnvFilter::builder()
        .with_default_directive(verbosity.tracing_level_filter().into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    if let Some(path) = log_file_path {
        info!("Logging to file: {:?}", path);
    }

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = setup_logging(cli.log_file.clone(), &cli.verbose)?;

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::new(&cli.host)
        .with_port(cli.port)
        .with_printer_type(PrinterType::from_name(&cli.printer_type))
        .with_community(cli.community)
        .with_timeout(Duration::from_secs(cli.timeout));

    let mut brother = Brother::create(config)
        .await
        .with_context(|| format!("Unable to initialize printer {}", cli.host))?;
    let result = brother.update().await;
    brother.shutdown();
    let record = result.context("Unable to read printer data")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print_record(&brother, &record);
    }
    Ok(())
}

fn print_record(brother: &Brother, record: &SensorRecord) {
    let or_unknown = |value: Option<&str>| value.unwrap_or("unknown").to_string();

    println!("Model: {}", or_unknown(brother.model()));
    println!("MAC address: {}", or_unknown(brother.mac()));
    println!("Firmware: {}", or_unknown(brother.firmware()));
    println!("Serial no: {}", or_unknown(brother.serial()));
    println!("Status: {}", or_unknown(record.status.as_deref()));
    if let Some(uptime) = record.uptime {
        println!("Up since: {uptime}");
    }
    println!("Sensors data:");
    for (sensor, value) in record.readings() {
        println!("  {sensor}: {value}");
    }
}
