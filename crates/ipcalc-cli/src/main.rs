use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use ipcalc_cidr::{Cidr, SubnetReport};

mod batch;

use batch::{BatchProcessor, BatchResult};

const PROMPT: &str = "Input raw address in the ###.###.###.###/## format: ";

const CSV_HEADER: [&str; 14] = [
    "input",
    "address",
    "prefix_len",
    "network",
    "broadcast",
    "mask",
    "binary_mask",
    "wildcard",
    "first_usable",
    "last_usable",
    "host_count",
    "class",
    "private",
    "error",
];

/// IPv4 subnet calculator for CIDR notation
#[derive(Parser)]
#[command(name = "ipcalc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format
    #[arg(
        short,
        long,
        value_enum,
        default_value = "human",
        global = true,
        env = "IPCALC_OUTPUT"
    )]
    output: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Defaults to `calc` with a prompt when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate subnet details for one CIDR (prompts when omitted)
    Calc(CalcArgs),
    /// Batch process CIDRs from file or stdin, one per line
    Batch(BatchArgs),
}

#[derive(Parser)]
struct CalcArgs {
    /// Address with prefix, e.g. 192.168.1.15/24
    #[arg(value_name = "CIDR")]
    cidr: Option<String>,
}

#[derive(Parser)]
struct BatchArgs {
    /// Input file (use '-' for stdin)
    #[arg(short, long, value_name = "FILE")]
    file: Option<String>,

    /// Number of worker threads (default: CPU cores)
    #[arg(short, long, env = "IPCALC_WORKERS")]
    workers: Option<usize>,
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable table output
    Human,
    /// JSON output (pretty-printed)
    Json,
    /// JSON output (compact)
    JsonCompact,
    /// CSV output
    Csv,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Calc(args)) => handle_calc(args, cli.output)?,
        Some(Commands::Batch(args)) => handle_batch(args, cli.output)?,
        None => handle_calc(CalcArgs { cidr: None }, cli.output)?,
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over the `--verbose` default
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn handle_calc(args: CalcArgs, format: OutputFormat) -> Result<()> {
    let input = match args.cidr {
        Some(cidr) => cidr,
        None => prompt_for_input(io::stdin().lock(), io::stderr())?,
    };
    debug!(input = input.trim(), "calculating subnet");

    let cidr = Cidr::parse(&input)
        .with_context(|| format!("Cannot calculate subnet for {:?}", input.trim()))?;
    let report = SubnetReport::from_cidr(&cidr);

    print_report(input.trim(), &report, format)?;
    Ok(())
}

fn handle_batch(args: BatchArgs, format: OutputFormat) -> Result<()> {
    let reader = batch::open_input(args.file.as_deref())?;
    let inputs = batch::read_inputs(reader)?;

    let processor = BatchProcessor::new(args.workers)?;
    info!(
        inputs = inputs.len(),
        workers = processor.thread_count(),
        "batch processing"
    );

    let results = processor.process(inputs);
    print_batch(&results, format)?;

    let failed = results.iter().filter(|r| !r.is_ok()).count();
    if failed > 0 {
        bail!("{} of {} inputs failed", failed, results.len());
    }
    Ok(())
}

/// Write the prompt and read exactly one line
fn prompt_for_input<R: BufRead, W: Write>(mut reader: R, mut prompt: W) -> Result<String> {
    write!(prompt, "{}", PROMPT)?;
    prompt.flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        bail!("No input provided");
    }
    Ok(line)
}

fn print_report(input: &str, report: &SubnetReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => print_human(report),
        OutputFormat::Json => print_json(report, true)?,
        OutputFormat::JsonCompact => print_json(report, false)?,
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(io::stdout());
            wtr.write_record(CSV_HEADER)?;
            wtr.write_record(csv_record(input, Ok(report)))?;
            wtr.flush()?;
        }
    }
    Ok(())
}

fn print_batch(results: &[BatchResult], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            for result in results {
                match (&result.report, &result.error) {
                    (Some(report), _) => print_human(report),
                    (None, error) => {
                        println!();
                        println!(
                            "{} {}: {}",
                            "✗".red(),
                            result.input.bold(),
                            error.as_deref().unwrap_or("unknown error").red()
                        );
                    }
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(results)?),
        OutputFormat::JsonCompact => println!("{}", serde_json::to_string(results)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(io::stdout());
            wtr.write_record(CSV_HEADER)?;
            for result in results {
                let outcome = match &result.report {
                    Some(report) => Ok(report),
                    None => Err(result.error.as_deref().unwrap_or("")),
                };
                wtr.write_record(csv_record(&result.input, outcome))?;
            }
            wtr.flush()?;
        }
    }
    Ok(())
}

/// Labelled fields in print order
fn human_fields(report: &SubnetReport) -> Vec<(&'static str, String)> {
    let none = || "none".to_string();

    vec![
        ("IP address", report.address.clone()),
        ("Network Address", report.network.clone()),
        ("Broadcast Address", report.broadcast.clone()),
        ("Binary Subnet Mask", report.binary_mask.clone()),
        (
            "First usable host IP",
            report.first_usable.clone().unwrap_or_else(none),
        ),
        (
            "Last usable host IP",
            report.last_usable.clone().unwrap_or_else(none),
        ),
        ("Number of usable Hosts", report.host_count.to_string()),
        ("IP class", report.class.clone()),
        ("IP type private", report.private.to_string()),
        ("Subnet Mask", report.mask.clone()),
        ("Wildcard Mask", report.wildcard.clone()),
    ]
}

fn print_human(report: &SubnetReport) {
    println!();
    println!(
        "{} {}",
        "Subnet Calculation".bold().cyan(),
        format!("{}/{}", report.address, report.prefix_len).dimmed()
    );
    println!("{}", "─".repeat(60).dimmed());

    for (label, value) in human_fields(report) {
        let value = match label {
            "IP type private" if report.private => value.yellow(),
            "Network Address" | "Broadcast Address" => value.green(),
            _ => value.normal(),
        };
        println!("{:>22}: {}", label.bold(), value);
    }
    println!();
}

fn print_json(report: &SubnetReport, pretty: bool) -> Result<()> {
    if pretty {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", serde_json::to_string(report)?);
    }
    Ok(())
}

fn csv_record(input: &str, outcome: std::result::Result<&SubnetReport, &str>) -> Vec<String> {
    let mut record = vec![input.to_string()];
    match outcome {
        Ok(report) => {
            record.extend([
                report.address.clone(),
                report.prefix_len.to_string(),
                report.network.clone(),
                report.broadcast.clone(),
                report.mask.clone(),
                report.binary_mask.clone(),
                report.wildcard.clone(),
                report.first_usable.clone().unwrap_or_default(),
                report.last_usable.clone().unwrap_or_default(),
                report.host_count.to_string(),
                report.class.clone(),
                report.private.to_string(),
                String::new(),
            ]);
        }
        Err(error) => {
            record.extend(std::iter::repeat(String::new()).take(CSV_HEADER.len() - 2));
            record.push(error.to_string());
        }
    }
    record
}
