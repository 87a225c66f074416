use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;
use sss_recon::{loader, ReconError, RecoveryConfig, Secret, SelectionOrder};

/// Reconstructs a Shamir-shared secret from a JSON share document and prints it.
#[derive(Parser, Debug)]
#[command(name = "recon", version)]
struct Args {
    /// The share document (`keys.n`, `keys.k`, optional `keys.p`, plus one entry per share)
    file: PathBuf,

    /// Which k shares to use when more are supplied
    #[arg(long, value_enum, default_value_t = Order::Ascending)]
    order: Order,

    /// Fail instead of printing a fractional secret
    #[arg(long)]
    deny_inexact: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Order {
    /// Smallest x first
    Ascending,
    /// As listed in the document
    Declaration,
}

impl From<Order> for SelectionOrder {
    fn from(o: Order) -> Self {
        match o {
            Order::Ascending => SelectionOrder::AscendingX,
            Order::Declaration => SelectionOrder::Declaration,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    match run(&args) {
        Ok(secret) => println!("{secret}"),
        Err(e) => {
            eprintln!("{}", render_error(&e));
            process::exit(1);
        }
    }
}

/// Renders `e` as `error: <Kind>: <context>: <message>`.
///
/// The chain stops at the first `ReconError`: its message already includes whatever it wraps, so
/// printing its sources as well would repeat them.
fn render_error(e: &anyhow::Error) -> String {
    let mut parts = Vec::new();
    let mut kind = None;

    for c in e.chain() {
        parts.push(c.to_string());

        if let Some(r) = c.downcast_ref::<ReconError>() {
            kind = Some(r.kind());
            break;
        }
    }

    match kind {
        Some(kind) => format!("error: {kind}: {}", parts.join(": ")),
        None => format!("error: {}", parts.join(": ")),
    }
}

fn run(args: &Args) -> anyhow::Result<Secret> {
    let set = loader::load(&args.file).with_context(|| format!("failed to load {}", args.file.display()))?;

    info!(
        "k = {}, n = {}, {} shares, mode = {:?}",
        set.get_threshold(),
        set.get_total_declared(),
        set.get_shares().len(),
        set.mode()
    );

    let config = RecoveryConfig::new(args.order.into(), args.deny_inexact);

    Ok(set.reconstruct(&config)?)
}
