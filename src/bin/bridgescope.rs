//! Command-line audit surface.
//!
//! Exit code 0 means the audit completed — "not found" and "unset" are
//! completed audits. Non-zero is reserved for hard failures: unreachable
//! node, undecodable metadata, failed patch.

use anyhow::Context;
use bridgescope::prelude::*;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "bridgescope", about = "Chain-state audit toolkit", version)]
struct Cli {
    /// Node WebSocket endpoint.
    #[arg(long, global = true, default_value = DEFAULT_RPC_URL)]
    url: String,

    /// Emit reports as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List pallets, optionally filtered by a case-insensitive substring.
    Pallets {
        #[arg(long)]
        search: Option<String>,
    },
    /// List the callables a pallet exposes.
    Callables { pallet: String },
    /// Derive the storage key of a plain storage value (offline).
    StorageKey { pallet: String, item: String },
    /// Fetch and render one storage slot.
    Slot { pallet: String, item: String },
    /// Audit the operator slot of every bridge pallet.
    Operators,
    /// Free/reserved balances of one account.
    Balance { address: String },
    /// Total token issuance.
    Issuance,
    /// Match a target address against labelled candidate secrets (offline).
    FindKey {
        #[arg(long)]
        target: String,
        /// Repeatable `label=secret` pair; candidates are tried in order.
        #[arg(long = "candidate", value_parser = parse_candidate, required = true)]
        candidates: Vec<Candidate>,
    },
    /// Patch a runtime-genesis field from one chain spec into another (offline).
    PatchSpec {
        target: PathBuf,
        source: PathBuf,
        /// Preferred (camel-case) field name.
        #[arg(long)]
        field: String,
        /// Differently-cased alias to remove from the target; defaults to the
        /// snake_case form of `--field`.
        #[arg(long)]
        legacy: Option<String>,
    },
}

fn parse_candidate(raw: &str) -> Result<Candidate, String> {
    match raw.split_once('=') {
        Some((label, secret)) if !label.is_empty() && !secret.is_empty() => {
            Ok(Candidate::new(label, secret))
        }
        _ => Err("expected label=secret".to_string()),
    }
}

fn snake_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for c in field.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

async fn connect(url: &str) -> anyhow::Result<Auditor<ChainRpc>> {
    let conn = ChainRpc::connect(url)
        .await
        .with_context(|| format!("node unreachable at {url}"))?;
    Auditor::new(conn).await.context("loading chain metadata")
}

fn print_report(report: &AuditReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::StorageKey { pallet, item } => {
            println!("{}", storage_value_key(&pallet, &item));
        }

        Command::FindKey { target, candidates } => {
            let outcome = match_target(&Address::new(target), candidates);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                match outcome {
                    MatchOutcome::Match { label, address } => {
                        println!("match: {label} ({address})")
                    }
                    MatchOutcome::NoMatch => println!("no match"),
                }
            }
        }

        Command::PatchSpec {
            target,
            source,
            field,
            legacy,
        } => {
            let legacy = legacy.unwrap_or_else(|| snake_case(&field));
            patch_spec_file(&target, &source, RUNTIME_GENESIS_PATH, &field, &legacy)
                .with_context(|| format!("patching {}", target.display()))?;
            println!("patched {} ({field})", target.display());
        }

        Command::Pallets { search } => {
            let auditor = connect(&cli.url).await?;
            let names: Vec<&str> = match &search {
                Some(needle) => auditor.metadata().search(needle),
                None => auditor.metadata().pallets().iter().map(|p| p.name.as_str()).collect(),
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&names)?);
            } else {
                for name in names {
                    println!("{name}");
                }
            }
        }

        Command::Callables { pallet } => {
            let auditor = connect(&cli.url).await?;
            match auditor.metadata().pallet(&pallet) {
                Some(info) if cli.json => {
                    println!("{}", serde_json::to_string_pretty(&info.callables)?)
                }
                Some(info) => {
                    for callable in &info.callables {
                        let args: Vec<String> = callable
                            .args
                            .iter()
                            .map(|a| format!("{}: {}", a.name, a.ty))
                            .collect();
                        println!("{}({})", callable.name, args.join(", "));
                    }
                }
                None => println!("{pallet}: not found"),
            }
        }

        Command::Slot { pallet, item } => {
            let auditor = connect(&cli.url).await?;
            let mut report = AuditReport::new(format!("{pallet}.{item}"));
            report.push(auditor.audit_slot(&pallet, &item).await);
            print_report(&report, cli.json)?;
        }

        Command::Operators => {
            let auditor = connect(&cli.url).await?;
            let report = auditor.audit_bridge_operators().await;
            print_report(&report, cli.json)?;
        }

        Command::Balance { address } => {
            let auditor = connect(&cli.url).await?;
            let mut report = AuditReport::new("balance audit");
            report.push(auditor.audit_balance(&Address::new(address)).await);
            print_report(&report, cli.json)?;
        }

        Command::Issuance => {
            let auditor = connect(&cli.url).await?;
            let mut report = AuditReport::new("issuance audit");
            report.push(auditor.audit_total_issuance().await);
            print_report(&report, cli.json)?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
