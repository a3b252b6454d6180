//! Subcommand implementations.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use secret_santa::{
    current_period, Assignment, ConfigDir, ConsoleNotifier, DeliveryMode, Exchange, HistoryStore,
    OutboxNotifier,
};
use tracing::info;

use crate::cli::{Cli, Command, DeliveryArgs};

pub fn run(cli: Cli) -> Result<()> {
    let dir = ConfigDir::open(&cli.config_dir)?;
    let exchange = Exchange::open(&dir)
        .with_context(|| format!("failed to load {}", cli.config_dir.display()))?;

    match cli.command {
        Command::Assign {
            delivery,
            seed,
            period,
        } => assign(exchange, &delivery, seed, period),
        Command::Resend { delivery, period } => resend(&exchange, &delivery, period),
        Command::Check => check(&exchange),
    }
}

fn assign(
    exchange: Exchange,
    delivery: &DeliveryArgs,
    seed: Option<u64>,
    period: Option<String>,
) -> Result<()> {
    let exchange = match seed {
        Some(seed) => {
            let engine = exchange.engine_config().clone().with_random_seed(seed);
            exchange.with_engine_config(engine)
        }
        None => exchange,
    };
    let period = period.unwrap_or_else(current_period);

    let mut store = exchange.history_store();
    let report = exchange.assign(&period, &mut store)?;
    info!(event = "period_assigned", period = %period, pairings = report.assignment.len());

    if !report.proven_optimal {
        println!(
            "{} time limit reached before optimality was proven; repeats may not be minimal",
            "note:".yellow().bold()
        );
    }

    deliver(&exchange, &report.assignment, delivery)
}

fn resend(
    exchange: &Exchange,
    delivery: &DeliveryArgs,
    period: Option<String>,
) -> Result<()> {
    let period = period.unwrap_or_else(current_period);
    let assignment = exchange.history_store().load(&period)?;
    deliver(exchange, &assignment, delivery)
}

fn deliver(
    exchange: &Exchange,
    assignment: &Assignment,
    delivery: &DeliveryArgs,
) -> Result<()> {
    match (delivery.mode(), &delivery.outbox) {
        (DeliveryMode::Real, Some(dir)) => {
            let mut outbox = OutboxNotifier::new(dir)?;
            let sent = exchange.notify(assignment, DeliveryMode::Real, &mut outbox)?;
            println!(
                "{} {} messages written to {}",
                "done:".bright_green().bold(),
                sent,
                dir.display()
            );
        }
        (DeliveryMode::Real, None) => {
            let mut smtp = exchange
                .smtp_notifier()
                .context("real delivery needs SMTP settings, or pass --outbox <DIR>")?;
            let sent = exchange.notify(assignment, DeliveryMode::Real, &mut smtp)?;
            println!(
                "{} {} messages sent via {}",
                "done:".bright_green().bold(),
                sent,
                exchange.groups().smtp.host
            );
        }
        (DeliveryMode::Test, _) => {
            let mut console = ConsoleNotifier::new();
            exchange.notify(assignment, DeliveryMode::Test, &mut console)?;
        }
    }
    Ok(())
}

fn check(exchange: &Exchange) -> Result<()> {
    let history = exchange.history_store().load_all()?;
    let report = exchange.check(&history);

    println!("{:<20}{}", "participants", report.participants.bright_yellow());
    println!("{:<20}{}", "groups", report.groups.bright_yellow());
    println!("{:<20}{}", "excluded pairs", report.excluded_pairs.bright_yellow());
    println!("{:<20}{}", "allowed pairings", report.candidate_pairings.bright_yellow());
    println!("{:<20}{}", "history periods", report.history_periods.bright_yellow());

    match &report.infeasible_reason {
        Some(reason) => println!("{} {}", "infeasible:".bright_red().bold(), reason),
        None => println!("{}", "ok".bright_green().bold()),
    }
    Ok(())
}
