//! Colored console output for exchange events.
//!
//! Provides a `tracing` layer that renders the engine, store and dispatch
//! events as one readable line each. Other events that pass the filter are
//! printed with their raw fields.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::OnceLock;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "secret_santa=info";

/// Installs the console layer as the global subscriber.
///
/// Safe to call multiple times - only the first call has effect. `RUST_LOG`
/// overrides the default filter.
pub fn init() {
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // Another subscriber may already be installed, e.g. by a test harness.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SantaConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats exchange events with colors on stderr.
pub struct SantaConsoleLayer;

impl<S: Subscriber> Layer<S> for SantaConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(*event.metadata().level(), event.metadata().target(), &visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stderr(), "{output}");
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    fields: Vec<(&'static str, String)>,
}

impl EventVisitor {
    fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }

    fn get_u64(&self, name: &str) -> u64 {
        self.get(name).and_then(|v| v.parse().ok()).unwrap_or(0)
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{value:?}");
        self.fields
            .push((field.name(), s.trim_matches('"').to_string()));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields.push((field.name(), value.to_string()));
    }
}

fn format_event(level: Level, target: &str, v: &EventVisitor) -> String {
    match v.get("event").unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "solve_outcome" => format_solve_outcome(v),
        "solve_end" => format_solve_end(v),
        "history_saved" => format_history_saved(v),
        "messages_dispatched" => format_dispatched(v),
        _ => format_generic(level, target, v),
    }
}

fn format_solve_start(v: &EventVisitor) -> String {
    let participants = v.get_u64("participant_count");
    let groups = v.get_u64("group_count");
    let variables = participants * participants;

    format!(
        "{} {} {} participants ({}), groups ({}), pairing variables ({}), history periods ({}), time limit ({}s)",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Engine]".bright_cyan(),
        participants.to_formatted_string(&Locale::en).bright_yellow(),
        groups.to_formatted_string(&Locale::en).bright_yellow(),
        variables.to_formatted_string(&Locale::en).bright_yellow(),
        v.get_u64("history_periods").bright_yellow(),
        v.get_u64("time_limit_secs").yellow(),
    )
}

fn format_solve_outcome(v: &EventVisitor) -> String {
    let outcome = v.get("outcome").unwrap_or("unknown");
    let colored = match outcome {
        "optimal" | "feasible" => outcome.bright_green().bold().to_string(),
        _ => outcome.bright_red().bold().to_string(),
    };

    format!(
        "{} {} {} backend finished: {} after {}",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Engine]".bright_cyan(),
        colored,
        format_duration_ms(v.get_u64("elapsed_ms")).yellow(),
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let optimality = match v.get("proven_optimal") {
        Some("false") => "within budget".yellow().to_string(),
        _ => "proven optimal".bright_green().to_string(),
    };

    format!(
        "{} {} {} {} pairings, {}, objective ({}), time spent ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Engine]".bright_cyan(),
        v.get_u64("pairings").white().bold(),
        optimality,
        v.get("objective").unwrap_or("0").bright_magenta(),
        format_duration_ms(v.get_u64("duration_ms")).yellow(),
    )
}

fn format_history_saved(v: &EventVisitor) -> String {
    format!(
        "{} {} {} period {} saved to {}",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[History]".bright_cyan(),
        v.get("period").unwrap_or("?").white().bold(),
        v.get("path").unwrap_or("?"),
    )
}

fn format_dispatched(v: &EventVisitor) -> String {
    let mode = match v.get("real") {
        Some("true") => "real".bright_red().bold().to_string(),
        _ => "test".bright_green().to_string(),
    };

    format!(
        "{} {} {} {} messages delivered ({} mode)",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Notify]".bright_cyan(),
        v.get_u64("count").white().bold(),
        mode,
    )
}

fn format_generic(level: Level, target: &str, v: &EventVisitor) -> String {
    let level = match level {
        Level::ERROR => "ERROR".bright_red().to_string(),
        Level::WARN => " WARN".yellow().to_string(),
        Level::INFO => " INFO".bright_green().to_string(),
        Level::DEBUG => "DEBUG".bright_blue().to_string(),
        Level::TRACE => "TRACE".bright_black().to_string(),
    };

    let mut line = format!("{} {} {}", timestamp().bright_black(), level, target.bright_black());
    for (name, value) in &v.fields {
        let _ = write!(line, " {}={}", name.cyan(), value);
    }
    line
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{secs:5}.{millis:03}")
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{ms}ms")
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1000)
    }
}
