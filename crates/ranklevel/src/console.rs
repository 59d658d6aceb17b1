//! Colorful console output for level computation.
//!
//! Provides a `tracing` layer that renders rank table and bulk regeneration
//! events with colors. Enabled with the `console` feature.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. Does nothing
/// if another global subscriber is already installed.
pub fn init() {
    INIT.get_or_init(|| {
        let mut filter = EnvFilter::from_default_env();
        for directive in ["ranklevel_core=info", "ranklevel_engine=info"] {
            if let Ok(directive) = directive.parse() {
                filter = filter.add_directive(directive);
            }
        }

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(LevelConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats level events with colors.
pub struct LevelConsoleLayer;

impl<S: Subscriber> Layer<S> for LevelConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        // Only handle ranklevel events
        if !event.metadata().target().starts_with("ranklevel") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_level_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    path: Option<String>,
    id: Option<String>,
    error: Option<String>,
    entries: Option<u64>,
    max_rank: Option<u64>,
    records: Option<u64>,
    processed: Option<u64>,
    updated: Option<u64>,
    failed: Option<u64>,
    duration_ms: Option<u64>,
    seeded: Option<bool>,
    cancelled: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.record_str(field, format!("{:?}", value).trim_matches('"'));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "entries" => self.entries = Some(value),
            "max_rank" => self.max_rank = Some(value),
            "records" => self.records = Some(value),
            "processed" => self.processed = Some(value),
            "updated" => self.updated = Some(value),
            "failed" => self.failed = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "seeded" => self.seeded = Some(value),
            "cancelled" => self.cancelled = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "path" => self.path = Some(value.to_string()),
            "id" => self.id = Some(value.to_string()),
            "error" => self.error = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_level_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "rank_table_built" => format_table_built(v),
        "regenerate_start" => format_regenerate_start(v),
        "regenerate_cancelled" => format_regenerate_cancelled(v),
        "record_failed" => format_record_failed(v),
        "regenerate_end" => format_regenerate_end(v),
        _ => String::new(),
    }
}

fn format_table_built(v: &EventVisitor) -> String {
    let seeded = if v.seeded.unwrap_or(false) {
        " (seeded)"
    } else {
        ""
    };

    format!(
        "{} {} {} rank table loaded from {}: {} entries, highest rank {}{}",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Ranks]".bright_cyan(),
        v.path.as_deref().unwrap_or("?").white().bold(),
        count(v.entries).bright_yellow(),
        count(v.max_rank).bright_yellow(),
        seeded
    )
}

fn format_regenerate_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} regenerating levels for {} records",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Levels]".bright_cyan(),
        count(v.records).bright_yellow()
    )
}

fn format_regenerate_cancelled(v: &EventVisitor) -> String {
    format!(
        "{} {} {} cancelled after {} of {} records",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Levels]".bright_cyan(),
        count(v.processed).yellow(),
        count(v.records).yellow()
    )
}

fn format_record_failed(v: &EventVisitor) -> String {
    format!(
        "    {} record {} skipped: {}",
        "->".bright_red(),
        v.id.as_deref().unwrap_or("?").white(),
        v.error.as_deref().unwrap_or("unknown error").red()
    )
}

fn format_regenerate_end(v: &EventVisitor) -> String {
    let failed = v.failed.unwrap_or(0);
    let failed_text = count(Some(failed));
    let failed_colored = if failed > 0 {
        failed_text.bright_red().bold().to_string()
    } else {
        failed_text.white().to_string()
    };

    format!(
        "{} {} {} regeneration {}: time spent ({}), updated ({}), failed ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Levels]".bright_cyan(),
        if v.cancelled.unwrap_or(false) {
            "cancelled".yellow().to_string()
        } else {
            "ended".white().bold().to_string()
        },
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        count(v.updated).bright_magenta().bold(),
        failed_colored
    )
}

fn count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}
