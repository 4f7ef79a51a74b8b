//! Colorful console output for solver events.
//!
//! Installs a `tracing` subscriber with a layer that prints the solver's
//! structured events (`solve_start`, `new_best`, `phase_end`, `solve_end`,
//! `stagnation`) as colored lines. Everything else is filtered by
//! `RUST_LOG`, defaulting to `teamplan_solver=debug`.

use std::io::{self, Write};
use std::sync::OnceLock;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes the console output.
///
/// Safe to call multiple times; only the first call has effect. Does
/// nothing if another global subscriber is already installed.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("teamplan_solver=debug"));
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SolverConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats solver events with colors.
pub struct SolverConsoleLayer;

impl<S: Subscriber> Layer<S> for SolverConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("teamplan_solver") {
            return;
        }
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        if let Some(line) = format_event(&visitor) {
            let _ = writeln!(io::stdout(), "{line}");
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    phase: Option<String>,
    score: Option<String>,
    best_score: Option<String>,
    search: Option<u64>,
    step: Option<u64>,
    steps: Option<u64>,
    moves_evaluated: Option<u64>,
    moves_per_second: Option<u64>,
    item_count: Option<u64>,
    work_day_count: Option<u64>,
    team_member_count: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let text = format!("{value:?}").trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(text),
            "phase" => self.phase = Some(text),
            "score" => self.score = Some(text),
            "best_score" => self.best_score = Some(text),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_debug(field, &value);
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "search" => self.search = Some(value),
            "step" => self.step = Some(value),
            "steps" => self.steps = Some(value),
            "moves_evaluated" => self.moves_evaluated = Some(value),
            "moves_per_second" => self.moves_per_second = Some(value),
            "item_count" => self.item_count = Some(value),
            "work_day_count" => self.work_day_count = Some(value),
            "team_member_count" => self.team_member_count = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }
}

fn format_event(v: &EventVisitor) -> Option<String> {
    let line = match v.event.as_deref()? {
        "solve_start" => format!(
            "{} {} items ({}), work days ({}), team members ({})",
            tag(v),
            "Solving started:".white().bold(),
            count(v.item_count).bright_yellow(),
            count(v.work_day_count).bright_yellow(),
            count(v.team_member_count).bright_yellow(),
        ),
        "phase_end" => format!(
            "{} {} phase ended: steps ({}), best score ({})",
            tag(v),
            v.phase.as_deref().unwrap_or("Unknown").white().bold(),
            count(v.steps),
            format_score(
                v.best_score
                    .as_deref()
                    .or(v.score.as_deref())
                    .unwrap_or("N/A")
            ),
        ),
        "new_best" => format!(
            "    {} Step {:>7} | {}",
            "->".bright_blue(),
            count(v.step),
            format_score(v.score.as_deref().unwrap_or("N/A")),
        ),
        "solve_end" => format!(
            "{} {} best score ({}), steps ({}), moves evaluated ({}), moves/s ({})",
            tag(v),
            "Solving ended:".white().bold(),
            format_score(v.score.as_deref().unwrap_or("N/A")),
            count(v.steps),
            count(v.moves_evaluated).bright_magenta(),
            count(v.moves_per_second).bright_magenta(),
        ),
        "stagnation" => format!(
            "{} {} hard constraints still broken ({})",
            tag(v),
            "WARN".bright_red().bold(),
            format_score(v.score.as_deref().unwrap_or("N/A")),
        ),
        _ => return None,
    };
    Some(line)
}

fn tag(v: &EventVisitor) -> String {
    match v.search {
        Some(search) => format!("[Search {search}]").bright_cyan().to_string(),
        None => "[Solver]".bright_cyan().to_string(),
    }
}

fn count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
}

/// Colors a `"<hard>hard/<soft>soft"` score: red hard and yellow soft
/// penalties, green zeros.
fn format_score(score: &str) -> String {
    let parsed = score.split_once('/').and_then(|(hard, soft)| {
        let hard_value: i64 = hard.strip_suffix("hard")?.parse().ok()?;
        let soft_value: i64 = soft.strip_suffix("soft")?.parse().ok()?;
        Some((hard, hard_value, soft, soft_value))
    });
    let Some((hard, hard_value, soft, soft_value)) = parsed else {
        return score.white().to_string();
    };

    let hard = if hard_value < 0 {
        hard.bright_red().to_string()
    } else {
        hard.bright_green().to_string()
    };
    let soft = if soft_value < 0 {
        soft.yellow().to_string()
    } else {
        soft.bright_green().to_string()
    };
    format!("{hard}/{soft}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_events_are_not_printed() {
        let visitor = EventVisitor {
            event: Some("move_evaluated".to_string()),
            ..Default::default()
        };
        assert!(format_event(&visitor).is_none());
        assert!(format_event(&EventVisitor::default()).is_none());
    }

    #[test]
    fn solve_end_mentions_score_and_counts() {
        let visitor = EventVisitor {
            event: Some("solve_end".to_string()),
            score: Some("0hard/-3soft".to_string()),
            steps: Some(1200),
            moves_evaluated: Some(76_800),
            ..Default::default()
        };
        let line = format_event(&visitor).unwrap();
        assert!(line.contains("1,200"));
        assert!(line.contains("76,800"));
        assert!(line.contains("hard"));
    }

    #[test]
    fn non_score_text_is_passed_through() {
        assert!(format_score("N/A").contains("N/A"));
    }
}
