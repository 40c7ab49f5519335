//! Plain-text rendering of view state.
//!
//! Every function returns a `String` so output can be asserted on without
//! capturing stdout.

use std::fmt::Write as _;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Month};

use unwind::chart::{self, EmotionSlice, TimelinePoint};
use unwind::net::types::{Goal, JournalEntry, Prediction};
use unwind::state::calendar::CalendarState;
use unwind::state::dashboard::{DashboardState, MIN_ENTRIES_FOR_SUGGESTION, SuggestionCard};
use unwind::state::history::HistoryState;
use unwind::state::insights::InsightsState;
use unwind::state::streak::StreakState;

const ENTRY_TIME: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day] [hour]:[minute]");
const RULE_WIDTH: usize = 40;

pub const NO_ENTRIES: &str = "No journal entries yet. Write one with `unwind write`.";

#[must_use]
pub fn prediction(prediction: &Prediction) -> String {
    format!("Predicted emotion: {}", capitalize(&prediction.predicted_emotion))
}

#[must_use]
pub fn history(state: &HistoryState) -> String {
    if state.is_empty() {
        return NO_ENTRIES.to_owned();
    }
    let mut out = String::new();
    for entry in state.rows() {
        let _ = writeln!(out, "{}  {}", entry_time(entry), capitalize(&entry.emotion));
        for line in entry.text.trim_end().lines() {
            let _ = writeln!(out, "    {line}");
        }
        let _ = writeln!(out, "    key: {}", entry.timestamp);
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    }
    out
}

#[must_use]
pub fn entry_deleted(timestamp: &str) -> String {
    format!("Deleted entry {timestamp}.")
}

#[must_use]
pub fn timeline(points: &[TimelinePoint]) -> String {
    let mut out = String::from("Emotional journey\n");
    for point in points {
        let label = chart::score_label(point.score).unwrap_or_default();
        let bar = "#".repeat(usize::from(point.score) + 1);
        let _ = writeln!(out, "  {:<12} {:<5} {}", point.label, bar, label);
    }
    out
}

#[must_use]
pub fn distribution(slices: &[EmotionSlice]) -> String {
    let total: usize = slices.iter().map(|s| s.count).sum();
    let mut out = String::from("Emotional distribution\n");
    for slice in slices {
        let percent = if total == 0 { 0 } else { slice.count * 100 / total };
        let _ = writeln!(out, "  {:<10} {:>3} ({percent}%)  {}", slice.label, slice.count, slice.color);
    }
    out
}

#[must_use]
pub fn suggestion(card: &SuggestionCard) -> String {
    if card.can_accept() {
        format!("Suggestion: {}\nRun `unwind suggest --accept` to add it to your goals.", card.message())
    } else {
        card.message().to_owned()
    }
}

#[must_use]
pub fn suggestion_locked(entry_count: usize) -> String {
    let missing = MIN_ENTRIES_FOR_SUGGESTION.saturating_sub(entry_count);
    if missing == 0 {
        "An insight is already being generated.".to_owned()
    } else {
        format!("Write {missing} more journal entr{} to unlock insights.", if missing == 1 { "y" } else { "ies" })
    }
}

#[must_use]
pub fn goals(state: &DashboardState) -> String {
    let mut out = String::from("Pending goals\n");
    let pending = state.pending_goals();
    if pending.is_empty() {
        out.push_str("  No pending goals. Accept a suggestion to add one.\n");
    }
    for goal in pending {
        out.push_str(&goal_line(goal));
    }

    let completed = state.completed_goals();
    if !completed.is_empty() {
        out.push_str("Completed goals\n");
        for goal in completed {
            out.push_str(&goal_line(goal));
        }
    }
    out
}

fn goal_line(goal: &Goal) -> String {
    let mark = if goal.is_completed() { 'x' } else { ' ' };
    format!("  [{mark}] {}  {}\n", goal.id, goal.suggestion_text)
}

#[must_use]
pub fn dashboard(state: &DashboardState, streak: &StreakState, insights: &InsightsState) -> String {
    let mut sections = vec![self::streak(streak)];
    if state.entries.is_empty() {
        sections.push(NO_ENTRIES.to_owned());
    } else {
        sections.push(timeline(&chart::timeline(&state.entries)));
        sections.push(distribution(&chart::distribution(&state.entries)));
    }
    if !state.can_generate() {
        sections.push(suggestion_locked(state.entries.len()));
    }
    sections.push(goals(state));
    sections.push(self::insights(insights));
    sections.join("\n")
}

#[must_use]
pub fn streak(state: &StreakState) -> String {
    let unit = if state.streak == 1 { "day" } else { "days" };
    format!("Streak: {} {unit}", state.streak)
}

#[must_use]
pub fn insights(state: &InsightsState) -> String {
    let mut out = String::from("Insights\n");
    for line in state.lines() {
        let _ = writeln!(out, "  - {line}");
    }
    out
}

/// Month grid, Monday first; days with entries carry a `*`.
#[must_use]
pub fn calendar(state: &CalendarState, year: i32, month: Month) -> String {
    let days = state.month(year, month);
    let mut out = format!("{month} {year}\n Mo  Tu  We  Th  Fr  Sa  Su\n");
    let Some(first) = days.first() else {
        return out;
    };

    let offset = usize::from(first.date.weekday().number_days_from_monday());
    let mut line = "    ".repeat(offset);
    for (idx, day) in days.iter().enumerate() {
        let mark = if day.has_entry { '*' } else { ' ' };
        let _ = write!(line, "{:>3}{mark}", day.date.day());
        if (offset + idx + 1) % 7 == 0 {
            out.push_str(line.trim_end());
            out.push('\n');
            line.clear();
        }
    }
    if !line.is_empty() {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Month shown when none is requested: the latest month with entries, else `today`'s.
#[must_use]
pub fn default_month(state: &CalendarState, today: Date) -> (i32, Month) {
    let anchor = state.latest().unwrap_or(today);
    (anchor.year(), anchor.month())
}

fn entry_time(entry: &JournalEntry) -> String {
    entry
        .recorded_at()
        .and_then(|dt| dt.format(ENTRY_TIME).ok())
        .unwrap_or_else(|| entry.timestamp.clone())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
