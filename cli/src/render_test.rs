use super::*;
use time::macros::date;
use unwind::net::types::GoalStatus;

fn entry(text: &str, emotion: &str, timestamp: &str) -> JournalEntry {
    JournalEntry { text: text.into(), emotion: emotion.into(), timestamp: timestamp.into() }
}

fn goal(id: &str, text: &str, status: GoalStatus) -> Goal {
    Goal { id: id.into(), suggestion_text: text.into(), status }
}

#[test]
fn prediction_is_capitalized() {
    let p = Prediction { predicted_emotion: "anxiety".into() };
    assert_eq!(prediction(&p), "Predicted emotion: Anxiety");
}

#[test]
fn history_renders_one_block_per_entry() {
    let state = HistoryState {
        entries: vec![
            entry("second day", "joy", "2024-10-16T09:30:00Z"),
            entry("first day", "sadness", "odd-stamp"),
        ],
        loading: false,
    };
    let out = history(&state);
    assert_eq!(out.matches("key: ").count(), 2);
    assert!(out.contains("2024-10-16 09:30  Joy"));
    assert!(out.contains("odd-stamp  Sadness"));
    assert!(out.find("second day").unwrap() < out.find("first day").unwrap());
}

#[test]
fn empty_history_shows_placeholder() {
    assert_eq!(history(&HistoryState::default()), NO_ENTRIES);
}

#[test]
fn entry_deleted_names_only_the_key() {
    assert_eq!(entry_deleted("2024-10-15T10:00:00Z"), "Deleted entry 2024-10-15T10:00:00Z.");
}

#[test]
fn suggestion_locked_counts_missing_entries() {
    assert_eq!(suggestion_locked(0), "Write 3 more journal entries to unlock insights.");
    assert_eq!(suggestion_locked(2), "Write 1 more journal entry to unlock insights.");
}

#[test]
fn suggestion_offers_accept_only_when_ready() {
    assert!(suggestion(&SuggestionCard::Ready("Walk".into())).contains("--accept"));
    assert!(!suggestion(&SuggestionCard::Failed).contains("--accept"));
}

#[test]
fn goals_split_pending_and_completed() {
    let state = DashboardState {
        goals: vec![goal("g1", "Walk", GoalStatus::Completed), goal("g2", "Read", GoalStatus::Pending)],
        ..DashboardState::default()
    };
    let out = goals(&state);
    let pending_at = out.find("[ ] g2  Read").unwrap();
    let completed_at = out.find("[x] g1  Walk").unwrap();
    assert!(pending_at < out.find("Completed goals").unwrap());
    assert!(completed_at > out.find("Completed goals").unwrap());
}

#[test]
fn distribution_shows_percentages() {
    let slices = chart::distribution(&[entry("", "joy", "a"), entry("", "joy", "b"), entry("", "anger", "c")]);
    let out = distribution(&slices);
    assert!(out.contains("Joy          2 (66%)  #fbbf24"));
    assert!(out.contains("Anger        1 (33%)  #ef4444"));
}

#[test]
fn streak_pluralizes() {
    assert_eq!(streak(&StreakState { streak: 1 }), "Streak: 1 day");
    assert_eq!(streak(&StreakState { streak: 0 }), "Streak: 0 days");
}

#[test]
fn calendar_starts_on_correct_weekday() {
    let mut state = CalendarState::default();
    state.dates.insert(date!(2024 - 10 - 15));
    let out = calendar(&state, 2024, Month::October);
    let lines: Vec<_> = out.lines().collect();

    assert_eq!(lines[0], "October 2024");
    // 2024-10-01 is a Tuesday.
    assert_eq!(lines[2], "      1   2   3   4   5   6");
    assert!(lines[4].contains(" 15*"));
    assert_eq!(lines.len(), 2 + 5);
}

#[test]
fn default_month_prefers_latest_entry() {
    let mut state = CalendarState::default();
    assert_eq!(default_month(&state, date!(2025 - 03 - 09)), (2025, Month::March));
    state.dates.insert(date!(2024 - 10 - 15));
    assert_eq!(default_month(&state, date!(2025 - 03 - 09)), (2024, Month::October));
}

#[test]
fn dashboard_locks_suggestion_with_few_entries() {
    let state = DashboardState {
        entries: vec![entry("only", "joy", "2024-10-15T09:00:00Z")],
        ..DashboardState::default()
    };
    let out = dashboard(&state, &StreakState { streak: 2 }, &InsightsState::default());
    assert!(out.starts_with("Streak: 2 days"));
    assert!(out.contains("Emotional journey"));
    assert!(out.contains("Write 2 more journal entries"));
    assert!(out.contains(unwind::state::insights::NO_INSIGHTS));
}
