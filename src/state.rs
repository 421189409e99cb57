//! Session state for the year calendar and the transition function that
//! drives it. All mutation goes through [`reduce`]; network work is requested
//! as [`Effect`]s and comes back as actions.

use crate::calc::{DayCell, build_day_cells, compose_tooltip};
use crate::data::{
    EntryId, Holiday, HolidayDirectory, ScheduleEntry, ScheduleStore, SelectionPolicy, date_key,
};
use crate::net::Background;
use chrono::{Datelike, Duration, NaiveDate};
use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub content: String,
    pub x: u16,
    pub y: u16,
}

/// The entry an edit modal acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditingTarget {
    pub date: NaiveDate,
    pub id: EntryId,
    pub original: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Add { draft: String },
    Edit { target: EditingTarget, draft: String },
}

impl Modal {
    pub fn draft(&self) -> &str {
        match self {
            Modal::Add { draft } | Modal::Edit { draft, .. } => draft,
        }
    }

    fn draft_mut(&mut self) -> &mut String {
        match self {
            Modal::Add { draft } | Modal::Edit { draft, .. } => draft,
        }
    }

    /// Submission is disabled while the draft is blank.
    pub fn can_submit(&self) -> bool {
        !self.draft().trim().is_empty()
    }
}

/// A delete waiting on the user's yes/no answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub date: NaiveDate,
    pub id: EntryId,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NoSelection,
    DaySelected,
    AddModalOpen,
    EditModalOpen,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Mounted,
    PrevYear,
    NextYear,
    GoToCurrentYear,
    SelectDay(NaiveDate),
    MoveSelection(i64),
    OpenAddModal,
    OpenEditModal { index: usize },
    InputChar(char),
    Backspace,
    SubmitModal,
    CancelModal,
    RequestDelete { index: usize },
    ConfirmDelete,
    CancelDelete,
    Hover { date: NaiveDate, x: u16, y: u16 },
    HoverOut,
    HolidaysLoaded {
        year: i32,
        generation: u64,
        holidays: HolidayDirectory,
    },
    BackgroundLoaded(Background),
}

/// Side effects requested by a transition, run by the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    FetchHolidays { year: i32, generation: u64 },
    FetchBackground,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub year: i32,
    pub today: NaiveDate,
    pub policy: SelectionPolicy,
    pub selected: Option<NaiveDate>,
    pub modal: Option<Modal>,
    pub pending_delete: Option<PendingDelete>,
    pub tooltip: Option<Tooltip>,
    pub holidays: HolidayDirectory,
    pub schedules: ScheduleStore,
    pub background: Background,
    /// Tag of the most recent holiday request; older responses are discarded.
    generation: u64,
}

impl AppState {
    pub fn new(today: NaiveDate, policy: SelectionPolicy) -> Self {
        let mut state = AppState {
            year: today.year(),
            today,
            policy,
            selected: None,
            modal: None,
            pending_delete: None,
            tooltip: None,
            holidays: HolidayDirectory::default(),
            schedules: ScheduleStore::default(),
            background: Background::default(),
            generation: 0,
        };
        state.selected = state.default_selection();
        state
    }

    pub fn phase(&self) -> Phase {
        match (&self.modal, self.selected) {
            (Some(Modal::Add { .. }), _) => Phase::AddModalOpen,
            (Some(Modal::Edit { .. }), _) => Phase::EditModalOpen,
            (None, Some(_)) => Phase::DaySelected,
            (None, None) => Phase::NoSelection,
        }
    }

    pub fn day_cells(&self) -> Vec<DayCell> {
        build_day_cells(
            self.year,
            self.today,
            &self.holidays,
            &self.schedules,
            self.selected,
        )
    }

    pub fn selected_entries(&self) -> &[ScheduleEntry] {
        match self.selected {
            Some(d) => self.schedules.entries_for(&date_key(d)),
            None => &[],
        }
    }

    pub fn selected_holiday(&self) -> Option<&Holiday> {
        self.selected.and_then(|d| self.holidays.get(&date_key(d)))
    }

    /// True until the holiday response for the displayed year arrives.
    pub fn holidays_loading(&self) -> bool {
        self.holidays.year() != Some(self.year)
    }

    fn default_selection(&self) -> Option<NaiveDate> {
        match self.policy {
            SelectionPolicy::TodayOnCurrentYear if self.year == self.today.year() => {
                Some(self.today)
            }
            _ => None,
        }
    }

    /// Switches to `year`; staying on the displayed year is a no-op.
    fn change_year(&mut self, year: i32) -> Vec<Effect> {
        let year = year.clamp(NaiveDate::MIN.year(), NaiveDate::MAX.year());
        if year == self.year {
            return Vec::new();
        }
        self.year = year;
        self.generation += 1;
        self.holidays = HolidayDirectory::default();
        self.selected = self.default_selection();
        self.modal = None;
        self.pending_delete = None;
        self.tooltip = None;
        vec![Effect::FetchHolidays {
            year,
            generation: self.generation,
        }]
    }

    fn in_displayed_year(&self, date: NaiveDate) -> bool {
        date.year() == self.year
    }
}

/// Applies `action` to `state` and returns the effects it requests.
pub fn reduce(state: &mut AppState, action: Action) -> Vec<Effect> {
    match action {
        Action::Mounted => vec![
            Effect::FetchHolidays {
                year: state.year,
                generation: state.generation,
            },
            Effect::FetchBackground,
        ],
        Action::PrevYear => state.change_year(state.year.saturating_sub(1)),
        Action::NextYear => state.change_year(state.year.saturating_add(1)),
        Action::GoToCurrentYear => {
            let year = state.today.year();
            state.change_year(year)
        }
        Action::SelectDay(date) => {
            if state.in_displayed_year(date) {
                state.selected = Some(date);
            }
            Vec::new()
        }
        Action::MoveSelection(days) => {
            match state.selected {
                None => {
                    state.selected = if state.today.year() == state.year {
                        Some(state.today)
                    } else {
                        NaiveDate::from_ymd_opt(state.year, 1, 1)
                    };
                }
                Some(current) => {
                    if let Some(next) = current.checked_add_signed(Duration::days(days)) {
                        if state.in_displayed_year(next) {
                            state.selected = Some(next);
                        }
                    }
                }
            }
            Vec::new()
        }
        Action::OpenAddModal => {
            if state.selected.is_some() {
                state.modal = Some(Modal::Add {
                    draft: String::new(),
                });
            }
            Vec::new()
        }
        Action::OpenEditModal { index } => {
            if let Some(date) = state.selected {
                if let Some(entry) = state.schedules.entry_at(&date_key(date), index) {
                    state.modal = Some(Modal::Edit {
                        target: EditingTarget {
                            date,
                            id: entry.id,
                            original: entry.text.clone(),
                        },
                        draft: entry.text.clone(),
                    });
                }
            }
            Vec::new()
        }
        Action::InputChar(c) => {
            if let Some(modal) = state.modal.as_mut() {
                modal.draft_mut().push(c);
            }
            Vec::new()
        }
        Action::Backspace => {
            if let Some(modal) = state.modal.as_mut() {
                modal.draft_mut().pop();
            }
            Vec::new()
        }
        Action::SubmitModal => {
            let Some(modal) = state.modal.take() else {
                return Vec::new();
            };
            if !modal.can_submit() {
                state.modal = Some(modal);
                return Vec::new();
            }
            match modal {
                Modal::Add { draft } => {
                    if let Some(date) = state.selected {
                        state.schedules.add(&date_key(date), &draft);
                    }
                }
                Modal::Edit { target, draft } => {
                    if !state
                        .schedules
                        .edit_by_id(&date_key(target.date), target.id, &draft)
                    {
                        debug!(
                            "edit target vanished date={} id={}",
                            target.date, target.id.0
                        );
                    }
                }
            }
            Vec::new()
        }
        Action::CancelModal => {
            state.modal = None;
            Vec::new()
        }
        Action::RequestDelete { index } => {
            if let Some(date) = state.selected {
                if let Some(entry) = state.schedules.entry_at(&date_key(date), index) {
                    state.pending_delete = Some(PendingDelete {
                        date,
                        id: entry.id,
                        text: entry.text.clone(),
                    });
                }
            }
            Vec::new()
        }
        Action::ConfirmDelete => {
            if let Some(pending) = state.pending_delete.take() {
                state
                    .schedules
                    .delete_by_id(&date_key(pending.date), pending.id);
            }
            Vec::new()
        }
        Action::CancelDelete => {
            state.pending_delete = None;
            Vec::new()
        }
        Action::Hover { date, x, y } => {
            state.tooltip = if state.in_displayed_year(date) {
                Some(Tooltip {
                    content: compose_tooltip(date, &state.holidays, &state.schedules),
                    x,
                    y,
                })
            } else {
                None
            };
            Vec::new()
        }
        Action::HoverOut => {
            state.tooltip = None;
            Vec::new()
        }
        Action::HolidaysLoaded {
            year,
            generation,
            holidays,
        } => {
            if generation == state.generation && year == state.year {
                state.holidays = holidays;
            } else {
                debug!(
                    "discarding stale holidays year={} generation={} (current year={} generation={})",
                    year, generation, state.year, state.generation
                );
            }
            Vec::new()
        }
        Action::BackgroundLoaded(bg) => {
            state.background = bg;
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn state_on(today: NaiveDate) -> AppState {
        AppState::new(today, SelectionPolicy::TodayOnCurrentYear)
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            reduce(state, Action::InputChar(c));
        }
    }

    fn add(state: &mut AppState, text: &str) {
        reduce(state, Action::OpenAddModal);
        type_text(state, text);
        reduce(state, Action::SubmitModal);
    }

    #[test]
    fn test_initial_state_selects_today_in_current_year() {
        let s = state_on(d(2025, 6, 15));
        assert_eq!(s.year, 2025);
        assert_eq!(s.selected, Some(d(2025, 6, 15)));
        assert_eq!(s.phase(), Phase::DaySelected);
        assert!(s.holidays_loading());
    }

    #[test]
    fn test_initial_state_without_selection_policy() {
        let s = AppState::new(d(2025, 6, 15), SelectionPolicy::None);
        assert_eq!(s.selected, None);
        assert_eq!(s.phase(), Phase::NoSelection);
    }

    #[test]
    fn test_mounted_requests_both_fetches() {
        let mut s = state_on(d(2025, 6, 15));
        let effects = reduce(&mut s, Action::Mounted);
        assert_eq!(
            effects,
            vec![
                Effect::FetchHolidays {
                    year: 2025,
                    generation: 0
                },
                Effect::FetchBackground
            ]
        );
    }

    #[test]
    fn test_year_navigation_resets_selection_and_refetches() {
        let mut s = state_on(d(2025, 6, 15));
        let effects = reduce(&mut s, Action::NextYear);
        assert_eq!(s.year, 2026);
        assert_eq!(s.selected, None);
        assert_eq!(
            effects,
            vec![Effect::FetchHolidays {
                year: 2026,
                generation: 1
            }]
        );

        let effects = reduce(&mut s, Action::PrevYear);
        assert_eq!(s.year, 2025);
        assert_eq!(s.selected, Some(d(2025, 6, 15)));
        // previously seen year is fetched again
        assert_eq!(
            effects,
            vec![Effect::FetchHolidays {
                year: 2025,
                generation: 2
            }]
        );
    }

    #[test]
    fn test_go_to_current_year() {
        let mut s = state_on(d(2025, 6, 15));
        reduce(&mut s, Action::PrevYear);
        reduce(&mut s, Action::PrevYear);
        reduce(&mut s, Action::GoToCurrentYear);
        assert_eq!(s.year, 2025);
        assert_eq!(s.selected, Some(d(2025, 6, 15)));
    }

    #[test]
    fn test_none_policy_never_auto_selects() {
        let mut s = AppState::new(d(2025, 6, 15), SelectionPolicy::None);
        reduce(&mut s, Action::NextYear);
        reduce(&mut s, Action::GoToCurrentYear);
        assert_eq!(s.selected, None);
    }

    #[test]
    fn test_year_change_closes_overlays() {
        let mut s = state_on(d(2025, 6, 15));
        reduce(&mut s, Action::OpenAddModal);
        reduce(
            &mut s,
            Action::Hover {
                date: d(2025, 6, 1),
                x: 1,
                y: 1,
            },
        );
        reduce(&mut s, Action::NextYear);
        assert!(s.modal.is_none());
        assert!(s.tooltip.is_none());
        assert!(s.pending_delete.is_none());
    }

    #[test]
    fn test_select_day_ignores_filler_dates() {
        let mut s = state_on(d(2025, 6, 15));
        reduce(&mut s, Action::SelectDay(d(2024, 12, 30)));
        assert_eq!(s.selected, Some(d(2025, 6, 15)));
        reduce(&mut s, Action::SelectDay(d(2025, 1, 1)));
        assert_eq!(s.selected, Some(d(2025, 1, 1)));
    }

    #[test]
    fn test_select_day_keeps_open_modal() {
        let mut s = state_on(d(2025, 6, 15));
        reduce(&mut s, Action::OpenAddModal);
        reduce(&mut s, Action::SelectDay(d(2025, 6, 16)));
        assert_eq!(s.phase(), Phase::AddModalOpen);
        assert_eq!(s.selected, Some(d(2025, 6, 16)));
    }

    #[test]
    fn test_move_selection_stays_in_year() {
        let mut s = AppState::new(d(2025, 6, 15), SelectionPolicy::None);
        reduce(&mut s, Action::NextYear);
        reduce(&mut s, Action::MoveSelection(1));
        assert_eq!(s.selected, Some(d(2026, 1, 1)));
        reduce(&mut s, Action::MoveSelection(-7));
        assert_eq!(s.selected, Some(d(2026, 1, 1)));
        reduce(&mut s, Action::MoveSelection(7));
        assert_eq!(s.selected, Some(d(2026, 1, 8)));
    }

    #[test]
    fn test_add_modal_requires_selection() {
        let mut s = AppState::new(d(2025, 6, 15), SelectionPolicy::None);
        reduce(&mut s, Action::OpenAddModal);
        assert!(s.modal.is_none());
    }

    #[test]
    fn test_add_flow_appends_schedules() {
        let mut s = state_on(d(2025, 5, 1));
        reduce(&mut s, Action::SelectDay(d(2025, 5, 5)));
        add(&mut s, "소풍");
        add(&mut s, "가족모임");
        assert_eq!(s.schedules.texts_for("2025-05-05"), vec!["소풍", "가족모임"]);
        assert_eq!(s.schedules.count_for("2025-05-05"), 2);
        assert_eq!(s.phase(), Phase::DaySelected);
        let cell = s
            .day_cells()
            .into_iter()
            .find(|c| c.key == "2025-05-05")
            .unwrap();
        assert_eq!(cell.tier(), crate::calc::ScheduleTier::Few);
    }

    #[test]
    fn test_blank_submit_keeps_modal_open() {
        let mut s = state_on(d(2025, 5, 1));
        reduce(&mut s, Action::OpenAddModal);
        type_text(&mut s, "  ");
        reduce(&mut s, Action::SubmitModal);
        assert_eq!(s.phase(), Phase::AddModalOpen);
        assert_eq!(s.schedules.total(), 0);
    }

    #[test]
    fn test_cancel_add_discards_draft() {
        let mut s = state_on(d(2025, 5, 1));
        reduce(&mut s, Action::OpenAddModal);
        type_text(&mut s, "x");
        reduce(&mut s, Action::CancelModal);
        assert_eq!(s.phase(), Phase::DaySelected);
        assert_eq!(s.schedules.total(), 0);
    }

    #[test]
    fn test_backspace_edits_draft() {
        let mut s = state_on(d(2025, 5, 1));
        reduce(&mut s, Action::OpenAddModal);
        type_text(&mut s, "ab");
        reduce(&mut s, Action::Backspace);
        assert_eq!(s.modal.as_ref().unwrap().draft(), "a");
    }

    #[test]
    fn test_edit_flow_replaces_entry() {
        let mut s = state_on(d(2025, 5, 1));
        add(&mut s, "a");
        add(&mut s, "b");
        reduce(&mut s, Action::OpenEditModal { index: 1 });
        assert_eq!(s.phase(), Phase::EditModalOpen);
        assert_eq!(s.modal.as_ref().unwrap().draft(), "b");
        reduce(&mut s, Action::Backspace);
        type_text(&mut s, "B");
        reduce(&mut s, Action::SubmitModal);
        assert_eq!(s.schedules.texts_for("2025-05-01"), vec!["a", "B"]);
    }

    #[test]
    fn test_edit_cancel_leaves_store_untouched() {
        let mut s = state_on(d(2025, 5, 1));
        add(&mut s, "a");
        reduce(&mut s, Action::OpenEditModal { index: 0 });
        type_text(&mut s, "zzz");
        reduce(&mut s, Action::CancelModal);
        assert_eq!(s.schedules.texts_for("2025-05-01"), vec!["a"]);
    }

    #[test]
    fn test_edit_invalid_index_is_noop() {
        let mut s = state_on(d(2025, 5, 1));
        reduce(&mut s, Action::OpenEditModal { index: 0 });
        assert!(s.modal.is_none());
    }

    #[test]
    fn test_edit_targets_entry_after_it_moves() {
        let mut s = state_on(d(2025, 5, 1));
        add(&mut s, "a");
        add(&mut s, "b");
        reduce(&mut s, Action::OpenEditModal { index: 1 });
        // "a" is removed underneath the open edit modal
        s.schedules.delete("2025-05-01", 0);
        type_text(&mut s, "!");
        reduce(&mut s, Action::SubmitModal);
        assert_eq!(s.schedules.texts_for("2025-05-01"), vec!["b!"]);
    }

    #[test]
    fn test_edit_keeps_its_date_when_selection_moves() {
        let mut s = state_on(d(2025, 5, 1));
        add(&mut s, "a");
        reduce(&mut s, Action::OpenEditModal { index: 0 });
        reduce(&mut s, Action::SelectDay(d(2025, 5, 2)));
        type_text(&mut s, "2");
        reduce(&mut s, Action::SubmitModal);
        assert_eq!(s.schedules.texts_for("2025-05-01"), vec!["a2"]);
        assert_eq!(s.schedules.count_for("2025-05-02"), 0);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut s = state_on(d(2025, 5, 1));
        add(&mut s, "a");
        add(&mut s, "b");
        add(&mut s, "c");
        reduce(&mut s, Action::RequestDelete { index: 1 });
        assert_eq!(s.schedules.count_for("2025-05-01"), 3);
        assert_eq!(s.pending_delete.as_ref().unwrap().text, "b");

        reduce(&mut s, Action::CancelDelete);
        assert!(s.pending_delete.is_none());
        assert_eq!(s.schedules.count_for("2025-05-01"), 3);

        reduce(&mut s, Action::RequestDelete { index: 1 });
        reduce(&mut s, Action::ConfirmDelete);
        assert_eq!(s.schedules.texts_for("2025-05-01"), vec!["a", "c"]);
    }

    #[test]
    fn test_confirm_without_pending_is_noop() {
        let mut s = state_on(d(2025, 5, 1));
        add(&mut s, "a");
        reduce(&mut s, Action::ConfirmDelete);
        assert_eq!(s.schedules.count_for("2025-05-01"), 1);
    }

    #[test]
    fn test_hover_composes_tooltip_without_changing_selection() {
        let mut s = state_on(d(2025, 5, 1));
        add(&mut s, "a");
        reduce(
            &mut s,
            Action::Hover {
                date: d(2025, 5, 1),
                x: 10,
                y: 4,
            },
        );
        let tip = s.tooltip.clone().unwrap();
        assert_eq!(tip.content, "2025-05-01\n\nSchedules (1):\n- a");
        assert_eq!((tip.x, tip.y), (10, 4));
        assert_eq!(s.selected, Some(d(2025, 5, 1)));

        reduce(&mut s, Action::HoverOut);
        assert!(s.tooltip.is_none());
    }

    #[test]
    fn test_hover_on_filler_hides_tooltip() {
        let mut s = state_on(d(2025, 5, 1));
        reduce(
            &mut s,
            Action::Hover {
                date: d(2024, 12, 30),
                x: 0,
                y: 0,
            },
        );
        assert!(s.tooltip.is_none());
    }

    #[test]
    fn test_holidays_loaded_for_current_generation() {
        let mut s = state_on(d(2025, 5, 1));
        let holidays = HolidayDirectory::new(
            2025,
            vec![Holiday::new("2025-01-01", "신정", "New Year's Day")],
        );
        reduce(
            &mut s,
            Action::HolidaysLoaded {
                year: 2025,
                generation: 0,
                holidays,
            },
        );
        assert!(!s.holidays_loading());
        let jan1 = s
            .day_cells()
            .into_iter()
            .find(|c| c.key == "2025-01-01")
            .unwrap();
        assert!(jan1.is_holiday);
        assert!(jan1.is_rest_day());
    }

    #[test]
    fn test_stale_holiday_response_is_discarded() {
        let mut s = state_on(d(2025, 5, 1));
        reduce(&mut s, Action::NextYear); // generation 1, 2026
        reduce(&mut s, Action::NextYear); // generation 2, 2027
        reduce(
            &mut s,
            Action::HolidaysLoaded {
                year: 2026,
                generation: 1,
                holidays: HolidayDirectory::new(
                    2026,
                    vec![Holiday::new("2026-01-01", "신정", "New Year's Day")],
                ),
            },
        );
        assert!(s.holidays_loading());
        assert!(s.holidays.is_empty());

        reduce(
            &mut s,
            Action::HolidaysLoaded {
                year: 2027,
                generation: 2,
                holidays: HolidayDirectory::empty(2027),
            },
        );
        assert!(!s.holidays_loading());
    }

    #[test]
    fn test_failed_fetch_leaves_no_holidays() {
        let mut s = state_on(d(2025, 5, 1));
        reduce(
            &mut s,
            Action::HolidaysLoaded {
                year: 2025,
                generation: 0,
                holidays: HolidayDirectory::empty(2025),
            },
        );
        assert!(s.day_cells().iter().all(|c| !c.is_holiday));
    }

    #[test]
    fn test_selected_holiday_and_entries() {
        let mut s = state_on(d(2025, 1, 1));
        reduce(
            &mut s,
            Action::HolidaysLoaded {
                year: 2025,
                generation: 0,
                holidays: HolidayDirectory::new(
                    2025,
                    vec![Holiday::new("2025-01-01", "신정", "New Year's Day")],
                ),
            },
        );
        add(&mut s, "떡국");
        assert_eq!(s.selected_holiday().unwrap().local_name, "신정");
        assert_eq!(s.selected_entries().len(), 1);
    }

    #[test]
    fn test_background_loaded() {
        let mut s = state_on(d(2025, 1, 1));
        assert_eq!(s.background, Background::Pending);
        reduce(&mut s, Action::BackgroundLoaded(Background::Fallback));
        assert_eq!(s.background, Background::Fallback);
    }

    #[test]
    fn test_go_to_current_year_while_displayed_is_noop() {
        let mut s = state_on(d(2025, 6, 15));
        reduce(
            &mut s,
            Action::HolidaysLoaded {
                year: 2025,
                generation: 0,
                holidays: HolidayDirectory::new(
                    2025,
                    vec![Holiday::new("2025-03-01", "삼일절", "Independence Movement Day")],
                ),
            },
        );
        reduce(&mut s, Action::SelectDay(d(2025, 3, 3)));

        let effects = reduce(&mut s, Action::GoToCurrentYear);
        assert!(effects.is_empty());
        assert_eq!(s.generation, 0);
        assert_eq!(s.selected, Some(d(2025, 3, 3)));
        assert!(!s.holidays_loading());
        assert_eq!(s.holidays.len(), 1);
    }

    #[test]
    fn test_year_navigation_stops_at_calendar_limits() {
        let max_year = NaiveDate::MAX.year();
        let mut s = AppState::new(d(2025, 6, 15), SelectionPolicy::None);
        s.year = max_year;
        assert!(reduce(&mut s, Action::NextYear).is_empty());
        assert_eq!(s.year, max_year);

        let min_year = NaiveDate::MIN.year();
        s.year = min_year;
        assert!(reduce(&mut s, Action::PrevYear).is_empty());
        assert_eq!(s.year, min_year);

        s.year = i32::MAX;
        let effects = reduce(&mut s, Action::NextYear);
        assert_eq!(s.year, max_year);
        assert_eq!(effects.len(), 1);
    }
}
