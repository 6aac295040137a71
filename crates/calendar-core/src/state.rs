//! Application state for the calendar shell.
//!
//! The UI owns a single [`CalendarState`] and changes it only by feeding
//! [`Action`]s through [`CalendarState::reduce`].

use chrono::NaiveDate;

use crate::collection::{EventCollection, MutationId, Settlement, StoreAck};
use crate::dates::header_title;
use crate::event::{sample_events, CalendarEvent, EventDraft};
use crate::grid::{grid_for, navigate, CalendarCell, Direction, ViewMode};

/// Shown when the store rejects or never answers a change.
pub const SAVE_FAILED_NOTICE: &str = "Something went wrong while saving your changes.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Closed,
    Create,
    Edit { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(Direction),
    /// Jump to the given date, which callers take from the real clock.
    Today(NaiveDate),
    SetViewMode(ViewMode),
    /// A day cell was clicked.
    SelectDay(NaiveDate),
    OpenCreate,
    OpenEdit(String),
    CloseModal,
    Save(EventDraft),
    Delete(String),
    MarkDispatched(MutationId),
    Settle(MutationId, Result<StoreAck, String>),
    DismissNotice,
    ToggleMenu,
    ReplaceEvents(Vec<CalendarEvent>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    pub anchor: NaiveDate,
    pub view_mode: ViewMode,
    /// Day new events are created on.
    pub selected_date: NaiveDate,
    pub events: EventCollection,
    pub modal: Modal,
    pub menu_open: bool,
    pub notice: Option<String>,
}

impl CalendarState {
    pub fn new(today: NaiveDate, events: Vec<CalendarEvent>) -> Self {
        CalendarState {
            anchor: today,
            view_mode: ViewMode::Month,
            selected_date: today,
            events: EventCollection::new(events),
            modal: Modal::Closed,
            menu_open: false,
            notice: None,
        }
    }

    /// Fresh session seeded with the sample events.
    pub fn with_samples(today: NaiveDate) -> Self {
        Self::new(today, sample_events(today))
    }

    pub fn title(&self) -> String {
        header_title(self.anchor, self.view_mode)
    }

    pub fn cells(&self, today: NaiveDate) -> Vec<CalendarCell> {
        grid_for(self.view_mode, self.anchor, today)
    }

    pub fn editing(&self) -> Option<&CalendarEvent> {
        match &self.modal {
            Modal::Edit { id } => self.events.get(id),
            _ => None,
        }
    }

    /// Contents the modal form should open with.
    pub fn form_draft(&self) -> EventDraft {
        match self.editing() {
            Some(event) => event.to_draft(),
            None => EventDraft::blank(self.selected_date),
        }
    }

    pub fn reduce(&mut self, action: Action) {
        match action {
            Action::Navigate(direction) => {
                self.anchor = navigate(self.anchor, self.view_mode, direction);
            }
            Action::Today(today) => self.anchor = today,
            Action::SetViewMode(mode) => {
                self.view_mode = mode;
                self.menu_open = false;
            }
            Action::SelectDay(day) => {
                self.selected_date = day;
                self.anchor = day;
                self.view_mode = ViewMode::Day;
                self.menu_open = false;
            }
            Action::OpenCreate => {
                self.modal = Modal::Create;
                self.menu_open = false;
            }
            Action::OpenEdit(id) => {
                if let Some(event) = self.events.get(&id) {
                    self.selected_date = event.date;
                    self.modal = Modal::Edit { id };
                    self.menu_open = false;
                }
            }
            Action::CloseModal => self.modal = Modal::Closed,
            Action::Save(draft) => self.save(draft),
            Action::Delete(id) => {
                if let Err(e) = self.events.delete(&id) {
                    tracing::debug!("delete ignored: {}", e);
                }
                if matches!(&self.modal, Modal::Edit { id: editing } if *editing == id) {
                    self.modal = Modal::Closed;
                }
            }
            Action::MarkDispatched(mutation) => self.events.mark_dispatched(mutation),
            Action::Settle(mutation, outcome) => {
                if self.events.settle(mutation, outcome) == Settlement::RolledBack {
                    self.notice = Some(SAVE_FAILED_NOTICE.to_string());
                }
            }
            Action::DismissNotice => self.notice = None,
            Action::ToggleMenu => self.menu_open = !self.menu_open,
            Action::ReplaceEvents(events) => self.events.replace_all(events),
        }
    }

    fn save(&mut self, draft: EventDraft) {
        let result = match &self.modal {
            Modal::Edit { id } => {
                let id = id.clone();
                self.events.update(&id, draft)
            }
            Modal::Create | Modal::Closed => self.events.create(draft),
        };

        match result {
            Ok(_) => self.modal = Modal::Closed,
            Err(e) => tracing::debug!("save ignored: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::StoreCommand;
    use crate::index::agenda;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state() -> CalendarState {
        CalendarState::with_samples(date(2024, 3, 15))
    }

    #[test]
    fn test_navigation_uses_view_mode() {
        let mut s = state();
        s.reduce(Action::Navigate(Direction::Next));
        assert_eq!(s.anchor, date(2024, 4, 15));

        s.reduce(Action::SetViewMode(ViewMode::Week));
        s.reduce(Action::Navigate(Direction::Prev));
        assert_eq!(s.anchor, date(2024, 4, 8));

        s.reduce(Action::SetViewMode(ViewMode::Day));
        s.reduce(Action::Navigate(Direction::Next));
        assert_eq!(s.anchor, date(2024, 4, 9));

        s.reduce(Action::Today(date(2024, 3, 15)));
        assert_eq!(s.anchor, date(2024, 3, 15));
        assert_eq!(s.view_mode, ViewMode::Day);
    }

    #[test]
    fn test_select_day_switches_to_day_view() {
        let mut s = state();
        s.reduce(Action::ToggleMenu);
        s.reduce(Action::SelectDay(date(2024, 3, 20)));

        assert_eq!(s.view_mode, ViewMode::Day);
        assert_eq!(s.anchor, date(2024, 3, 20));
        assert_eq!(s.selected_date, date(2024, 3, 20));
        assert!(!s.menu_open);
        assert_eq!(s.title(), "Wednesday, March 20, 2024");
    }

    #[test]
    fn test_save_creates_on_selected_day() {
        let mut s = state();
        s.reduce(Action::SelectDay(date(2024, 3, 20)));
        s.reduce(Action::OpenCreate);

        let mut draft = s.form_draft();
        assert_eq!(draft.date, date(2024, 3, 20));
        draft.title = "Dentist".to_string();
        s.reduce(Action::Save(draft));

        assert_eq!(s.modal, Modal::Closed);
        assert_eq!(s.events.len(), 3);
        assert_eq!(s.events.undispatched().count(), 1);
    }

    #[test]
    fn test_blank_save_keeps_modal_open() {
        let mut s = state();
        s.reduce(Action::OpenCreate);
        let draft = s.form_draft();
        s.reduce(Action::Save(draft));

        assert_eq!(s.modal, Modal::Create);
        assert_eq!(s.events.len(), 2);
        assert!(s.events.pending().is_empty());
    }

    #[test]
    fn test_edit_updates_in_place() {
        let mut s = state();
        s.reduce(Action::OpenEdit("2".to_string()));
        assert_eq!(s.selected_date, date(2024, 3, 16));

        let mut draft = s.form_draft();
        assert_eq!(draft.title, "Lunch with Client");
        draft.start_time = "08:00".to_string();
        s.reduce(Action::Save(draft));

        let order: Vec<_> = agenda(s.events.events(), date(2024, 3, 16))
            .iter()
            .map(|e| e.start_time.clone())
            .collect();
        assert_eq!(order, ["08:00"]);
        assert!(matches!(
            s.events.pending()[0].command,
            StoreCommand::Update(_)
        ));
    }

    #[test]
    fn test_day_view_orders_regardless_of_insertion() {
        let mut s = CalendarState::new(date(2024, 3, 15), Vec::new());
        for (title, start) in [("Lunch", "12:00"), ("Standup", "09:00")] {
            s.reduce(Action::OpenCreate);
            let mut draft = s.form_draft();
            draft.title = title.to_string();
            draft.start_time = start.to_string();
            s.reduce(Action::Save(draft));
        }

        let titles: Vec<_> = agenda(s.events.events(), date(2024, 3, 15))
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, ["Standup", "Lunch"]);
    }

    #[test]
    fn test_failed_settle_sets_notice() {
        let mut s = state();
        s.reduce(Action::Delete("1".to_string()));
        let mutation = s.events.pending()[0].id;
        s.reduce(Action::MarkDispatched(mutation));
        assert_eq!(s.events.undispatched().count(), 0);

        s.reduce(Action::Settle(mutation, Err("503".to_string())));
        assert_eq!(s.events.len(), 2);
        assert_eq!(s.notice.as_deref(), Some(SAVE_FAILED_NOTICE));

        s.reduce(Action::DismissNotice);
        assert_eq!(s.notice, None);
    }

    #[test]
    fn test_delete_closes_edit_modal() {
        let mut s = state();
        s.reduce(Action::OpenEdit("1".to_string()));
        s.reduce(Action::Delete("1".to_string()));
        assert_eq!(s.modal, Modal::Closed);
        assert!(s.events.get("1").is_none());
    }

    #[test]
    fn test_replace_events() {
        let mut s = state();
        s.reduce(Action::ReplaceEvents(Vec::new()));
        assert!(s.events.is_empty());
    }
}
