use std::ops::Deref;
use std::rc::Rc;

use calendar_core::{Action, CalendarState};
use chrono::NaiveDate;
use yew::Reducible;

/// [`CalendarState`] behind yew's `use_reducer`.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarStore(CalendarState);

impl CalendarStore {
    pub fn new(today: NaiveDate) -> Self {
        CalendarStore(CalendarState::with_samples(today))
    }
}

impl Deref for CalendarStore {
    type Target = CalendarState;

    fn deref(&self) -> &CalendarState {
        &self.0
    }
}

impl Reducible for CalendarStore {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Action) -> Rc<Self> {
        let mut state = Rc::unwrap_or_clone(self).0;
        state.reduce(action);
        Rc::new(CalendarStore(state))
    }
}
