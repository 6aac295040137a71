//! Event index: buckets the in-memory events by calendar day.
//!
//! Nothing here is cached. Every call scans the full collection, which is
//! fine at personal-calendar sizes.

use chrono::NaiveDate;

use crate::dates::is_same_day;
use crate::event::CalendarEvent;
use crate::grid::CalendarCell;

/// Events shown inside one month-view cell before the overflow counter.
pub const MONTH_CELL_LIMIT: usize = 3;

/// Events on `day`, in collection order.
pub fn events_on<'a>(events: &'a [CalendarEvent], day: NaiveDate) -> Vec<&'a CalendarEvent> {
    events
        .iter()
        .filter(|event| is_same_day(&event.date, &day))
        .collect()
}

/// Events on `day` ordered by start time, for the single-day view.
///
/// The sort is stable, so events starting at the same minute keep their
/// collection order.
pub fn agenda<'a>(events: &'a [CalendarEvent], day: NaiveDate) -> Vec<&'a CalendarEvent> {
    let mut day_events = events_on(events, day);
    day_events.sort_by(|a, b| a.start_time.cmp(&b.start_time));
    day_events
}

/// The events of one grid cell together with its total count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBucket<'a> {
    pub cell: CalendarCell,
    pub events: Vec<&'a CalendarEvent>,
}

impl<'a> DayBucket<'a> {
    pub fn total(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The events a month cell has room for.
    pub fn visible(&self) -> &[&'a CalendarEvent] {
        let end = self.events.len().min(MONTH_CELL_LIMIT);
        &self.events[..end]
    }

    /// How many events a month cell leaves out.
    pub fn overflow(&self) -> usize {
        self.total().saturating_sub(MONTH_CELL_LIMIT)
    }

    pub fn overflow_label(&self) -> Option<String> {
        match self.overflow() {
            0 => None,
            hidden => Some(format!("+{} more", hidden)),
        }
    }
}

/// One bucket per cell, in grid order.
pub fn bucket_grid<'a>(cells: &[CalendarCell], events: &'a [CalendarEvent]) -> Vec<DayBucket<'a>> {
    cells
        .iter()
        .map(|cell| DayBucket {
            cell: *cell,
            events: events_on(events, cell.date),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventDraft, DEFAULT_COLOR};
    use crate::grid::{month_grid, week_grid};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: &str, day: NaiveDate, start: &str) -> CalendarEvent {
        let mut draft = EventDraft::blank(day);
        draft.title = format!("event {}", id);
        draft.start_time = start.to_string();
        draft.color = DEFAULT_COLOR.to_string();
        CalendarEvent::from_draft(id, draft)
    }

    #[test]
    fn test_events_on_matches_by_date_only() {
        let events = vec![
            event("a", date(2024, 3, 15), "12:00"),
            event("b", date(2024, 3, 16), "08:00"),
            event("c", date(2024, 3, 15), "09:00"),
            event("d", date(2023, 3, 15), "09:00"),
        ];
        let ids: Vec<_> = events_on(&events, date(2024, 3, 15))
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn test_agenda_sorts_by_start_time() {
        let day = date(2024, 3, 15);
        let events = vec![
            event("lunch", day, "12:00"),
            event("standup", day, "09:00"),
            event("late", day, "23:30"),
            event("early", day, "00:15"),
        ];
        let order: Vec<_> = agenda(&events, day).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(order, ["early", "standup", "lunch", "late"]);
    }

    #[test]
    fn test_agenda_ties_keep_insertion_order() {
        let day = date(2024, 3, 15);
        let events = vec![
            event("first", day, "09:00"),
            event("second", day, "09:00"),
        ];
        let order: Vec<_> = agenda(&events, day).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(order, ["first", "second"]);
    }

    #[test]
    fn test_overflow_label_for_five_events() {
        let day = date(2024, 3, 15);
        let events: Vec<_> = (0..5)
            .map(|i| event(&i.to_string(), day, "10:00"))
            .collect();
        let cells = month_grid(day, day);
        let buckets = bucket_grid(&cells, &events);
        let bucket = buckets.iter().find(|b| b.cell.date == day).unwrap();

        assert_eq!(bucket.total(), 5);
        assert_eq!(bucket.visible().len(), 3);
        assert_eq!(bucket.visible()[0].id, "0");
        assert_eq!(bucket.overflow(), 2);
        assert_eq!(bucket.overflow_label().as_deref(), Some("+2 more"));
    }

    #[test]
    fn test_no_overflow_at_limit() {
        let day = date(2024, 3, 15);
        let events: Vec<_> = (0..3)
            .map(|i| event(&i.to_string(), day, "10:00"))
            .collect();
        let buckets = bucket_grid(&week_grid(day, day), &events);
        let bucket = buckets.iter().find(|b| b.cell.date == day).unwrap();
        assert_eq!(bucket.visible().len(), 3);
        assert_eq!(bucket.overflow_label(), None);
    }

    #[test]
    fn test_week_buckets_keep_insertion_order() {
        let day = date(2024, 3, 15);
        let events = vec![event("lunch", day, "12:00"), event("standup", day, "09:00")];
        let cells = week_grid(day, day);
        let buckets = bucket_grid(&cells, &events);

        let bucket = buckets.iter().find(|b| b.cell.date == day).unwrap();
        let ids: Vec<&str> = bucket.events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["lunch", "standup"]);
    }

    #[test]
    fn test_bucket_grid_covers_every_cell() {
        let day = date(2024, 3, 15);
        let events = vec![event("x", date(2024, 2, 26), "10:00")];
        let cells = month_grid(day, day);
        let buckets = bucket_grid(&cells, &events);

        assert_eq!(buckets.len(), cells.len());
        assert_eq!(buckets.iter().filter(|b| !b.is_empty()).count(), 1);
        // Leading cell from February still gets its event
        assert_eq!(buckets[1].events.len(), 1);
        assert!(!buckets[1].cell.is_current_period);
    }
}
