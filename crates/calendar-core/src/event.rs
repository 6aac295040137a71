use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Colors offered by the event form.
pub const PALETTE: [&str; 6] = [
    "#3B82F6", "#EF4444", "#10B981", "#F59E0B", "#8B5CF6", "#EC4899",
];

pub const DEFAULT_COLOR: &str = "#3B82F6";

/// A single calendar entry as held by the client.
///
/// `start_time` and `end_time` are zero-padded 24-hour `"HH:MM"` strings, so
/// plain string comparison orders them chronologically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub location: Option<String>,
    pub color: String,
}

impl CalendarEvent {
    pub fn from_draft(id: impl Into<String>, draft: EventDraft) -> Self {
        CalendarEvent {
            id: id.into(),
            title: draft.title,
            description: draft.description,
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            location: draft.location,
            color: draft.color,
        }
    }

    /// Copy every field except `id` out of the event.
    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            date: self.date,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            location: self.location.clone(),
            color: self.color.clone(),
        }
    }

    /// Replace every field except `id`.
    pub fn apply(&mut self, draft: EventDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.date = draft.date;
        self.start_time = draft.start_time;
        self.end_time = draft.end_time;
        self.location = draft.location;
        self.color = draft.color;
    }
}

/// Form contents for creating or editing an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub location: Option<String>,
    pub color: String,
}

impl EventDraft {
    /// Blank form for a new event on `date`.
    pub fn blank(date: NaiveDate) -> Self {
        EventDraft {
            title: String::new(),
            description: None,
            date,
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            location: None,
            color: DEFAULT_COLOR.to_string(),
        }
    }

    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// The two events a fresh session starts with.
pub fn sample_events(today: NaiveDate) -> Vec<CalendarEvent> {
    vec![
        CalendarEvent {
            id: "1".to_string(),
            title: "Team Meeting".to_string(),
            description: Some("Weekly team sync to discuss project progress".to_string()),
            date: today,
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            location: Some("Conference Room A".to_string()),
            color: "#3B82F6".to_string(),
        },
        CalendarEvent {
            id: "2".to_string(),
            title: "Lunch with Client".to_string(),
            description: None,
            date: today + Duration::days(1),
            start_time: "12:00".to_string(),
            end_time: "13:30".to_string(),
            location: Some("Downtown Restaurant".to_string()),
            color: "#10B981".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_blank_draft_defaults() {
        let draft = EventDraft::blank(date(2024, 3, 15));
        assert_eq!(draft.start_time, "09:00");
        assert_eq!(draft.end_time, "10:00");
        assert_eq!(draft.color, DEFAULT_COLOR);
        assert!(!draft.has_title());
    }

    #[test]
    fn test_whitespace_title_is_not_a_title() {
        let mut draft = EventDraft::blank(date(2024, 3, 15));
        draft.title = "   \t".to_string();
        assert!(!draft.has_title());
        draft.title = " Standup ".to_string();
        assert!(draft.has_title());
    }

    #[test]
    fn test_apply_keeps_id() {
        let mut event = sample_events(date(2024, 3, 15)).remove(0);
        let mut draft = event.to_draft();
        draft.title = "Retro".to_string();
        draft.date = date(2024, 3, 20);
        event.apply(draft);

        assert_eq!(event.id, "1");
        assert_eq!(event.title, "Retro");
        assert_eq!(event.date, date(2024, 3, 20));
    }

    #[test]
    fn test_samples_are_today_and_tomorrow() {
        let samples = sample_events(date(2024, 2, 29));
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].date, date(2024, 2, 29));
        assert_eq!(samples[1].date, date(2024, 3, 1));
    }

    #[test]
    fn test_event_serializes_camel_case() {
        let event = sample_events(date(2024, 3, 15)).remove(1);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["startTime"], "12:00");
        assert_eq!(json["date"], "2024-03-16");
    }
}
