use anyhow::{bail, Context};
use calendar_core::{
    api::{
        CreatedResponse, CredentialsRequest, ErrorResponse, EventPayload, MessageResponse,
        SigninResponse, StoredEvent,
    },
    dates::{self, WEEKDAY_LABELS},
    grid::{self, ViewMode},
    index::{self, bucket_grid},
    CalendarEvent, EventDraft,
};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::fmt::Write as _;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "calendar-cli")]
#[command(about = "CLI for managing calendar events via the backend API")]
#[command(
    long_about = "A command-line interface for the calendar backend.\n\n\
    Create an account, sign in, manage events, and print month, week or day\n\
    views of your calendar in the terminal."
)]
struct Cli {
    /// Backend server URL to connect to.
    #[arg(
        short,
        long,
        default_value = "http://localhost:3000",
        env = "CALENDAR_API_URL"
    )]
    base_url: String,

    /// Token printed by `signin`. Required for event commands.
    #[arg(short, long, env = "CALENDAR_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Signup { username: String, password: String },

    /// Sign in and print a token
    ///
    /// Export the token as CALENDAR_TOKEN (or pass --token) for the event
    /// commands.
    Signin { username: String, password: String },

    /// Manage events - list, create, update, delete
    Events {
        #[command(subcommand)]
        action: EventAction,
    },

    /// Print a month, week or day view with your events
    Show {
        #[arg(short, long, default_value = "month", value_parser = parse_view)]
        view: ViewMode,

        /// Any day inside the period to show. Defaults to today.
        #[arg(short, long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
    },
}

#[derive(Subcommand)]
enum EventAction {
    /// List all your events ordered by start
    List,

    /// Create an event
    Create {
        title: String,

        /// Day of the event. Defaults to today.
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,

        #[arg(long, default_value = "09:00", value_name = "HH:MM")]
        start: String,

        #[arg(long, default_value = "10:00", value_name = "HH:MM")]
        end: String,

        #[arg(short, long, value_name = "TEXT")]
        description: Option<String>,

        #[arg(short, long, value_name = "TEXT")]
        location: Option<String>,

        /// Hex colour such as #10B981
        #[arg(short, long, value_name = "HEX")]
        color: Option<String>,
    },

    /// Update an event. Fields not given keep their current value.
    Update {
        id: Uuid,

        #[arg(short, long, value_name = "TEXT")]
        title: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,

        #[arg(long, value_name = "HH:MM")]
        start: Option<String>,

        #[arg(long, value_name = "HH:MM")]
        end: Option<String>,

        /// New description. Use "" to clear it.
        #[arg(short, long, value_name = "TEXT")]
        description: Option<String>,

        /// New location. Use "" to clear it.
        #[arg(short, long, value_name = "TEXT")]
        location: Option<String>,

        #[arg(short, long, value_name = "HEX")]
        color: Option<String>,
    },

    /// Delete an event
    Delete { id: Uuid },
}

fn parse_view(s: &str) -> Result<ViewMode, String> {
    ViewMode::from_str(s).ok_or_else(|| format!("unknown view '{}' (month, week or day)", s))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let api = ApiClient {
        client: Client::new(),
        base_url: format!("{}/api/v1", cli.base_url.trim_end_matches('/')),
        token: cli.token,
    };

    match cli.command {
        Commands::Signup { username, password } => {
            let msg: MessageResponse = api
                .send(api.post("/signup", false)?.json(&CredentialsRequest { username, password }))
                .await?;
            println!("{}", msg.message);
        }
        Commands::Signin { username, password } => {
            let res: SigninResponse = api
                .send(api.post("/signin", false)?.json(&CredentialsRequest { username, password }))
                .await?;
            println!("{}", res.message);
            println!("export CALENDAR_TOKEN={}", res.token);
        }
        Commands::Events { action } => handle_events(&api, action).await?,
        Commands::Show { view, date } => {
            let events = api.list_events().await?;
            let anchor = date.unwrap_or_else(dates::today);
            print!("{}", render_view(view, anchor, dates::today(), &events));
        }
    }

    Ok(())
}

struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    fn request(&self, builder: RequestBuilder, auth: bool) -> anyhow::Result<RequestBuilder> {
        if !auth {
            return Ok(builder);
        }
        match &self.token {
            Some(token) => Ok(builder.bearer_auth(token)),
            None => bail!("No token. Run `calendar-cli signin` and set CALENDAR_TOKEN"),
        }
    }

    fn get(&self, path: &str) -> anyhow::Result<RequestBuilder> {
        self.request(self.client.get(format!("{}{}", self.base_url, path)), true)
    }

    fn post(&self, path: &str, auth: bool) -> anyhow::Result<RequestBuilder> {
        self.request(self.client.post(format!("{}{}", self.base_url, path)), auth)
    }

    fn put(&self, path: &str) -> anyhow::Result<RequestBuilder> {
        self.request(self.client.put(format!("{}{}", self.base_url, path)), true)
    }

    fn delete(&self, path: &str) -> anyhow::Result<RequestBuilder> {
        self.request(self.client.delete(format!("{}{}", self.base_url, path)), true)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> anyhow::Result<T> {
        let response = request.send().await.context("Failed to reach the server")?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn list_events(&self) -> anyhow::Result<Vec<CalendarEvent>> {
        let stored: Vec<StoredEvent> = self.send(self.get("/event")?).await?;
        Ok(stored.into_iter().map(Into::into).collect())
    }
}

async fn check_status(response: Response) -> anyhow::Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(err) => bail!("{} ({})", err.error, status),
        Err(_) => bail!("Request failed with {}", status),
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

async fn handle_events(api: &ApiClient, action: EventAction) -> anyhow::Result<()> {
    match action {
        EventAction::List => {
            let events = api.list_events().await?;
            if events.is_empty() {
                println!("No events found.");
            }
            for event in events {
                println!("{}", event_line(&event, true));
            }
        }
        EventAction::Create {
            title,
            date,
            start,
            end,
            description,
            location,
            color,
        } => {
            let mut draft = EventDraft::blank(date.unwrap_or_else(dates::today));
            draft.title = title;
            draft.start_time = start;
            draft.end_time = end;
            draft.description = description;
            draft.location = location;
            if let Some(color) = color {
                draft.color = color;
            }
            if !draft.has_title() {
                bail!("Title cannot be empty");
            }

            let payload = EventPayload::from_draft(&draft)?;
            let created: CreatedResponse = api.send(api.post("/event", true)?.json(&payload)).await?;
            println!("{}: [{}] {}", created.message, short_id(&created.id.to_string()), draft.title);
        }
        EventAction::Update {
            id,
            title,
            date,
            start,
            end,
            description,
            location,
            color,
        } => {
            let events = api.list_events().await?;
            let id_str = id.to_string();
            let current = events
                .iter()
                .find(|event| event.id == id_str)
                .with_context(|| format!("Event {} not found", id))?;

            let mut draft = current.to_draft();
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(date) = date {
                draft.date = date;
            }
            if let Some(start) = start {
                draft.start_time = start;
            }
            if let Some(end) = end {
                draft.end_time = end;
            }
            if let Some(description) = description {
                draft.description = non_empty(description);
            }
            if let Some(location) = location {
                draft.location = non_empty(location);
            }
            if let Some(color) = color {
                draft.color = color;
            }
            if !draft.has_title() {
                bail!("Title cannot be empty");
            }

            let payload = EventPayload::from_draft(&draft)?;
            let msg: MessageResponse = api
                .send(api.put(&format!("/event/{}", id))?.json(&payload))
                .await?;
            println!("{}: [{}] {}", msg.message, short_id(&id_str), draft.title);
        }
        EventAction::Delete { id } => {
            let msg: MessageResponse = api.send(api.delete(&format!("/event/{}", id))?).await?;
            println!("{}: {}", msg.message, id);
        }
    }

    Ok(())
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn event_line(event: &CalendarEvent, with_date: bool) -> String {
    let mut line = String::new();
    if with_date {
        let _ = write!(line, "{} ", event.date);
    }
    let _ = write!(
        line,
        "{}-{} [{}] {}",
        event.start_time,
        event.end_time,
        short_id(&event.id),
        event.title
    );
    if let Some(location) = &event.location {
        let _ = write!(line, " @ {}", location);
    }
    line
}

/// Render one view as plain text.
fn render_view(mode: ViewMode, anchor: NaiveDate, today: NaiveDate, events: &[CalendarEvent]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", dates::header_title(anchor, mode));
    let _ = writeln!(out);

    match mode {
        ViewMode::Month => {
            let cells = grid::month_grid(anchor, today);
            let buckets = bucket_grid(&cells, events);

            let _ = writeln!(out, "{}", WEEKDAY_LABELS.map(|l| format!("{:>5}", l)).join(""));
            for week in buckets.chunks(7) {
                for bucket in week {
                    let day = bucket.cell.date.day();
                    let cell = match (bucket.cell.is_current_period, bucket.cell.is_today) {
                        (_, true) => format!("[{:>2}]", day),
                        (true, false) => format!(" {:>2} ", day),
                        (false, false) => "  . ".to_string(),
                    };
                    let marker = if bucket.is_empty() { ' ' } else { '*' };
                    let _ = write!(out, "{}{}", cell, marker);
                }
                let _ = writeln!(out);
            }

            for bucket in buckets.iter().filter(|b| b.cell.is_current_period && !b.is_empty()) {
                let _ = writeln!(out);
                let _ = writeln!(out, "{}", dates::format_long(bucket.cell.date));
                for event in bucket.visible() {
                    let _ = writeln!(out, "  {}", event_line(event, false));
                }
                if let Some(more) = bucket.overflow_label() {
                    let _ = writeln!(out, "  {}", more);
                }
            }
        }
        ViewMode::Week => {
            for cell in grid::week_grid(anchor, today) {
                let marker = if cell.is_today { " (today)" } else { "" };
                let _ = writeln!(
                    out,
                    "{} {}{}",
                    dates::format_weekday_short(cell.date),
                    cell.date.day(),
                    marker
                );
                for event in index::events_on(events, cell.date) {
                    let _ = writeln!(out, "  {}", event_line(event, false));
                }
            }
        }
        ViewMode::Day => {
            let day_events = index::agenda(events, anchor);
            if day_events.is_empty() {
                let _ = writeln!(out, "No events scheduled.");
            }
            for event in day_events {
                let _ = writeln!(out, "{}", event_line(event, false));
                if let Some(description) = &event.description {
                    let _ = writeln!(out, "    {}", description);
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: &str, title: &str, day: NaiveDate, start: &str) -> CalendarEvent {
        let mut draft = EventDraft::blank(day);
        draft.title = title.to_string();
        draft.start_time = start.to_string();
        CalendarEvent::from_draft(id, draft)
    }

    #[test]
    fn test_month_view_caps_cells() {
        let day = date(2024, 3, 15);
        let events: Vec<_> = (0..5)
            .map(|i| event(&format!("e{}", i), &format!("Event {}", i), day, "09:00"))
            .collect();

        let out = render_view(ViewMode::Month, day, day, &events);
        assert!(out.starts_with("March 2024"));
        assert!(out.contains("[15]*"));
        assert!(out.contains("Friday, March 15, 2024"));
        assert!(out.contains("Event 2"));
        assert!(!out.contains("Event 3"));
        assert!(out.contains("+2 more"));
    }

    #[test]
    fn test_day_view_is_sorted() {
        let day = date(2024, 3, 15);
        let events = vec![
            event("lunch", "Lunch", day, "12:00"),
            event("standup", "Standup", day, "09:00"),
        ];

        let out = render_view(ViewMode::Day, day, day, &events);
        let standup = out.find("Standup").unwrap();
        let lunch = out.find("Lunch").unwrap();
        assert!(standup < lunch);
    }

    #[test]
    fn test_week_view_lists_seven_days() {
        let day = date(2024, 3, 15);
        let out = render_view(ViewMode::Week, day, day, &[]);
        assert!(out.contains("Sun 10"));
        assert!(out.contains("Fri 15 (today)"));
        assert!(out.contains("Sat 16"));
    }

    #[test]
    fn test_week_view_keeps_insertion_order() {
        let day = date(2024, 3, 15);
        let events = vec![
            event("lunch", "Lunch", day, "12:00"),
            event("standup", "Standup", day, "09:00"),
        ];

        let out = render_view(ViewMode::Week, day, day, &events);
        assert!(out.find("Lunch").unwrap() < out.find("Standup").unwrap());
    }

    #[test]
    fn test_parse_view() {
        assert_eq!(parse_view("week").unwrap(), ViewMode::Week);
        assert!(parse_view("year").is_err());
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("1"), "1");
        assert_eq!(short_id("0123456789"), "01234567");
    }
}
