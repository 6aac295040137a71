use calendar_core::CalendarEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct EventCardProps {
    pub event: CalendarEvent,
    /// One-line chip for month and week cells.
    #[prop_or_default]
    pub compact: bool,
    /// The store has not confirmed the latest change yet.
    #[prop_or_default]
    pub pending: bool,
    pub on_click: Callback<String>,
}

#[function_component(EventCard)]
pub fn event_card(props: &EventCardProps) -> Html {
    let event = &props.event;
    let onclick = {
        let on_click = props.on_click.clone();
        let id = event.id.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_click.emit(id.clone());
        })
    };

    let class = classes!(
        "event-card",
        props.compact.then_some("compact"),
        props.pending.then_some("pending")
    );

    if props.compact {
        return html! {
            <div {class} {onclick} title={event.title.clone()} style={format!("background-color: {}", event.color)}>
                <span class="event-time">{ &event.start_time }</span>
                { " " }
                <span class="event-title">{ &event.title }</span>
            </div>
        };
    }

    html! {
        <div {class} {onclick} style={format!("border-left-color: {}", event.color)}>
            <div class="event-title">{ &event.title }</div>
            <div class="event-time">{ time_range(event) }</div>
            if let Some(location) = &event.location {
                <div class="event-location">{ location }</div>
            }
            if let Some(description) = &event.description {
                <div class="event-description">{ description }</div>
            }
            if props.pending {
                <div class="event-pending">{ "Saving..." }</div>
            }
        </div>
    }
}

pub fn time_range(event: &CalendarEvent) -> String {
    format!("{} - {}", event.start_time, event.end_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calendar_core::event::sample_events;
    use chrono::NaiveDate;

    #[test]
    fn test_time_range() {
        let events = sample_events(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(time_range(&events[0]), "09:00 - 10:00");
        assert_eq!(time_range(&events[1]), "12:00 - 13:30");
    }
}
