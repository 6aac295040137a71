use calendar_core::index::agenda;
use calendar_core::CalendarEvent;
use chrono::NaiveDate;
use yew::prelude::*;

use super::event_card::EventCard;

#[derive(Properties, PartialEq)]
pub struct DayViewProps {
    pub date: NaiveDate,
    pub events: Vec<CalendarEvent>,
    pub pending: Vec<String>,
    pub on_edit: Callback<String>,
    pub on_create: Callback<()>,
}

#[function_component(DayView)]
pub fn day_view(props: &DayViewProps) -> Html {
    let day_events = agenda(&props.events, props.date);
    let on_create = {
        let on_create = props.on_create.clone();
        Callback::from(move |_| on_create.emit(()))
    };

    html! {
        <div class="day-view">
            if day_events.is_empty() {
                <div class="empty-state">
                    <p>{ "No events scheduled for this day." }</p>
                    <button class="primary" onclick={on_create}>{ "Add event" }</button>
                </div>
            } else {
                <div class="agenda">
                    { for day_events.into_iter().map(|event| html! {
                        <EventCard
                            key={event.id.clone()}
                            event={event.clone()}
                            pending={props.pending.contains(&event.id)}
                            on_click={props.on_edit.clone()}
                        />
                    }) }
                </div>
            }
        </div>
    }
}
