use calendar_core::dates::format_weekday_short;
use calendar_core::index::bucket_grid;
use calendar_core::{CalendarCell, CalendarEvent};
use chrono::{Datelike, NaiveDate};
use yew::prelude::*;

use super::event_card::EventCard;

#[derive(Properties, PartialEq)]
pub struct WeekViewProps {
    pub cells: Vec<CalendarCell>,
    pub events: Vec<CalendarEvent>,
    pub pending: Vec<String>,
    pub on_select_day: Callback<NaiveDate>,
    pub on_edit: Callback<String>,
}

#[function_component(WeekView)]
pub fn week_view(props: &WeekViewProps) -> Html {
    html! {
        <div class="week-view">
            { for bucket_grid(&props.cells, &props.events).into_iter().map(|bucket| {
                let cell = bucket.cell;
                let date = cell.date;
                let on_select_day = props.on_select_day.clone();
                html! {
                    <div key={date.to_string()} class={classes!("week-column", cell.is_today.then_some("today"))}>
                        <button class="week-day-header" onclick={Callback::from(move |_| on_select_day.emit(date))}>
                            <span class="weekday-label">{ format_weekday_short(date) }</span>
                            <span class="day-number">{ date.day() }</span>
                        </button>
                        { for bucket.events.into_iter().map(|event| html! {
                            <EventCard
                                key={event.id.clone()}
                                event={event.clone()}
                                compact=true
                                pending={props.pending.contains(&event.id)}
                                on_click={props.on_edit.clone()}
                            />
                        }) }
                    </div>
                }
            }) }
        </div>
    }
}
