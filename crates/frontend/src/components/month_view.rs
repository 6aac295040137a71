use calendar_core::dates::WEEKDAY_LABELS;
use calendar_core::index::bucket_grid;
use calendar_core::{CalendarCell, CalendarEvent};
use chrono::{Datelike, NaiveDate};
use yew::prelude::*;

use super::event_card::EventCard;

#[derive(Properties, PartialEq)]
pub struct MonthViewProps {
    pub cells: Vec<CalendarCell>,
    pub events: Vec<CalendarEvent>,
    /// Ids of events with unconfirmed changes.
    pub pending: Vec<String>,
    pub on_select_day: Callback<NaiveDate>,
    pub on_edit: Callback<String>,
}

#[function_component(MonthView)]
pub fn month_view(props: &MonthViewProps) -> Html {
    let buckets = bucket_grid(&props.cells, &props.events);

    html! {
        <div class="month-view">
            <div class="weekday-row">
                { for WEEKDAY_LABELS.iter().map(|label| html! { <div class="weekday-label">{ *label }</div> }) }
            </div>
            <div class="month-grid">
                { for buckets.iter().map(|bucket| {
                    let date = bucket.cell.date;
                    let on_select_day = props.on_select_day.clone();
                    html! {
                        <div
                            key={date.to_string()}
                            class={cell_class(&bucket.cell)}
                            onclick={Callback::from(move |_| on_select_day.emit(date))}
                        >
                            <div class="day-number">{ date.day() }</div>
                            { for bucket.visible().iter().map(|event| html! {
                                <EventCard
                                    key={event.id.clone()}
                                    event={(*event).clone()}
                                    compact=true
                                    pending={props.pending.contains(&event.id)}
                                    on_click={props.on_edit.clone()}
                                />
                            }) }
                            if let Some(more) = bucket.overflow_label() {
                                <div class="more-events">{ more }</div>
                            }
                        </div>
                    }
                }) }
            </div>
        </div>
    }
}

pub fn cell_class(cell: &CalendarCell) -> String {
    let mut class = String::from("month-cell");
    if !cell.is_current_period {
        class.push_str(" outside");
    }
    if cell.is_today {
        class.push_str(" today");
    }
    class
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_class() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let cell = |is_current_period, is_today| CalendarCell {
            date,
            is_current_period,
            is_today,
        };

        assert_eq!(cell_class(&cell(true, false)), "month-cell");
        assert_eq!(cell_class(&cell(false, false)), "month-cell outside");
        assert_eq!(cell_class(&cell(true, true)), "month-cell today");
    }
}
