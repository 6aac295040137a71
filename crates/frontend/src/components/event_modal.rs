use calendar_core::{EventDraft, PALETTE};
use chrono::NaiveDate;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct EventModalProps {
    pub draft: EventDraft,
    /// Set when editing an existing event.
    pub editing_id: Option<String>,
    pub on_save: Callback<EventDraft>,
    pub on_delete: Callback<String>,
    pub on_close: Callback<()>,
}

#[function_component(EventModal)]
pub fn event_modal(props: &EventModalProps) -> Html {
    let draft = use_state(|| props.draft.clone());

    let edit_input = |apply: fn(&mut EventDraft, String)| {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            apply(&mut next, input.value());
            draft.set(next);
        })
    };

    let on_title = edit_input(|d, v| d.title = v);
    let on_date = edit_input(|d, v| {
        if let Some(date) = parse_date_input(&v) {
            d.date = date;
        }
    });
    let on_start = edit_input(|d, v| d.start_time = v);
    let on_end = edit_input(|d, v| d.end_time = v);
    let on_location = edit_input(|d, v| d.location = optional(v));

    let on_description = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.description = optional(input.value());
            draft.set(next);
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let on_save = props.on_save.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Some(draft) = submission(&draft) {
                on_save.emit(draft);
            }
        })
    };

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let delete = props.editing_id.clone().map(|id| {
        let on_delete = props.on_delete.clone();
        Callback::from(move |_: MouseEvent| on_delete.emit(id.clone()))
    });

    let heading = if props.editing_id.is_some() {
        "Edit event"
    } else {
        "New event"
    };

    html! {
        <div class="modal-backdrop">
            <form class="modal" onsubmit={on_submit}>
                <h2>{ heading }</h2>
                <label>
                    { "Title" }
                    <input type="text" value={draft.title.clone()} oninput={on_title} placeholder="Add title" />
                </label>
                <label>
                    { "Date" }
                    <input type="date" value={draft.date.format("%Y-%m-%d").to_string()} oninput={on_date} />
                </label>
                <div class="time-row">
                    <label>
                        { "Start" }
                        <input type="time" value={draft.start_time.clone()} oninput={on_start} />
                    </label>
                    <label>
                        { "End" }
                        <input type="time" value={draft.end_time.clone()} oninput={on_end} />
                    </label>
                </div>
                <label>
                    { "Location" }
                    <input type="text" value={draft.location.clone().unwrap_or_default()} oninput={on_location} />
                </label>
                <label>
                    { "Description" }
                    <textarea value={draft.description.clone().unwrap_or_default()} oninput={on_description} />
                </label>
                <div class="palette">
                    { for PALETTE.iter().map(|color| {
                        let draft = draft.clone();
                        let color = color.to_string();
                        let selected = draft.color == color;
                        let pick = {
                            let color = color.clone();
                            Callback::from(move |_: MouseEvent| {
                                let mut next = (*draft).clone();
                                next.color = color.clone();
                                draft.set(next);
                            })
                        };
                        html! {
                            <button
                                type="button"
                                class={classes!("swatch", selected.then_some("selected"))}
                                style={format!("background-color: {}", color)}
                                aria-label={color.clone()}
                                onclick={pick}
                            />
                        }
                    }) }
                </div>
                <div class="modal-actions">
                    if let Some(delete) = delete {
                        <button type="button" class="danger" onclick={delete}>{ "Delete" }</button>
                    }
                    <button type="button" onclick={close}>{ "Cancel" }</button>
                    <button type="submit" class="primary">{ "Save" }</button>
                </div>
            </form>
        </div>
    }
}

/// The draft to save, or nothing for a blank title. The modal stays open
/// without a message.
fn submission(draft: &EventDraft) -> Option<EventDraft> {
    draft.has_title().then(|| draft.clone())
}

fn optional(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}
