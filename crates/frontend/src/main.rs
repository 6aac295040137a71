mod components;
mod services;
mod store;

use calendar_core::collection::MutationId;
use calendar_core::event::sample_events;
use calendar_core::{dates, Action, Direction, EventDraft, Modal, StoreAck, StoreCommand, ViewMode};
use chrono::NaiveDate;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use components::day_view::DayView;
use components::event_modal::EventModal;
use components::header::Header;
use components::month_view::MonthView;
use components::notice::Notice;
use components::sign_in::SignInPanel;
use components::week_view::WeekView;
use services::api::ApiService;
use store::CalendarStore;

#[function_component(App)]
fn app() -> Html {
    let store = use_reducer(|| CalendarStore::new(dates::today()));
    let token = use_state(ApiService::stored_token);
    let account = use_state(|| None::<String>);

    // Load the account and its events whenever the session changes
    {
        let dispatcher = store.dispatcher();
        let token_handle = token.clone();
        let account = account.clone();
        use_effect_with((*token).clone(), move |token| {
            if let Some(token) = token.clone() {
                spawn_local(async move {
                    match ApiService::me(&token).await {
                        Ok(me) => account.set(Some(me.username)),
                        Err(e) => {
                            tracing::warn!("Stored session rejected: {}", e);
                            ApiService::clear_token();
                            token_handle.set(None);
                            return;
                        }
                    }

                    match ApiService::list_events(&token).await {
                        Ok(events) => dispatcher.dispatch(Action::ReplaceEvents(events)),
                        Err(e) => tracing::warn!("Failed to load events: {}", e),
                    }
                });
            }
            || ()
        });
    }

    // Hand every ready mutation to the store client and settle it with the answer
    let ready: Vec<(MutationId, StoreCommand)> = store
        .events
        .ready()
        .into_iter()
        .map(|pending| (pending.id, pending.command.clone()))
        .collect();
    {
        let dispatcher = store.dispatcher();
        let token = (*token).clone();
        use_effect_with(ready, move |ready| {
            for (mutation, command) in ready.iter().cloned() {
                dispatcher.dispatch(Action::MarkDispatched(mutation));
                let dispatcher = dispatcher.clone();
                let token = token.clone();
                spawn_local(async move {
                    let outcome = match token {
                        Some(token) => ApiService::execute(&token, command).await,
                        // Signed out: the local collection is the only copy
                        None => Ok(StoreAck::Accepted),
                    };
                    dispatcher.dispatch(Action::Settle(mutation, outcome));
                });
            }
            || ()
        });
    }

    let on_signed_in = {
        let token = token.clone();
        Callback::from(move |new_token: String| {
            ApiService::store_token(&new_token);
            token.set(Some(new_token));
        })
    };

    let on_sign_out = {
        let token = token.clone();
        let account = account.clone();
        let dispatcher = store.dispatcher();
        Callback::from(move |_| {
            ApiService::clear_token();
            token.set(None);
            account.set(None);
            dispatcher.dispatch(Action::ReplaceEvents(sample_events(dates::today())));
            spawn_local(async {
                if let Err(e) = ApiService::signout().await {
                    tracing::warn!("Sign out failed: {}", e);
                }
            });
        })
    };

    let send = |make: fn() -> Action| {
        let dispatcher = store.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(make()))
    };
    let on_today = send(|| Action::Today(dates::today()));
    let on_toggle_menu = send(|| Action::ToggleMenu);
    let on_create = send(|| Action::OpenCreate);
    let on_close = send(|| Action::CloseModal);
    let on_dismiss = send(|| Action::DismissNotice);

    let on_navigate = {
        let dispatcher = store.dispatcher();
        Callback::from(move |direction: Direction| dispatcher.dispatch(Action::Navigate(direction)))
    };
    let on_view_mode = {
        let dispatcher = store.dispatcher();
        Callback::from(move |mode: ViewMode| dispatcher.dispatch(Action::SetViewMode(mode)))
    };
    let on_select_day = {
        let dispatcher = store.dispatcher();
        Callback::from(move |day: NaiveDate| dispatcher.dispatch(Action::SelectDay(day)))
    };
    let on_edit = {
        let dispatcher = store.dispatcher();
        Callback::from(move |id: String| dispatcher.dispatch(Action::OpenEdit(id)))
    };
    let on_save = {
        let dispatcher = store.dispatcher();
        Callback::from(move |draft: EventDraft| dispatcher.dispatch(Action::Save(draft)))
    };
    let on_delete = {
        let dispatcher = store.dispatcher();
        Callback::from(move |id: String| dispatcher.dispatch(Action::Delete(id)))
    };

    let today = dates::today();
    let cells = store.cells(today);
    let events = store.events.events().to_vec();
    let pending: Vec<String> = events
        .iter()
        .filter(|event| store.events.is_pending(&event.id))
        .map(|event| event.id.clone())
        .collect();

    let editing_id = match &store.modal {
        Modal::Edit { id } => Some(id.clone()),
        _ => None,
    };

    html! {
        <div class="app">
            <Header
                title={store.title()}
                view_mode={store.view_mode}
                menu_open={store.menu_open}
                account={(*account).clone()}
                {on_navigate}
                {on_today}
                {on_view_mode}
                {on_toggle_menu}
                on_create={on_create.clone()}
                {on_sign_out}
            />
            if token.is_none() {
                <SignInPanel {on_signed_in} />
            }
            if let Some(message) = &store.notice {
                <Notice message={message.clone()} {on_dismiss} />
            }
            <main>
                {match store.view_mode {
                    ViewMode::Month => html! {
                        <MonthView {cells} {events} {pending} {on_select_day} {on_edit} />
                    },
                    ViewMode::Week => html! {
                        <WeekView {cells} {events} {pending} {on_select_day} {on_edit} />
                    },
                    ViewMode::Day => html! {
                        <DayView date={store.anchor} {events} {pending} {on_edit} {on_create} />
                    },
                }}
            </main>
            if store.modal != Modal::Closed {
                <EventModal
                    draft={store.form_draft()}
                    {editing_id}
                    {on_save}
                    {on_delete}
                    {on_close}
                />
            }
        </div>
    }
}

fn main() {
    tracing_wasm::set_as_global_default();

    yew::Renderer::<App>::new().render();
}
