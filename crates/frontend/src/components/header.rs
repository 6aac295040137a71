use calendar_core::{Direction, ViewMode};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub title: String,
    pub view_mode: ViewMode,
    pub menu_open: bool,
    /// Signed-in username, if any.
    pub account: Option<String>,
    pub on_navigate: Callback<Direction>,
    pub on_today: Callback<()>,
    pub on_view_mode: Callback<ViewMode>,
    pub on_toggle_menu: Callback<()>,
    pub on_create: Callback<()>,
    pub on_sign_out: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let emit = |callback: &Callback<()>| {
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| callback.emit(()))
    };
    let navigate = |direction: Direction| {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_: MouseEvent| on_navigate.emit(direction))
    };

    html! {
        <header class="header">
            <div class="header-nav">
                <button class="icon-btn" onclick={navigate(Direction::Prev)} aria-label="Previous">{ "‹" }</button>
                <button class="today-btn" onclick={emit(&props.on_today)}>{ "Today" }</button>
                <button class="icon-btn" onclick={navigate(Direction::Next)} aria-label="Next">{ "›" }</button>
                <h1 class="header-title">{ &props.title }</h1>
            </div>
            <div class="header-actions">
                <div class="view-menu">
                    <button class="view-menu-toggle" onclick={emit(&props.on_toggle_menu)}>
                        { props.view_mode.label() }
                    </button>
                    if props.menu_open {
                        <ul class="view-menu-list">
                            { for ViewMode::ALL.iter().map(|mode| {
                                let mode = *mode;
                                let on_view_mode = props.on_view_mode.clone();
                                html! {
                                    <li
                                        class={classes!("view-menu-item", (mode == props.view_mode).then_some("active"))}
                                        onclick={Callback::from(move |_| on_view_mode.emit(mode))}
                                    >
                                        { mode.label() }
                                    </li>
                                }
                            }) }
                        </ul>
                    }
                </div>
                <button class="primary" onclick={emit(&props.on_create)}>{ "New event" }</button>
                if let Some(username) = &props.account {
                    <span class="account">{ username }</span>
                    <button class="link-btn" onclick={emit(&props.on_sign_out)}>{ "Sign out" }</button>
                }
            </div>
        </header>
    }
}
