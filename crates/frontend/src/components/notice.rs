use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct NoticeProps {
    pub message: String,
    pub on_dismiss: Callback<()>,
}

#[function_component(Notice)]
pub fn notice(props: &NoticeProps) -> Html {
    let on_dismiss = props.on_dismiss.clone();

    html! {
        <div class="notice" role="alert">
            <span>{ &props.message }</span>
            <button class="link-btn" onclick={Callback::from(move |_| on_dismiss.emit(()))}>{ "Dismiss" }</button>
        </div>
    }
}
