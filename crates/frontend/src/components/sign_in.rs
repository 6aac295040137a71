use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::api::ApiService;

#[derive(Properties, PartialEq)]
pub struct SignInProps {
    /// Receives the session token.
    pub on_signed_in: Callback<String>,
}

#[derive(Clone, Copy, PartialEq)]
enum Mode {
    SignIn,
    SignUp,
}

/// Account panel shown while no session token is stored. Events created
/// before signing in stay local to this tab.
#[function_component(SignInPanel)]
pub fn sign_in_panel(props: &SignInProps) -> Html {
    let username = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);

    let bind = |handle: &UseStateHandle<String>| {
        let handle = handle.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            handle.set(input.value());
        })
    };

    let submit = |mode: Mode| {
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        let busy = busy.clone();
        let on_signed_in = props.on_signed_in.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            let name = username.trim().to_string();
            let pass = (*password).clone();
            if name.is_empty() || pass.is_empty() {
                error.set(Some("Enter a username and password".to_string()));
                return;
            }

            let error = error.clone();
            let busy = busy.clone();
            let on_signed_in = on_signed_in.clone();
            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let result = async {
                    if mode == Mode::SignUp {
                        ApiService::signup(&name, &pass).await?;
                    }
                    ApiService::signin(&name, &pass).await
                }
                .await;

                busy.set(false);
                match result {
                    Ok(token) => {
                        error.set(None);
                        on_signed_in.emit(token);
                    }
                    Err(e) => error.set(Some(e)),
                }
            });
        })
    };

    html! {
        <form class="sign-in">
            <span class="sign-in-hint">{ "Sign in to keep your events" }</span>
            <input
                type="text"
                placeholder="Username"
                value={(*username).clone()}
                oninput={bind(&username)}
            />
            <input
                type="password"
                placeholder="Password"
                value={(*password).clone()}
                oninput={bind(&password)}
            />
            <button type="submit" class="primary" disabled={*busy} onclick={submit(Mode::SignIn)}>
                { "Sign in" }
            </button>
            <button type="button" disabled={*busy} onclick={submit(Mode::SignUp)}>
                { "Sign up" }
            </button>
            if let Some(message) = &*error {
                <span class="error">{ message }</span>
            }
        </form>
    }
}
