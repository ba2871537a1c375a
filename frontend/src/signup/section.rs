use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_router::prelude::*;

use super::analytics;
use super::form::{FormPhase, SignupForm};
use super::submit;
use crate::config;
use crate::effects::nav::scroll_to_element;
use crate::effects::reveal::{self, use_reveal};
use crate::markup;
use crate::Route;

const USECASES: &[(&str, &str)] = &[
    ("focus", "Deep focus & work"),
    ("sleep", "Sleep & relaxation"),
    ("meditation", "Meditation"),
    ("creative", "Creative flow"),
    ("other", "Something else"),
];

const STEPS: &[(&str, &str)] = &[
    ("Sign up", "Leave your name and email below."),
    ("Join the testers group", "We send you an invite to the Android testing group."),
    ("Install from Play Store", "Accept the invite and install the beta build."),
    ("Tell us how it feels", "Share feedback straight from the app."),
];

#[function_component(BetaSignup)]
pub fn beta_signup() -> Html {
    use_reveal(reveal::BETA_STEPS);

    let form = use_state(SignupForm::default);
    let phase = use_state(|| FormPhase::Idle);

    // Bring the confirmation into view once it's rendered.
    {
        let succeeded = phase.show_success();
        use_effect_with_deps(
            move |succeeded| {
                if *succeeded {
                    if let Some(el) = web_sys::window()
                        .and_then(|w| w.document())
                        .and_then(|d| d.get_element_by_id(markup::SIGNUP_SUCCESS_ID))
                    {
                        scroll_to_element(&el);
                    }
                }
                || ()
            },
            succeeded,
        );
    }

    let on_name = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(SignupForm { name: input.value(), ..(*form).clone() });
        })
    };
    let on_email = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(SignupForm { email: input.value(), ..(*form).clone() });
        })
    };
    let on_usecase = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            form.set(SignupForm { usecase: select.value(), ..(*form).clone() });
        })
    };
    let on_consent = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(SignupForm { consent: input.checked(), ..(*form).clone() });
        })
    };

    let onsubmit = {
        let form = form.clone();
        let phase = phase.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let (next, payload) = phase.on_submit(&form);
            phase.set(next);
            let Some(signup) = payload else {
                return;
            };
            let form = form.clone();
            let phase = phase.clone();
            spawn_local(async move {
                let result = submit::submit(&signup, config::transport()).await;
                let (next, values) = FormPhase::on_sent(&result, (*form).clone());
                if result.is_ok() {
                    analytics::track_signup(&signup.usecase);
                }
                form.set(values);
                phase.set(next);
            });
        })
    };

    let submitting = phase.submit_disabled();
    let errors = phase.error_messages();

    html! {
        <section id="beta" class="st-beta">
            <h2>{"Join the Android beta"}</h2>
            <div class="st-steps">
                { for STEPS.iter().enumerate().map(|(i, (title, text))| html! {
                    <div class="st-step-card">
                        <span class="st-step-number">{i + 1}</span>
                        <h3>{*title}</h3>
                        <p>{*text}</p>
                    </div>
                }) }
            </div>

            <form id={markup::SIGNUP_FORM_ID} class="st-signup-form" {onsubmit} novalidate={true}>
                <input
                    type="text"
                    name={markup::FIELD_NAME}
                    placeholder="Your name"
                    value={form.name.clone()}
                    oninput={on_name}
                />
                <input
                    type="email"
                    name={markup::FIELD_EMAIL}
                    placeholder="you@example.com"
                    value={form.email.clone()}
                    oninput={on_email}
                />
                <select name={markup::FIELD_USECASE} onchange={on_usecase}>
                    <option value="" selected={form.usecase.is_empty()}>{"How will you use SoulTune?"}</option>
                    { for USECASES.iter().map(|(value, label)| html! {
                        <option value={*value} selected={form.usecase == *value}>{*label}</option>
                    }) }
                </select>
                <label class="st-consent">
                    <input
                        type="checkbox"
                        name={markup::FIELD_CONSENT}
                        checked={form.consent}
                        onchange={on_consent}
                    />
                    {"I agree to the "}
                    <Link<Route> to={Route::Privacy}>{"privacy policy"}</Link<Route>>
                </label>
                <button type="submit" class="st-btn st-btn--primary" disabled={submitting}>
                    { if submitting { "Sending..." } else { "Get early access" } }
                </button>
            </form>

            <div
                id={markup::SIGNUP_SUCCESS_ID}
                class="st-form-message st-form-message--success"
                hidden={!phase.show_success()}
            >
                {"You're on the list! We'll email your invite soon."}
            </div>
            <div
                id={markup::SIGNUP_ERROR_ID}
                class="st-form-message st-form-message--error"
                hidden={errors.is_empty()}
            >
                <ul>
                    { for errors.iter().map(|message| html! { <li>{*message}</li> }) }
                </ul>
            </div>
        </section>
    }
}
