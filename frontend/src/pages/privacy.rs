use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[function_component(PrivacyPolicy)]
pub fn privacy_policy() -> Html {
    {
        use_effect_with_deps(
            move |_| {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                || ()
            },
            (),
        );
    }

    html! {
        <div class="legal-content privacy-policy">
            <style>
                {r#"
                    .legal-content {
                        min-height: 100vh;
                        padding: 6rem 2rem 4rem;
                        max-width: 720px;
                        margin: 0 auto;
                    }
                    .legal-content section {
                        margin: 1.5rem 0;
                    }
                    .legal-content p, .legal-content li {
                        line-height: 1.6;
                    }
                "#}
            </style>
            <h1>{"Privacy Policy"}</h1>

            <section>
                <h2>{"1. What we collect"}</h2>
                <p>{"When you join the beta we receive:"}</p>
                <ul>
                    <li>{"Your name (to address you in the invite)"}</li>
                    <li>{"Your email address (to send the invite and beta updates)"}</li>
                    <li>{"How you plan to use SoulTune (to shape the first sessions)"}</li>
                </ul>
            </section>

            <section>
                <h2>{"2. Where it goes"}</h2>
                <p>{"Signups are stored with our form provider and only read by the SoulTune team. Nothing is kept in your browser."}</p>
            </section>

            <section>
                <h2>{"3. Your rights"}</h2>
                <p>{"Reply to any beta email to see, correct or delete what we hold about you."}</p>
            </section>

            <div class="legal-links">
                <Link<Route> to={Route::Home}>{"Back to SoulTune"}</Link<Route>>
            </div>
        </div>
    }
}
