use yew::prelude::*;

use crate::effects::counter::use_counters;
use crate::effects::reveal::{self, use_reveal};
use crate::effects::tilt::use_tilt;
use crate::markup;
use crate::signup::section::BetaSignup;

const FEATURES: &[(&str, &str)] = &[
    ("Binaural layers", "Two engines blend tones tuned to the state you want to reach."),
    ("Adaptive sessions", "Sessions adjust their pace to how long you have."),
    ("Offline first", "Everything you need plays without a connection."),
    ("No feed", "Open it, pick a session, put the phone down."),
];

const ENGINE_POINTS: &[(&str, &str)] = &[
    ("Tone engine", "Generates carrier and beat frequencies in real time."),
    ("Texture engine", "Layers rain, noise and field recordings on top."),
    ("One mix", "Both run together and follow a single session curve."),
];

const PLAYER_POINTS: &[&str] = &[
    "Sleep timer with a slow fade",
    "Lock-screen controls",
    "Session history without streaks or badges",
];

const STATS: &[(u64, &str, &str)] = &[
    (2500, "+", "beta signups"),
    (48, "", "soundscapes"),
    (12, "", "session curves"),
];

#[function_component(Hero)]
fn hero() -> Html {
    use_tilt();
    use_reveal(reveal::HERO);

    html! {
        <section class="st-hero">
            <div class="st-hero__copy">
                <h1 data-animate="true">{"Sound that tunes your day"}</h1>
                <p data-animate="true">{"SoulTune mixes two audio engines into sessions for focus, rest and sleep."}</p>
                <div class="st-hero__actions" data-animate="true">
                    <a href="#beta" class="st-btn st-btn--primary">{"Join the beta"}</a>
                    <a href="#features" class="st-btn">{"See how it works"}</a>
                </div>
            </div>
            <div class="st-hero__visual">
                <div id={markup::HERO_PHONE_ID} class="st-phone-mockup">
                    <img src="/assets/hero-phone.png" alt="SoulTune player" />
                </div>
            </div>
        </section>
    }
}

#[function_component(Features)]
fn features() -> Html {
    use_reveal(reveal::FEATURE_CARDS);

    html! {
        <section id="features" class="st-features">
            <h2>{"Built for attention, not against it"}</h2>
            <div class="st-feature-grid">
                { for FEATURES.iter().map(|(title, text)| html! {
                    <article class="st-feature-card">
                        <h3>{*title}</h3>
                        <p>{*text}</p>
                    </article>
                }) }
            </div>
        </section>
    }
}

#[function_component(DualEngine)]
fn dual_engine() -> Html {
    use_reveal(reveal::ENGINE_VISUAL);
    use_reveal(reveal::ENGINE_DESC_ITEMS);

    html! {
        <section id="engine" class="st-dual-engine">
            <div class="st-engine-visual">
                <img src="/assets/dual-engine.svg" alt="Two engines feeding one mix" />
            </div>
            <div class="st-engine-desc">
                { for ENGINE_POINTS.iter().map(|(title, text)| html! {
                    <div class="st-desc-item">
                        <h3>{*title}</h3>
                        <p>{*text}</p>
                    </div>
                }) }
            </div>
        </section>
    }
}

#[function_component(Player)]
fn player() -> Html {
    use_reveal(reveal::PLAYER_PHONE);
    use_reveal(reveal::PLAYER_FEATURES);

    html! {
        <section id="player" class="st-player">
            <div class="st-phone-mockup st-phone-mockup--large">
                <img src="/assets/player.png" alt="SoulTune player screen" />
            </div>
            <ul class="st-player-features">
                { for PLAYER_POINTS.iter().map(|point| html! {
                    <li class="st-p-feature">{*point}</li>
                }) }
            </ul>
        </section>
    }
}

#[function_component(Stats)]
fn stats() -> Html {
    use_counters();

    html! {
        <section class="st-stats">
            { for STATS.iter().map(|(count, suffix, label)| html! {
                <div class="st-stat">
                    // No children: the counter owns this text, and the
                    // stylesheet shows the target until it takes over.
                    <span
                        class="st-stat-number"
                        data-count={count.to_string()}
                        data-suffix={*suffix}
                    />
                    <span class="st-stat-label">{*label}</span>
                </div>
            }) }
        </section>
    }
}

#[function_component(Home)]
pub fn home() -> Html {
    html! {
        <div class="st-home">
            <style>
                {r#"
                    .st-hero {
                        min-height: 100vh;
                        display: flex;
                        align-items: center;
                        justify-content: space-between;
                        gap: 3rem;
                        padding: 6rem 2rem 2rem;
                    }
                    .st-phone-mockup {
                        transform-style: preserve-3d;
                        will-change: transform;
                    }
                    .st-phone-mockup img {
                        width: 280px;
                        height: auto;
                    }
                    .st-reveal-ready [data-animate] {
                        opacity: 0;
                        transform: translateY(20px);
                        transition: opacity 0.6s ease, transform 0.6s ease;
                    }
                    [data-animate].animate-in {
                        opacity: 1;
                        transform: translateY(0);
                    }
                    .st-feature-grid {
                        display: grid;
                        grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
                        gap: 1.5rem;
                    }
                    .st-reveal-ready .st-feature-card {
                        opacity: 0;
                        transform: translateY(30px);
                        transition: opacity 0.6s ease, transform 0.6s ease;
                    }
                    .st-feature-card.is-visible,
                    .st-step-card.is-visible {
                        opacity: 1 !important;
                        transform: translateY(0) !important;
                    }
                    .st-stats {
                        display: flex;
                        justify-content: space-around;
                        padding: 4rem 2rem;
                    }
                    .st-stat-number {
                        font-size: 3rem;
                        font-variant-numeric: tabular-nums;
                    }
                    .st-stat-number:empty::before {
                        content: attr(data-count) attr(data-suffix);
                    }
                    .st-form-message--success { color: #7ee2a8; }
                    .st-form-message--error { color: #ff7e7e; }
                    @media (max-width: 768px) {
                        .st-hero {
                            flex-direction: column;
                            text-align: center;
                        }
                    }
                "#}
            </style>
            <Hero />
            <Features />
            <DualEngine />
            <Player />
            <Stats />
            <BetaSignup />
        </div>
    }
}
