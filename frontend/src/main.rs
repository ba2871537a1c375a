use yew::prelude::*;
use yew_router::prelude::*;
use log::{info, Level};
use web_sys::MouseEvent;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

mod config;
mod markup;
mod effects {
    pub mod watch;
    pub mod reveal;
    pub mod tilt;
    pub mod counter;
    pub mod nav;
}
mod signup {
    pub mod form;
    pub mod submit;
    pub mod analytics;
    pub mod section;
}
mod pages {
    pub mod home;
    pub mod privacy;
}

use effects::nav::use_smooth_anchors;
use pages::{
    home::Home,
    privacy::PrivacyPolicy,
};


#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/privacy")]
    Privacy,
    #[not_found]
    #[at("/404")]
    NotFound,
}


fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        },
        Route::Privacy => {
            info!("Rendering Privacy page");
            html! { <PrivacyPolicy /> }
        },
        Route::NotFound => {
            info!("Unknown route, redirecting home");
            html! { <Redirect<Route> to={Route::Home} /> }
        },
    }
}

const NAV_LINKS: &[(&str, &str)] = &[
    ("#features", "Features"),
    ("#engine", "Dual engine"),
    ("#player", "Player"),
];

#[function_component(Nav)]
pub fn nav() -> Html {
    let menu_open = use_state(|| false);
    let is_scrolled = use_state(|| false);

    {
        let is_scrolled = is_scrolled.clone();
        use_effect_with_deps(move |_| {
            let window = web_sys::window();

            let scroll_callback = {
                let window = window.clone();
                Closure::wrap(Box::new(move || {
                    let scroll_y = window
                        .as_ref()
                        .and_then(|w| w.scroll_y().ok())
                        .unwrap_or(0.0);
                    is_scrolled.set(scroll_y > config::NAV_SOLID_AFTER_PX);
                }) as Box<dyn FnMut()>)
            };

            if let Some(window) = &window {
                let _ = window.add_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref());
            }

            move || {
                if let Some(window) = window {
                    let _ = window.remove_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref());
                }
            }
        }, ());
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    // Closing must not prevent default, the anchor listener needs the click.
    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
        })
    };

    let menu_class = if *menu_open {
        "nav-right mobile-menu-open"
    } else {
        "nav-right"
    };

    html! {
        <nav class={classes!("top-nav", (*is_scrolled).then(|| "scrolled"))}>
            <div class="nav-content">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    {"SoulTune"}
                </Link<Route>>

                <button class="burger-menu" onclick={toggle_menu}>
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div class={menu_class}>
                    { for NAV_LINKS.iter().map(|(href, label)| html! {
                        <a href={*href} class="nav-link" onclick={close_menu.clone()}>
                            {*label}
                        </a>
                    }) }
                    <a href="#beta" class="nav-cta" onclick={close_menu.clone()}>
                        {"Join the beta"}
                    </a>
                </div>
            </div>
        </nav>
    }
}


#[function_component]
fn App() -> Html {
    use_smooth_anchors();

    html! {
        <BrowserRouter>
            <Nav />
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}


fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    if console_log::init_with_level(Level::Info).is_err() {
        gloo_console::warn!("logger was already initialized");
    }

    info!("Starting SoulTune site");
    yew::Renderer::<App>::new().render();
}
