//! Reveal-on-scroll for page sections.
//!
//! Each section describes its animation with a [`RevealConfig`]; the same
//! installer handles all of them. Elements start hidden only once we know
//! the browser can tell us when to show them again.

use gloo_timers::callback::Timeout;
use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};
use yew::prelude::*;

use super::watch::{intersection_supported, query_all, VisibilityWatcher, WatchOptions};
use crate::markup;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Offset {
    TranslateY(u32),
    Scale(f64),
}

impl Offset {
    pub fn hidden_transform(&self) -> String {
        match self {
            Offset::TranslateY(px) => format!("translateY({}px)", px),
            Offset::Scale(factor) => format!("scale({})", factor),
        }
    }

    pub fn visible_transform(&self) -> &'static str {
        match self {
            Offset::TranslateY(_) => "translateY(0)",
            Offset::Scale(_) => "scale(1)",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HiddenState {
    pub offset: Offset,
    pub duration_s: f64,
    pub easing: &'static str,
    /// Easing for the transform only, when it differs from the opacity one.
    pub transform_easing: Option<&'static str>,
}

impl HiddenState {
    pub fn transition(&self, delay_ms: u32) -> String {
        let delay = if delay_ms == 0 {
            String::new()
        } else {
            format!(" {}s", delay_ms as f64 / 1000.0)
        };
        format!(
            "opacity {d}s {e}{delay}, transform {d}s {te}{delay}",
            d = self.duration_s,
            e = self.easing,
            te = self.transform_easing.unwrap_or(self.easing),
            delay = delay,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StaggerMode {
    /// Wait before marking the element visible.
    Timer,
    /// Mark visible immediately and let a CSS transition delay do the waiting.
    TransitionDelay,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stagger {
    pub base_ms: u32,
    pub step_ms: u32,
    pub mode: StaggerMode,
}

impl Stagger {
    pub const NONE: Stagger = Stagger {
        base_ms: 0,
        step_ms: 0,
        mode: StaggerMode::Timer,
    };

    pub fn delay_for(&self, index: usize) -> u32 {
        self.base_ms
            .saturating_add(self.step_ms.saturating_mul(index as u32))
    }

    fn timer_delay(&self, index: usize) -> u32 {
        match self.mode {
            StaggerMode::Timer => self.delay_for(index),
            StaggerMode::TransitionDelay => 0,
        }
    }

    fn css_delay(&self, index: usize) -> u32 {
        match self.mode {
            StaggerMode::Timer => 0,
            StaggerMode::TransitionDelay => self.delay_for(index),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealConfig {
    pub selector: &'static str,
    pub watch: WatchOptions,
    /// Inline starting state. `None` leaves the hidden look to the stylesheet.
    pub hidden: Option<HiddenState>,
    pub visible_class: &'static str,
    pub stagger: Stagger,
}

const SLIDE_UP_20: HiddenState = HiddenState {
    offset: Offset::TranslateY(20),
    duration_s: 0.6,
    easing: "ease",
    transform_easing: None,
};

const ITEM_STAGGER: Stagger = Stagger {
    base_ms: 200,
    step_ms: 100,
    mode: StaggerMode::TransitionDelay,
};

pub const HERO: RevealConfig = RevealConfig {
    selector: markup::HERO_ANIMATED,
    watch: WatchOptions {
        threshold: 0.1,
        root_margin: "0px 0px -50px 0px",
    },
    hidden: None,
    visible_class: markup::ANIMATE_IN_CLASS,
    stagger: Stagger::NONE,
};

pub const FEATURE_CARDS: RevealConfig = RevealConfig {
    selector: markup::FEATURE_CARD,
    watch: WatchOptions {
        threshold: 0.1,
        root_margin: "0px 0px -100px 0px",
    },
    hidden: None,
    visible_class: markup::VISIBLE_CLASS,
    stagger: Stagger {
        base_ms: 0,
        step_ms: 100,
        mode: StaggerMode::TransitionDelay,
    },
};

pub const ENGINE_VISUAL: RevealConfig = RevealConfig {
    selector: markup::ENGINE_VISUAL,
    watch: WatchOptions {
        threshold: 0.2,
        root_margin: "0px",
    },
    hidden: Some(HiddenState {
        offset: Offset::TranslateY(30),
        duration_s: 0.8,
        easing: "ease",
        transform_easing: None,
    }),
    visible_class: markup::VISIBLE_CLASS,
    stagger: Stagger::NONE,
};

pub const ENGINE_DESC_ITEMS: RevealConfig = RevealConfig {
    selector: markup::ENGINE_DESC_ITEM,
    watch: WatchOptions {
        threshold: 0.2,
        root_margin: "0px",
    },
    hidden: Some(SLIDE_UP_20),
    visible_class: markup::VISIBLE_CLASS,
    stagger: ITEM_STAGGER,
};

pub const PLAYER_PHONE: RevealConfig = RevealConfig {
    selector: markup::PLAYER_PHONE,
    watch: WatchOptions {
        threshold: 0.2,
        root_margin: "0px",
    },
    hidden: Some(HiddenState {
        offset: Offset::Scale(0.9),
        duration_s: 0.8,
        easing: "ease",
        transform_easing: Some("cubic-bezier(0.175, 0.885, 0.32, 1.275)"),
    }),
    visible_class: markup::VISIBLE_CLASS,
    stagger: Stagger::NONE,
};

pub const PLAYER_FEATURES: RevealConfig = RevealConfig {
    selector: markup::PLAYER_FEATURE,
    watch: WatchOptions {
        threshold: 0.2,
        root_margin: "0px",
    },
    hidden: Some(SLIDE_UP_20),
    visible_class: markup::VISIBLE_CLASS,
    stagger: ITEM_STAGGER,
};

pub const BETA_STEPS: RevealConfig = RevealConfig {
    selector: markup::STEP_CARD,
    watch: WatchOptions {
        threshold: 0.2,
        root_margin: "0px",
    },
    hidden: Some(HiddenState {
        offset: Offset::TranslateY(20),
        duration_s: 0.6,
        easing: "ease-out",
        transform_easing: None,
    }),
    visible_class: markup::VISIBLE_CLASS,
    stagger: Stagger {
        base_ms: 0,
        step_ms: 100,
        mode: StaggerMode::Timer,
    },
};

fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}

fn prepare(element: &Element, config: &RevealConfig, index: usize) {
    let css_delay = config.stagger.css_delay(index);
    match config.hidden {
        Some(hidden) => {
            set_style(element, "opacity", "0");
            set_style(element, "transform", &hidden.offset.hidden_transform());
            set_style(element, "transition", &hidden.transition(css_delay));
        }
        None if css_delay > 0 => {
            set_style(element, "transition-delay", &format!("{}ms", css_delay));
        }
        None => {}
    }
}

fn mark_ready() {
    if let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    {
        let _ = root.class_list().add_1(markup::REVEAL_READY_CLASS);
    }
}

fn show(element: &Element, config: &RevealConfig) {
    if let Some(hidden) = config.hidden {
        set_style(element, "opacity", "1");
        set_style(element, "transform", hidden.offset.visible_transform());
    }
    let _ = element.class_list().add_1(config.visible_class);
}

/// Hides the matching elements and reveals each one the first time it
/// scrolls into view. Returns the watcher keeping this alive, if any.
pub fn install(config: RevealConfig) -> Option<VisibilityWatcher> {
    if !intersection_supported() {
        debug!("reveal {}: no IntersectionObserver, leaving content as is", config.selector);
        return None;
    }

    let elements = query_all(config.selector);
    if elements.is_empty() {
        debug!("reveal {}: no matching elements", config.selector);
        return None;
    }

    mark_ready();
    for (index, element) in elements.iter().enumerate() {
        prepare(element, &config, index);
    }

    let fallback = elements.clone();
    let watched = VisibilityWatcher::observe(elements, config.watch, move |element, index| {
        let delay = config.stagger.timer_delay(index);
        if delay == 0 {
            show(element, &config);
        } else {
            let element = element.clone();
            Timeout::new(delay, move || show(&element, &config)).forget();
        }
    });

    match watched {
        Ok(watcher) => {
            debug!("reveal {}: watching {} elements", config.selector, fallback.len());
            watcher
        }
        Err(e) => {
            warn!("reveal {}: observer failed: {:?}", config.selector, e);
            for element in &fallback {
                show(element, &config);
            }
            None
        }
    }
}

/// Installs `config` after the component mounts and stops watching when it
/// unmounts.
#[hook]
pub fn use_reveal(config: RevealConfig) {
    use_effect_with_deps(
        move |_| {
            let watcher = install(config);
            move || drop(watcher)
        },
        (),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stagger_is_proportional_to_index() {
        let stagger = BETA_STEPS.stagger;
        assert_eq!(stagger.delay_for(0), 0);
        assert_eq!(stagger.delay_for(3), 300);

        assert_eq!(ITEM_STAGGER.delay_for(0), 200);
        assert_eq!(ITEM_STAGGER.delay_for(2), 400);
    }

    #[test]
    fn stagger_mode_picks_where_the_delay_goes() {
        assert_eq!(BETA_STEPS.stagger.timer_delay(2), 200);
        assert_eq!(BETA_STEPS.stagger.css_delay(2), 0);

        assert_eq!(FEATURE_CARDS.stagger.timer_delay(2), 0);
        assert_eq!(FEATURE_CARDS.stagger.css_delay(2), 200);
    }

    #[test]
    fn transition_includes_css_delay() {
        assert_eq!(
            SLIDE_UP_20.transition(300),
            "opacity 0.6s ease 0.3s, transform 0.6s ease 0.3s"
        );
        assert_eq!(
            SLIDE_UP_20.transition(0),
            "opacity 0.6s ease, transform 0.6s ease"
        );
    }

    #[test]
    fn player_phone_uses_springy_transform() {
        let hidden = PLAYER_PHONE.hidden.unwrap();
        assert_eq!(hidden.offset.hidden_transform(), "scale(0.9)");
        assert_eq!(hidden.offset.visible_transform(), "scale(1)");
        assert!(hidden
            .transition(0)
            .ends_with("transform 0.8s cubic-bezier(0.175, 0.885, 0.32, 1.275)"));
    }

    #[test]
    fn slide_offsets_return_to_zero() {
        let offset = Offset::TranslateY(30);
        assert_eq!(offset.hidden_transform(), "translateY(30px)");
        assert_eq!(offset.visible_transform(), "translateY(0)");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod web_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn missing_markup_installs_nothing() {
        let config = RevealConfig {
            selector: ".does-not-exist",
            ..BETA_STEPS
        };
        assert!(install(config).is_none());
    }

    #[wasm_bindgen_test]
    fn installed_elements_start_hidden() {
        let document = web_sys::window().unwrap().document().unwrap();
        let body = document.body().unwrap();
        let card = document.create_element("div").unwrap();
        card.set_class_name("st-step-card");
        body.append_child(&card).unwrap();

        let watcher = install(BETA_STEPS);
        assert!(watcher.is_some());
        let style = card.dyn_ref::<HtmlElement>().unwrap().style();
        assert_eq!(style.get_property_value("opacity").unwrap(), "0");

        drop(watcher);
        body.remove_child(&card).unwrap();
    }

    #[wasm_bindgen_test]
    fn without_observer_content_is_left_alone() {
        use wasm_bindgen::JsValue;
        use web_sys::js_sys::Reflect;

        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        let root = document.document_element().unwrap();
        let key = JsValue::from_str("IntersectionObserver");
        let saved = Reflect::get(&window, &key).unwrap();

        root.class_list().remove_1(markup::REVEAL_READY_CLASS).unwrap();
        let body = document.body().unwrap();
        let card = document.create_element("div").unwrap();
        card.set_class_name("st-step-card");
        body.append_child(&card).unwrap();

        assert!(Reflect::delete_property(&window, &key).unwrap());
        let watcher = install(BETA_STEPS);
        Reflect::set(&window, &key, &saved).unwrap();

        assert!(watcher.is_none());
        let style = card.dyn_ref::<HtmlElement>().unwrap().style();
        assert_eq!(style.get_property_value("opacity").unwrap(), "");
        assert_eq!(style.get_property_value("transform").unwrap(), "");
        assert!(!root.class_list().contains(markup::REVEAL_READY_CLASS));

        body.remove_child(&card).unwrap();
    }
}
