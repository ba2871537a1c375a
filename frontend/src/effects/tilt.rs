//! 3D tilt of the hero phone following the pointer.

use std::cell::Cell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Reflect;
use web_sys::{Element, HtmlElement, MouseEvent};
use yew::prelude::*;

use crate::config;
use crate::markup;

pub const TRACKING_TRANSITION: &str = "transform 0.1s linear";
pub const RESET_TRANSITION: &str = "transform 0.5s cubic-bezier(0.215, 0.61, 0.355, 1)";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Degrees around the X axis (pitch) and Y axis (yaw).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
    pub pitch: f64,
    pub yaw: f64,
}

impl Rotation {
    pub const NEUTRAL: Rotation = Rotation { pitch: 0.0, yaw: 0.0 };

    pub fn transform(&self) -> String {
        format!(
            "perspective(1000px) rotateX({}deg) rotateY({}deg)",
            self.pitch, self.yaw
        )
    }
}

fn axis(offset: f64, half: f64, max_deg: f64) -> f64 {
    if half <= 0.0 {
        return 0.0;
    }
    (offset / half * max_deg).clamp(-max_deg, max_deg)
}

/// Linear in the pointer's offset from the region's center, reaching
/// `max_deg` at the edges. Moving the pointer up tilts the top away.
pub fn rotation_for(region: Region, x: f64, y: f64, max_deg: f64) -> Rotation {
    let (cx, cy) = region.center();
    Rotation {
        // Offset measured upward, so the center gives 0.0 rather than -0.0.
        pitch: axis(cy - y, region.height / 2.0, max_deg),
        yaw: axis(x - cx, region.width / 2.0, max_deg),
    }
}

#[derive(Debug, Default)]
pub struct TiltState {
    hovering: Cell<bool>,
}

impl TiltState {
    pub fn enter(&self) {
        self.hovering.set(true);
    }

    pub fn leave(&self) {
        self.hovering.set(false);
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering.get()
    }
}

fn is_touch_device(window: &web_sys::Window) -> bool {
    Reflect::has(window, &JsValue::from_str("ontouchstart")).unwrap_or(false)
        || window.navigator().max_touch_points() > 0
}

fn set_phone(phone: &HtmlElement, transition: &str, rotation: Rotation) {
    let style = phone.style();
    let _ = style.set_property("transition", transition);
    let _ = style.set_property("transform", &rotation.transform());
}

type MouseHandler = Closure<dyn FnMut(MouseEvent)>;

/// Listeners attached to the hero; removed on drop.
pub struct TiltHandle {
    hero: Element,
    listeners: Vec<(&'static str, MouseHandler)>,
}

impl Drop for TiltHandle {
    fn drop(&mut self) {
        for (event, handler) in &self.listeners {
            let _ = self
                .hero
                .remove_event_listener_with_callback(event, handler.as_ref().unchecked_ref());
        }
    }
}

pub fn install() -> Option<TiltHandle> {
    let window = web_sys::window()?;
    if is_touch_device(&window) {
        debug!("tilt: touch device, disabled");
        return None;
    }
    let document = window.document()?;
    let hero = document.query_selector(markup::HERO).ok().flatten();
    let phone = document
        .get_element_by_id(markup::HERO_PHONE_ID)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    let (Some(hero), Some(phone)) = (hero, phone) else {
        warn!("tilt: hero elements not found");
        return None;
    };

    let state = Rc::new(TiltState::default());

    let on_enter: MouseHandler = {
        let state = state.clone();
        let phone = phone.clone();
        Closure::wrap(Box::new(move |_: MouseEvent| {
            state.enter();
            let _ = phone.style().set_property("transition", TRACKING_TRANSITION);
        }) as Box<dyn FnMut(MouseEvent)>)
    };

    let on_move: MouseHandler = {
        let state = state.clone();
        let phone = phone.clone();
        let region_el = hero.clone();
        Closure::wrap(Box::new(move |e: MouseEvent| {
            if !state.is_hovering() {
                return;
            }
            let rect = region_el.get_bounding_client_rect();
            let region = Region {
                left: rect.left(),
                top: rect.top(),
                width: rect.width(),
                height: rect.height(),
            };
            let rotation = rotation_for(
                region,
                e.client_x() as f64,
                e.client_y() as f64,
                config::TILT_MAX_DEG,
            );
            let _ = phone.style().set_property("transform", &rotation.transform());
        }) as Box<dyn FnMut(MouseEvent)>)
    };

    let on_leave: MouseHandler = {
        let state = state.clone();
        Closure::wrap(Box::new(move |_: MouseEvent| {
            state.leave();
            set_phone(&phone, RESET_TRANSITION, Rotation::NEUTRAL);
        }) as Box<dyn FnMut(MouseEvent)>)
    };

    let listeners = vec![
        ("mouseenter", on_enter),
        ("mousemove", on_move),
        ("mouseleave", on_leave),
    ];
    for (event, handler) in &listeners {
        if let Err(e) = hero.add_event_listener_with_callback(event, handler.as_ref().unchecked_ref()) {
            warn!("tilt: could not listen to {}: {:?}", event, e);
        }
    }

    Some(TiltHandle { hero, listeners })
}

#[hook]
pub fn use_tilt() {
    use_effect_with_deps(
        move |_| {
            let handle = install();
            move || drop(handle)
        },
        (),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGION: Region = Region {
        left: 100.0,
        top: 50.0,
        width: 800.0,
        height: 400.0,
    };

    #[test]
    fn center_is_neutral() {
        let rotation = rotation_for(REGION, 500.0, 250.0, 15.0);
        assert_eq!(rotation, Rotation::NEUTRAL);
    }

    #[test]
    fn right_edge_gives_full_yaw() {
        let rotation = rotation_for(REGION, 900.0, 250.0, 15.0);
        assert_eq!(rotation.yaw, 15.0);
        assert_eq!(rotation.pitch, 0.0);
    }

    #[test]
    fn top_edge_tilts_back() {
        let rotation = rotation_for(REGION, 500.0, 50.0, 15.0);
        assert_eq!(rotation.pitch, 15.0);
        assert_eq!(rotation.yaw, 0.0);
    }

    #[test]
    fn outside_the_region_is_clamped() {
        let rotation = rotation_for(REGION, 5000.0, -5000.0, 15.0);
        assert_eq!(rotation.yaw, 15.0);
        assert_eq!(rotation.pitch, 15.0);
    }

    #[test]
    fn empty_region_stays_neutral() {
        let region = Region {
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 0.0,
        };
        assert_eq!(rotation_for(region, 10.0, 10.0, 15.0), Rotation::NEUTRAL);
    }

    #[test]
    fn transform_string() {
        let rotation = Rotation { pitch: -7.5, yaw: 3.0 };
        assert_eq!(
            rotation.transform(),
            "perspective(1000px) rotateX(-7.5deg) rotateY(3deg)"
        );
        assert_eq!(
            Rotation::NEUTRAL.transform(),
            "perspective(1000px) rotateX(0deg) rotateY(0deg)"
        );
    }

    #[test]
    fn centered_pointer_renders_neutral() {
        let region = Region {
            left: 100.0,
            top: 50.0,
            width: 300.0,
            height: 600.0,
        };
        let (cx, cy) = region.center();
        let transform = rotation_for(region, cx, cy, 15.0).transform();
        assert_eq!(transform, Rotation::NEUTRAL.transform());
        assert!(!transform.contains("-0"));
    }

    #[test]
    fn moves_only_count_while_hovering() {
        let state = TiltState::default();
        assert!(!state.is_hovering());
        state.enter();
        assert!(state.is_hovering());
        state.leave();
        assert!(!state.is_hovering());
    }
}
