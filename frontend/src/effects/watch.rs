//! Viewport-intersection watching shared by the reveal and counter effects.
//!
//! A [`VisibilityWatcher`] observes a fixed list of elements and calls back
//! exactly once per element, the first time it becomes visible past the
//! configured threshold. The element is unobserved right after.

use log::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::{Array, Reflect};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

// Browsers report ratios like 0.19999 for an element sitting exactly on a
// threshold.
const RATIO_TOLERANCE: f64 = 1e-3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WatchOptions {
    /// Fraction of the element's area that must be inside the viewport.
    pub threshold: f64,
    pub root_margin: &'static str,
}

pub fn should_fire(is_intersecting: bool, ratio: f64, threshold: f64) -> bool {
    is_intersecting && ratio + RATIO_TOLERANCE >= threshold
}

/// Tracks which indices already fired.
#[derive(Debug)]
pub struct FireOnce {
    fired: Vec<bool>,
}

impl FireOnce {
    pub fn new(len: usize) -> Self {
        Self { fired: vec![false; len] }
    }

    /// True only the first time `index` is claimed.
    pub fn claim(&mut self, index: usize) -> bool {
        match self.fired.get_mut(index) {
            Some(done) if !*done => {
                *done = true;
                true
            }
            _ => false,
        }
    }
}

pub fn intersection_supported() -> bool {
    web_sys::window()
        .map(|window| Reflect::has(&window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false))
        .unwrap_or(false)
}

type EntriesCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Owns the observer and its callback. Dropping it stops all watching.
pub struct VisibilityWatcher {
    observer: IntersectionObserver,
    _callback: EntriesCallback,
}

impl VisibilityWatcher {
    /// Returns `Ok(None)` when there is nothing to watch or the runtime has no
    /// `IntersectionObserver`.
    pub fn observe<F>(
        elements: Vec<Element>,
        options: WatchOptions,
        mut on_visible: F,
    ) -> Result<Option<Self>, JsValue>
    where
        F: FnMut(&Element, usize) + 'static,
    {
        if elements.is_empty() {
            return Ok(None);
        }
        if !intersection_supported() {
            debug!("IntersectionObserver unavailable, skipping watch");
            return Ok(None);
        }

        let watched = elements.clone();
        let mut fired = FireOnce::new(watched.len());
        let threshold = options.threshold;

        let callback: EntriesCallback = Closure::wrap(Box::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if !should_fire(entry.is_intersecting(), entry.intersection_ratio(), threshold) {
                        continue;
                    }
                    let target = entry.target();
                    let Some(index) = watched.iter().position(|el| el == &target) else {
                        continue;
                    };
                    observer.unobserve(&target);
                    if fired.claim(index) {
                        on_visible(&target, index);
                    }
                }
            },
        )
            as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(options.root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        for element in &elements {
            observer.observe(element);
        }

        Ok(Some(Self {
            observer,
            _callback: callback,
        }))
    }
}

impl Drop for VisibilityWatcher {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Collects all elements matching `selector` in document order.
pub fn query_all(selector: &str) -> Vec<Element> {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return Vec::new();
    };
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_inclusive() {
        assert!(should_fire(true, 0.2, 0.2));
        assert!(should_fire(true, 0.19999, 0.2));
        assert!(!should_fire(true, 0.19, 0.2));
    }

    #[test]
    fn not_intersecting_never_fires() {
        assert!(!should_fire(false, 1.0, 0.2));
        assert!(should_fire(true, 0.0, 0.0));
    }

    #[test]
    fn claim_fires_once_per_index() {
        let mut once = FireOnce::new(3);
        assert!(once.claim(1));
        assert!(!once.claim(1));
        assert!(!once.claim(1));
        assert!(once.claim(0));
        assert!(once.claim(2));
        assert!(!once.claim(0));
    }

    #[test]
    fn claim_out_of_range_is_ignored() {
        let mut once = FireOnce::new(1);
        assert!(!once.claim(5));
    }
}
