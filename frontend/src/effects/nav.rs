//! Smooth scrolling for same-page anchor links.

use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent, ScrollBehavior, ScrollToOptions};
use yew::prelude::*;

use crate::config;

#[derive(Debug, PartialEq, Eq)]
pub enum AnchorTarget<'a> {
    /// `href="#"`: swallow the click, don't move.
    Bare,
    Fragment(&'a str),
    External,
}

impl<'a> AnchorTarget<'a> {
    pub fn parse(href: &'a str) -> Self {
        match href.strip_prefix('#') {
            Some("") => AnchorTarget::Bare,
            Some(id) => AnchorTarget::Fragment(id),
            None => AnchorTarget::External,
        }
    }
}

pub fn scroll_offset(element_top: f64, page_y_offset: f64, header_height: f64) -> f64 {
    element_top + page_y_offset - header_height
}

/// Smoothly scrolls so `target` sits just below the fixed header.
pub fn scroll_to_element(target: &Element) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let top = scroll_offset(
        target.get_bounding_client_rect().top(),
        window.page_y_offset().unwrap_or(0.0),
        config::HEADER_OFFSET_PX,
    );
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

fn on_click(event: MouseEvent) {
    let Some(link) = event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest("a[href^=\"#\"]").ok().flatten())
    else {
        return;
    };
    let Some(href) = link.get_attribute("href") else {
        return;
    };

    match AnchorTarget::parse(&href) {
        AnchorTarget::Bare => event.prevent_default(),
        AnchorTarget::Fragment(id) => {
            let target = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id(id));
            if let Some(target) = target {
                event.prevent_default();
                scroll_to_element(&target);
            } else {
                debug!("anchor #{} has no target", id);
            }
        }
        AnchorTarget::External => {}
    }
}

/// One delegated listener on the document, so links rendered later are
/// covered too.
#[hook]
pub fn use_smooth_anchors() {
    use_effect_with_deps(
        move |_| {
            let document = web_sys::window().and_then(|w| w.document());
            let listener = Closure::wrap(Box::new(on_click) as Box<dyn FnMut(MouseEvent)>);
            if let Some(document) = &document {
                if let Err(e) = document
                    .add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
                {
                    warn!("smooth anchors: {:?}", e);
                }
            }
            move || {
                if let Some(document) = document {
                    let _ = document.remove_event_listener_with_callback(
                        "click",
                        listener.as_ref().unchecked_ref(),
                    );
                }
            }
        },
        (),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_anchor_targets() {
        assert_eq!(AnchorTarget::parse("#"), AnchorTarget::Bare);
        assert_eq!(AnchorTarget::parse("#signup"), AnchorTarget::Fragment("signup"));
        assert_eq!(AnchorTarget::parse("/privacy"), AnchorTarget::External);
        assert_eq!(AnchorTarget::parse("https://example.com/#x"), AnchorTarget::External);
    }

    #[test]
    fn offset_accounts_for_header() {
        assert_eq!(scroll_offset(400.0, 1200.0, 80.0), 1520.0);
        assert_eq!(scroll_offset(-300.0, 1200.0, 80.0), 820.0);
    }
}
