//! Stat counters that count up from zero the first time they are seen.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use log::{debug, warn};
use web_sys::Element;
use yew::prelude::*;

use super::watch::{intersection_supported, query_all, VisibilityWatcher, WatchOptions};
use crate::markup;

/// ~60 updates per second.
pub const STEP_MS: u32 = 16;
pub const DEFAULT_DURATION_MS: u32 = 2000;

const WATCH: WatchOptions = WatchOptions {
    threshold: 0.5,
    root_margin: "0px",
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    pub value: u64,
    pub finished: bool,
}

/// Fixed-step count from 0 to `target`. The number of steps depends only on
/// the duration, so late timer callbacks slow the animation down but never
/// change where it ends.
#[derive(Clone, Debug)]
pub struct CounterAnimation {
    target: u64,
    increment: f64,
    current: f64,
    finished: bool,
}

impl CounterAnimation {
    pub fn new(target: u64, duration_ms: u32) -> Self {
        let steps = (duration_ms / STEP_MS) as f64;
        let finished = target == 0 || steps < 1.0;
        Self {
            target,
            increment: if finished { 0.0 } else { target as f64 / steps },
            current: 0.0,
            finished,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn tick(&mut self) -> Tick {
        if !self.finished {
            self.current += self.increment;
            if self.current >= self.target as f64 {
                self.finished = true;
            }
        }
        let value = if self.finished {
            self.target
        } else {
            (self.current.floor() as u64).min(self.target)
        };
        Tick {
            value,
            finished: self.finished,
        }
    }
}

/// Reads a `data-count` value. Only plain non-negative integers count;
/// anything else leaves the element as authored.
pub fn parse_count(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

#[derive(Clone, Debug, PartialEq)]
struct Stat {
    target: u64,
    suffix: String,
}

impl Stat {
    fn read(element: &Element) -> Option<Self> {
        let target = parse_count(&element.get_attribute(markup::COUNT_ATTR)?)?;
        Some(Self {
            target,
            suffix: element.get_attribute(markup::COUNT_SUFFIX_ATTR).unwrap_or_default(),
        })
    }
}

fn render(element: &Element, value: u64, suffix: &str) {
    element.set_text_content(Some(&format!("{}{}", value, suffix)));
}

type Running = Rc<RefCell<HashMap<usize, Interval>>>;

fn start(element: &Element, index: usize, stat: Stat, running: &Running) {
    let Stat { target, suffix } = stat;
    let mut animation = CounterAnimation::new(target, DEFAULT_DURATION_MS);
    if animation.is_finished() {
        render(element, target, &suffix);
        return;
    }

    let element = element.clone();
    let slots = running.clone();
    let interval = Interval::new(STEP_MS, move || {
        let tick = animation.tick();
        render(&element, tick.value, &suffix);
        if tick.finished {
            // The interval can't be dropped from inside its own callback.
            let slots = slots.clone();
            Timeout::new(0, move || {
                slots.borrow_mut().remove(&index);
            })
            .forget();
        }
    });
    running.borrow_mut().insert(index, interval);
}

pub struct CounterHandle {
    _watcher: VisibilityWatcher,
    running: Running,
}

impl Drop for CounterHandle {
    fn drop(&mut self) {
        self.running.borrow_mut().clear();
    }
}

pub fn install() -> Option<CounterHandle> {
    if !intersection_supported() {
        return None;
    }

    let mut elements = Vec::new();
    let mut stats = Vec::new();
    for element in query_all(markup::STAT_NUMBER) {
        match Stat::read(&element) {
            Some(stat) => {
                elements.push(element);
                stats.push(stat);
            }
            None => warn!(
                "counter: unreadable {} {:?}, leaving as is",
                markup::COUNT_ATTR,
                element.get_attribute(markup::COUNT_ATTR)
            ),
        }
    }
    if elements.is_empty() {
        return None;
    }

    for (element, stat) in elements.iter().zip(&stats) {
        render(element, 0, &stat.suffix);
    }

    let running: Running = Rc::new(RefCell::new(HashMap::new()));
    let slots = running.clone();
    let fallback: Vec<_> = elements.iter().cloned().zip(stats.iter().cloned()).collect();
    match VisibilityWatcher::observe(elements, WATCH, move |element, index| {
        debug!("counter {} visible", index);
        if let Some(stat) = stats.get(index) {
            start(element, index, stat.clone(), &slots);
        }
    }) {
        Ok(Some(watcher)) => Some(CounterHandle {
            _watcher: watcher,
            running,
        }),
        Ok(None) => None,
        Err(e) => {
            warn!("counters: observer failed: {:?}", e);
            for (element, stat) in &fallback {
                render(element, stat.target, &stat.suffix);
            }
            None
        }
    }
}

#[hook]
pub fn use_counters() {
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

    fn run(mut animation: CounterAnimation) -> Vec<u64> {
        let mut values = Vec::new();
        for _ in 0..10_000 {
            let tick = animation.tick();
            values.push(tick.value);
            if tick.finished {
                break;
            }
        }
        values
    }

    #[test]
    fn ends_exactly_on_target() {
        let values = run(CounterAnimation::new(2500, 2000));
        assert_eq!(*values.last().unwrap(), 2500);
        assert_eq!(values.last().unwrap().to_string(), "2500");
        assert_eq!(values.len(), 125);
    }

    #[test]
    fn awkward_increments_never_overshoot() {
        let values = run(CounterAnimation::new(1234, 1000));
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert!(values.iter().all(|v| *v <= 1234));
        assert_eq!(*values.last().unwrap(), 1234);
    }

    #[test]
    fn intermediate_values_are_floored() {
        let mut animation = CounterAnimation::new(10, 160);
        // one unit per step
        assert_eq!(animation.tick().value, 1);

        let mut animation = CounterAnimation::new(5, 160);
        assert_eq!(animation.tick().value, 0);
        assert_eq!(animation.tick().value, 1);
    }

    #[test]
    fn ticking_after_finish_stays_on_target() {
        let mut animation = CounterAnimation::new(3, 32);
        while !animation.tick().finished {}
        assert_eq!(animation.tick(), Tick { value: 3, finished: true });
    }

    #[test]
    fn only_plain_integers_are_counted() {
        assert_eq!(parse_count("2500"), Some(2500));
        assert_eq!(parse_count(" 2500 "), Some(2500));
        assert_eq!(parse_count("0"), Some(0));
        assert_eq!(parse_count("2,500"), None);
        assert_eq!(parse_count("1.5"), None);
        assert_eq!(parse_count("-3"), None);
        assert_eq!(parse_count(""), None);
    }

    #[test]
    fn zero_target_or_duration_is_immediate() {
        assert!(CounterAnimation::new(0, 2000).is_finished());
        let mut instant = CounterAnimation::new(99, 5);
        assert!(instant.is_finished());
        assert_eq!(instant.tick().value, 99);
    }
}
