//! Selectors and element ids the behavior layer relies on.
//!
//! The page components render these and nothing else is looked up by the
//! effects. Every effect treats a missing node as "nothing to do".

pub const HERO: &str = ".st-hero";
pub const HERO_PHONE_ID: &str = "heroPhone";
pub const HERO_ANIMATED: &str = "[data-animate]";

pub const FEATURE_CARD: &str = ".st-feature-card";

pub const ENGINE_VISUAL: &str = ".st-engine-visual";
pub const ENGINE_DESC_ITEM: &str = ".st-desc-item";

pub const PLAYER_PHONE: &str = ".st-phone-mockup--large";
pub const PLAYER_FEATURE: &str = ".st-p-feature";

pub const STEP_CARD: &str = ".st-step-card";

pub const STAT_NUMBER: &str = ".st-stat-number[data-count]";
pub const COUNT_ATTR: &str = "data-count";
pub const COUNT_SUFFIX_ATTR: &str = "data-suffix";

pub const SIGNUP_FORM_ID: &str = "betaSignupForm";
pub const SIGNUP_SUCCESS_ID: &str = "signupSuccess";
pub const SIGNUP_ERROR_ID: &str = "signupError";

pub const FIELD_NAME: &str = "name";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_USECASE: &str = "usecase";
pub const FIELD_CONSENT: &str = "consent";

pub const VISIBLE_CLASS: &str = "is-visible";
pub const ANIMATE_IN_CLASS: &str = "animate-in";
/// Set on `<html>` once reveals can run; stylesheet-driven hidden states are
/// scoped under it.
pub const REVEAL_READY_CLASS: &str = "st-reveal-ready";
