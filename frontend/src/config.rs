use crate::signup::submit::{FieldLayout, FormEndpoint, Transport};

#[cfg(all(feature = "json-signup", debug_assertions))]
pub fn get_backend_url() -> &'static str {
    "http://localhost:3001"  // Development URL when running locally
}

#[cfg(all(feature = "json-signup", not(debug_assertions)))]
pub fn get_backend_url() -> &'static str {
    ""  // Production URL
}

/// Fixed top nav height that anchor scrolling keeps clear of.
pub const HEADER_OFFSET_PX: f64 = 80.0;

pub const TILT_MAX_DEG: f64 = 15.0;

/// Scroll distance after which the top nav switches to its solid style.
pub const NAV_SOLID_AFTER_PX: f64 = 80.0;

#[cfg(debug_assertions)]
pub fn form_endpoint() -> FormEndpoint {
    FormEndpoint {
        action_url: "http://localhost:3001/beta-signup-form",
        fields: GOOGLE_FORM_FIELDS,
    }
}

/// Release builds post to the published form, whose response URL is set at
/// build time: `SOULTUNE_FORM_URL=https://docs.google.com/forms/d/e/<id>/formResponse trunk build --release`.
#[cfg(not(debug_assertions))]
const RELEASE_FORM_URL: &str = match option_env!("SOULTUNE_FORM_URL") {
    Some(url) => url,
    None => panic!("SOULTUNE_FORM_URL must be set for release builds"),
};

#[cfg(not(debug_assertions))]
pub fn form_endpoint() -> FormEndpoint {
    FormEndpoint {
        action_url: RELEASE_FORM_URL,
        fields: GOOGLE_FORM_FIELDS,
    }
}

const GOOGLE_FORM_FIELDS: FieldLayout = FieldLayout {
    name: "entry.1025937744",
    email: "entry.1557248392",
    usecase: "entry.731960510",
    consent: "entry.1960323745",
};

#[cfg(feature = "json-signup")]
pub const SIGNUP_API_PATH: &str = "/api/beta-signup";

/// How signups leave the browser. The opaque form post can't tell a stored
/// signup from a dropped one; build with `json-signup` to post to our own API
/// instead.
#[cfg(not(feature = "json-signup"))]
pub fn transport() -> Transport {
    Transport::Opaque
}

#[cfg(feature = "json-signup")]
pub fn transport() -> Transport {
    Transport::JsonApi { path: SIGNUP_API_PATH }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_endpoint_is_concrete() {
        let endpoint = form_endpoint();
        assert!(endpoint.action_url.starts_with("http"));
        assert!(!endpoint.action_url.contains("FORM_ID"));
        let fields = endpoint.fields;
        for key in [fields.name, fields.email, fields.usecase, fields.consent] {
            assert!(key.starts_with("entry.") && key.len() > "entry.".len());
        }
    }

    #[cfg(not(feature = "json-signup"))]
    #[test]
    fn default_transport_is_form_post() {
        assert_eq!(transport(), Transport::Opaque);
    }
}
