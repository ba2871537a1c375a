//! Sending a validated signup to the collection service.

use gloo_net::http::Request;
use log::{error, info};
use thiserror::Error;
use web_sys::RequestMode;

#[cfg(any(test, feature = "json-signup"))]
use serde::{Deserialize, Serialize};

use super::form::ValidSignup;
use crate::config;

/// Field names the external form service expects for each value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldLayout {
    pub name: &'static str,
    pub email: &'static str,
    pub usecase: &'static str,
    pub consent: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FormEndpoint {
    pub action_url: &'static str,
    pub fields: FieldLayout,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transport {
    /// Cross-origin form post. The response can't be read, so anything that
    /// doesn't fail at the network level counts as delivered.
    Opaque,
    /// JSON to our own API, which answers with a real status.
    #[cfg(feature = "json-signup")]
    JsonApi { path: &'static str },
}

/// Only `Network` can happen on the form post; the rest come from the JSON API.
#[derive(Debug, Error)]
#[cfg_attr(not(feature = "json-signup"), allow(dead_code))]
pub enum SubmitError {
    #[error("could not encode signup: {0}")]
    Serialize(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("signup rejected with status {status}")]
    Rejected { status: u16 },
    #[error("signup declined: {0}")]
    Declined(String),
}

pub const CONSENT_VALUE: &str = "yes";

/// `application/x-www-form-urlencoded` body in the service's field layout.
pub fn encode_form(signup: &ValidSignup, fields: &FieldLayout) -> String {
    [
        (fields.name, signup.name.as_str()),
        (fields.email, signup.email.as_str()),
        (fields.usecase, signup.usecase.as_str()),
        (fields.consent, CONSENT_VALUE),
    ]
    .iter()
    .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
    .collect::<Vec<_>>()
    .join("&")
}

#[cfg(any(test, feature = "json-signup"))]
#[derive(Debug, Serialize)]
pub struct ApiSignupRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub usecase: &'a str,
    pub timestamp: String,
}

#[cfg(any(test, feature = "json-signup"))]
impl<'a> ApiSignupRequest<'a> {
    pub fn new(signup: &'a ValidSignup) -> Self {
        Self {
            name: &signup.name,
            email: &signup.email,
            usecase: &signup.usecase,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(any(test, feature = "json-signup"))]
#[derive(Debug, Deserialize)]
pub struct ApiSignupResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

async fn send_opaque(signup: &ValidSignup, endpoint: &FormEndpoint) -> Result<(), SubmitError> {
    let body = encode_form(signup, &endpoint.fields);
    Request::post(endpoint.action_url)
        .mode(RequestMode::NoCors)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(body)
        .send()
        .await
        .map_err(|e| SubmitError::Network(e.to_string()))?;
    Ok(())
}

#[cfg(feature = "json-signup")]
async fn send_json(signup: &ValidSignup, path: &str) -> Result<(), SubmitError> {
    let url = format!("{}{}", config::get_backend_url(), path);
    let response = Request::post(&url)
        .json(&ApiSignupRequest::new(signup))
        .map_err(|e| SubmitError::Serialize(e.to_string()))?
        .send()
        .await
        .map_err(|e| SubmitError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(SubmitError::Rejected {
            status: response.status(),
        });
    }
    let reply: ApiSignupResponse = response
        .json()
        .await
        .map_err(|e| SubmitError::Serialize(e.to_string()))?;
    if reply.success {
        Ok(())
    } else {
        Err(SubmitError::Declined(reply.message.unwrap_or_default()))
    }
}

/// One attempt, no retry. Failures are logged here; callers only need to
/// know whether it worked.
pub async fn submit(signup: &ValidSignup, transport: Transport) -> Result<(), SubmitError> {
    let result = match transport {
        Transport::Opaque => send_opaque(signup, &config::form_endpoint()).await,
        #[cfg(feature = "json-signup")]
        Transport::JsonApi { path } => send_json(signup, path).await,
    };
    match &result {
        Ok(()) => info!("Beta signup sent ({:?})", transport),
        Err(e) => error!("Beta signup failed: {}", e),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: FieldLayout = FieldLayout {
        name: "entry.1",
        email: "entry.2",
        usecase: "entry.3",
        consent: "entry.4",
    };

    fn signup() -> ValidSignup {
        ValidSignup {
            name: "Zoë Ann".into(),
            email: "zoe+beta@example.com".into(),
            usecase: "focus & sleep".into(),
        }
    }

    #[test]
    fn form_body_uses_service_field_names() {
        assert_eq!(
            encode_form(&signup(), &FIELDS),
            "entry.1=Zo%C3%AB%20Ann&entry.2=zoe%2Bbeta%40example.com\
             &entry.3=focus%20%26%20sleep&entry.4=yes"
        );
    }

    #[test]
    fn api_request_has_timestamp() {
        let signup = signup();
        let request = ApiSignupRequest::new(&signup);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["email"], "zoe+beta@example.com");
        assert_eq!(json["usecase"], "focus & sleep");
        let stamp = json["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
    }

    #[test]
    fn api_response_message_is_optional() {
        let reply: ApiSignupResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(reply.success);
        assert!(reply.message.is_none());
    }

    #[test]
    fn errors_read_well_in_logs() {
        assert_eq!(
            SubmitError::Rejected { status: 503 }.to_string(),
            "signup rejected with status 503"
        );
    }
}
