//! EmailJS relay implementation using the REST `email/send` endpoint.
//!
//! The request mirrors what the browser SDK sends: service and template
//! identifiers, the public key as `user_id`, an optional private key as
//! `accessToken`, and the template parameters.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Serialize;

use crate::core::state::DraftMessage;
use crate::gateway::{EmailGateway, GatewayError};

pub const DEFAULT_EMAILJS_BASE_URL: &str = "https://api.emailjs.com/api/v1.0";

/// Identifiers and keys for an EmailJS account. Any of them may be
/// missing; the check happens when a draft is sent.
#[derive(Debug, Clone, Default)]
pub struct EmailJsSettings {
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
    pub private_key: Option<String>,
    /// Destination address passed to the template as `to_email`.
    pub to_email: Option<String>,
}

impl EmailJsSettings {
    /// Names of the required settings that are not set.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.service_id) {
            missing.push("service_id");
        }
        if is_blank(&self.template_id) {
            missing.push("template_id");
        }
        if is_blank(&self.public_key) {
            missing.push("public_key");
        }
        missing
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

#[derive(Serialize, Debug)]
struct TemplateParams<'a> {
    from_name: &'a str,
    from_email: &'a str,
    reply_to: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    to_email: Option<&'a str>,
    subject: &'a str,
    message: &'a str,
}

/// The request body for `POST /email/send`
#[derive(Serialize, Debug)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: TemplateParams<'a>,
}

pub struct EmailJsGateway {
    settings: EmailJsSettings,
    base_url: String,
    client: reqwest::Client,
}

impl EmailJsGateway {
    /// Creates a new EmailJS gateway.
    ///
    /// # Arguments
    /// * `settings` - Account identifiers and keys
    /// * `base_url` - Optional custom base URL (defaults to EmailJS's API)
    pub fn new(settings: EmailJsSettings, base_url: Option<String>) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_EMAILJS_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Self {
            settings,
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_request<'a>(&'a self, draft: &'a DraftMessage) -> Result<SendRequest<'a>, GatewayError> {
        let missing = self.settings.missing();
        if !missing.is_empty() {
            return Err(GatewayError::Config(format!(
                "missing EmailJS setting(s): {}",
                missing.join(", ")
            )));
        }

        Ok(SendRequest {
            service_id: self.settings.service_id.as_deref().unwrap_or_default(),
            template_id: self.settings.template_id.as_deref().unwrap_or_default(),
            user_id: self.settings.public_key.as_deref().unwrap_or_default(),
            access_token: self.settings.private_key.as_deref().filter(|k| !k.is_empty()),
            template_params: TemplateParams {
                from_name: &draft.email,
                from_email: &draft.email,
                reply_to: &draft.email,
                to_email: self.settings.to_email.as_deref().filter(|e| !e.is_empty()),
                subject: &draft.subject,
                message: &draft.message,
            },
        })
    }
}

#[async_trait]
impl EmailGateway for EmailJsGateway {
    fn name(&self) -> &str {
        "emailjs"
    }

    async fn send(&self, draft: &DraftMessage) -> Result<(), GatewayError> {
        let request = self.build_request(draft)?;
        info!(
            "Sending EmailJS request (service={}, template={}, subject_len={}, message_len={})",
            request.service_id,
            request.template_id,
            draft.subject.len(),
            draft.message.len()
        );

        let response = self
            .client
            .post(format!("{}/email/send", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        debug!("EmailJS response status: {}", status);

        if status != 200 {
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("EmailJS API error: {} - {}", status, err_body);
            return Err(GatewayError::Api {
                status,
                message: err_body,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_settings() -> EmailJsSettings {
        EmailJsSettings {
            service_id: Some("service_x".into()),
            template_id: Some("template_y".into()),
            public_key: Some("pub_z".into()),
            private_key: None,
            to_email: Some("owner@example.com".into()),
        }
    }

    fn draft() -> DraftMessage {
        DraftMessage {
            email: "a@b.com".into(),
            subject: "hello".into(),
            message: "hi there".into(),
        }
    }

    #[test]
    fn test_missing_lists_blank_settings() {
        let settings = EmailJsSettings {
            service_id: Some("  ".into()),
            public_key: Some("pub".into()),
            ..Default::default()
        };
        assert_eq!(settings.missing(), vec!["service_id", "template_id"]);
        assert!(full_settings().missing().is_empty());
    }

    #[test]
    fn test_request_shape() {
        let gateway = EmailJsGateway::new(full_settings(), None);
        let draft = draft();
        let request = gateway.build_request(&draft).unwrap();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["service_id"], "service_x");
        assert_eq!(json["user_id"], "pub_z");
        assert!(json.get("accessToken").is_none());
        assert_eq!(json["template_params"]["from_email"], "a@b.com");
        assert_eq!(json["template_params"]["reply_to"], "a@b.com");
        assert_eq!(json["template_params"]["to_email"], "owner@example.com");
        assert_eq!(json["template_params"]["subject"], "hello");
        assert_eq!(json["template_params"]["message"], "hi there");
    }

    #[test]
    fn test_private_key_sent_as_access_token() {
        let settings = EmailJsSettings {
            private_key: Some("secret".into()),
            ..full_settings()
        };
        let gateway = EmailJsGateway::new(settings, None);
        let draft = draft();
        let json = serde_json::to_value(gateway.build_request(&draft).unwrap()).unwrap();
        assert_eq!(json["accessToken"], "secret");
    }

    #[test]
    fn test_missing_settings_is_config_error() {
        let gateway = EmailJsGateway::new(EmailJsSettings::default(), None);
        let draft = draft();
        assert!(matches!(
            gateway.build_request(&draft),
            Err(GatewayError::Config(_))
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let gateway = EmailJsGateway::new(full_settings(), Some("http://localhost:9000/".into()));
        assert_eq!(gateway.base_url(), "http://localhost:9000");
        let default = EmailJsGateway::new(full_settings(), None);
        assert_eq!(default.base_url(), DEFAULT_EMAILJS_BASE_URL);
    }
}
