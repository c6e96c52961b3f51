//! Minimum order settings page.
//!
//! The form is processed with Post/Redirect/Get: the POST handler stores the
//! outcome in the session and the GET handler shows it once.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, Router, extract::State, response::Redirect, routing::get};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tower_sessions::Session;
use tracing::instrument;

use order_value_bouncer_core::{
    BouncerSettings, SettingsField, keys, validate_message, validate_minimum,
};

use crate::db::RepositoryError;
use crate::db::settings::{last_updated, load_settings, set_setting};
use crate::error::Result;
use crate::middleware::RequireManageOptions;
use crate::models::{FieldError, SettingsFlash, session_keys};
use crate::state::AppState;

/// Path of the settings page.
pub const SETTINGS_PATH: &str = "/settings/minimum-order";

/// Build the settings router.
pub fn router() -> Router<AppState> {
    Router::new().route(SETTINGS_PATH, get(show).post(update))
}

// =============================================================================
// Submission
// =============================================================================

/// Submitted form fields. Missing fields are treated as empty input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsForm {
    #[serde(rename = "minimum_order_amount_minimum", default)]
    pub minimum: String,
    #[serde(rename = "minimum_order_amount_message", default)]
    pub message: String,
}

/// What a submission changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    /// Configuration in effect after the submission.
    pub settings: BouncerSettings,
    /// Fields whose input was accepted and must be written.
    pub accepted: Vec<SettingsField>,
    /// Fields whose input was rejected; their previous value is kept.
    pub errors: Vec<FieldError>,
}

impl SubmissionOutcome {
    /// Store rows for the accepted fields.
    #[must_use]
    pub fn stored_values(&self) -> Vec<(&'static str, JsonValue)> {
        self.accepted
            .iter()
            .map(|field| {
                let value = match field {
                    SettingsField::Minimum => self.settings.minimum_amount.to_stored(),
                    SettingsField::Message => self.settings.message.to_stored(),
                };
                (field.key(), value)
            })
            .collect()
    }

    /// Flash shown on the page after the redirect.
    #[must_use]
    pub fn flash(&self) -> SettingsFlash {
        SettingsFlash {
            saved: self.errors.is_empty(),
            errors: self.errors.clone(),
        }
    }
}

/// Validate each field independently against the current configuration.
#[must_use]
pub fn process_submission(current: &BouncerSettings, form: &SettingsForm) -> SubmissionOutcome {
    let mut accepted = Vec::new();
    let mut errors = Vec::new();

    let minimum_amount = match validate_minimum(&form.minimum, current.minimum_amount) {
        Ok(amount) => {
            accepted.push(SettingsField::Minimum);
            amount
        }
        Err(rejected) => {
            errors.extend(FieldError::from_error(&rejected.error));
            rejected.retained
        }
    };

    let message = match validate_message(&form.message, &current.message) {
        Ok(message) => {
            accepted.push(SettingsField::Message);
            message
        }
        Err(rejected) => {
            errors.extend(FieldError::from_error(&rejected.error));
            rejected.retained
        }
    };

    SubmissionOutcome {
        settings: BouncerSettings {
            minimum_amount,
            message,
        },
        accepted,
        errors,
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Settings page template.
#[derive(Template, WebTemplate)]
#[template(path = "settings/minimum_order.html")]
pub struct MinimumOrderTemplate {
    pub admin_name: String,
    pub minimum: String,
    pub message: String,
    pub saved: bool,
    pub errors: Vec<FieldError>,
    pub last_saved: Option<String>,
}

impl MinimumOrderTemplate {
    /// Error shown next to a field, if any.
    #[must_use]
    pub fn error_for(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field_name() == field)
    }

    /// Form field name for the minimum amount input.
    #[must_use]
    pub const fn minimum_field(&self) -> &'static str {
        keys::MINIMUM
    }

    /// Form field name for the message textarea.
    #[must_use]
    pub const fn message_field(&self) -> &'static str {
        keys::MESSAGE
    }
}

/// Render the settings page.
///
/// GET /settings/minimum-order
#[instrument(skip(state, session, admin))]
async fn show(
    State(state): State<AppState>,
    session: Session,
    RequireManageOptions(admin): RequireManageOptions,
) -> Result<MinimumOrderTemplate> {
    let settings = load_settings(state.pool()).await?;
    let last_saved = last_updated(state.pool())
        .await?
        .map(|at| at.format("%b %d, %Y %H:%M UTC").to_string());

    let flash = session
        .remove::<SettingsFlash>(session_keys::SETTINGS_FLASH)
        .await?
        .unwrap_or_default();

    Ok(MinimumOrderTemplate {
        admin_name: admin.name,
        minimum: settings.minimum_amount.to_string(),
        message: settings.message.into_inner(),
        saved: flash.saved,
        errors: flash.errors,
        last_saved,
    })
}

/// Handle a settings submission.
///
/// POST /settings/minimum-order
#[instrument(skip(state, session, admin, form))]
async fn update(
    State(state): State<AppState>,
    session: Session,
    RequireManageOptions(admin): RequireManageOptions,
    Form(form): Form<SettingsForm>,
) -> Result<Redirect> {
    let current = load_settings(state.pool()).await?;
    let outcome = process_submission(&current, &form);

    let mut tx = state.pool().begin().await.map_err(RepositoryError::from)?;
    for (key, value) in outcome.stored_values() {
        set_setting(&mut *tx, key, &value).await?;
    }
    tx.commit().await.map_err(RepositoryError::from)?;

    tracing::info!(
        admin = %admin.email,
        accepted = ?outcome.accepted,
        rejected = outcome.errors.len(),
        minimum = %outcome.settings.minimum_amount,
        "Minimum order settings submitted"
    );

    session
        .insert(session_keys::SETTINGS_FLASH, outcome.flash())
        .await?;

    Ok(Redirect::to(SETTINGS_PATH))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use order_value_bouncer_core::{CartMessage, MinimumAmount};
    use serde_json::json;

    use super::*;

    fn current() -> BouncerSettings {
        BouncerSettings {
            minimum_amount: MinimumAmount::new(50),
            message: CartMessage::parse("Spend at least 50").unwrap(),
        }
    }

    fn form(minimum: &str, message: &str) -> SettingsForm {
        SettingsForm {
            minimum: minimum.to_owned(),
            message: message.to_owned(),
        }
    }

    #[test]
    fn test_valid_submission_accepts_both_fields() {
        let outcome = process_submission(&current(), &form("75", "  <b>Spend</b> 75 "));
        assert_eq!(outcome.settings.minimum_amount, MinimumAmount::new(75));
        assert_eq!(outcome.settings.message.as_str(), "Spend 75");
        assert_eq!(
            outcome.accepted,
            vec![SettingsField::Minimum, SettingsField::Message]
        );
        assert!(outcome.errors.is_empty());
        assert!(outcome.flash().saved);
    }

    #[test]
    fn test_partial_submission_keeps_rejected_field() {
        let outcome = process_submission(&current(), &form("-5", "New message"));
        assert_eq!(outcome.settings.minimum_amount, MinimumAmount::new(50));
        assert_eq!(outcome.settings.message.as_str(), "New message");
        assert_eq!(outcome.accepted, vec![SettingsField::Message]);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].field, SettingsField::Minimum);
        assert!(!outcome.flash().saved);

        assert_eq!(
            outcome.stored_values(),
            vec![(keys::MESSAGE, json!("New message"))]
        );
    }

    #[test]
    fn test_fully_invalid_submission_writes_nothing() {
        let outcome = process_submission(&current(), &form("abc", "   "));
        assert_eq!(outcome.settings, current());
        assert!(outcome.stored_values().is_empty());
        assert_eq!(outcome.errors.len(), 2);
        assert_eq!(outcome.errors[1].message, "Message should not be empty");
    }

    #[test]
    fn test_form_field_names() {
        let form: SettingsForm = serde_json::from_value(json!({
            "minimum_order_amount_minimum": "10",
            "minimum_order_amount_message": "hi",
        }))
        .unwrap();
        assert_eq!(form.minimum, "10");
        assert_eq!(form.message, "hi");

        let empty: SettingsForm = serde_json::from_value(json!({})).unwrap();
        assert!(empty.minimum.is_empty());
    }

    #[test]
    fn test_page_escapes_stored_values() {
        let html = MinimumOrderTemplate {
            admin_name: "Ops".to_owned(),
            minimum: "50".to_owned(),
            message: "Spend \"more\" <now>".to_owned(),
            saved: false,
            errors: vec![FieldError::from_error(&order_value_bouncer_core::SettingsError::EmptyMessage).unwrap()],
            last_saved: None,
        }
        .render()
        .unwrap();

        assert!(html.contains("Order Value Bouncer"));
        assert!(html.contains("name=\"minimum_order_amount_minimum\""));
        assert!(html.contains("name=\"minimum_order_amount_message\""));
        assert!(html.contains("rows=\"5\""));
        assert!(html.contains("cols=\"50\""));
        assert!(html.contains("Message should not be empty"));
        assert!(!html.contains("<now>"));
        assert!(!html.contains("Settings saved."));
    }
}
