//! UI-ready rendering of a notification decision
//!
//! Rendering never looks past `hide_preview`: when previews are hidden the body
//! is the configured placeholder, whatever the interaction holds.

use crate::decision::NotificationDecision;
use herald_core::ReceiverConfig;
use serde::{Deserialize, Serialize};

/// What the OS notification layer should show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPresentation {
    /// Notification title
    pub title: String,
    /// Notification body, absent when the notification is suppressed
    pub body: Option<String>,
    /// Play sound / show banner
    pub audible: bool,
    /// Do not show anything
    pub suppressed: bool,
}

impl NotificationPresentation {
    pub(crate) fn render(decision: &NotificationDecision, config: &ReceiverConfig) -> Self {
        let suppressed = decision.is_suppressed();
        let body = if suppressed {
            None
        } else if decision.hide_preview {
            Some(config.hidden_preview_body.clone())
        } else {
            Some(
                decision
                    .interaction
                    .text()
                    .map_or_else(|| config.hidden_preview_body.clone(), str::to_owned),
            )
        };

        Self {
            title: config.fallback_title.clone(),
            body,
            audible: decision.should_alert(),
            suppressed,
        }
    }
}
