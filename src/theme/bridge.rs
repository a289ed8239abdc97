//! Light/dark preference and the handshake with the embedded comments widget
//!
//! The comments widget lives in its own frame and has its own theme names, so
//! switching the site theme means posting a `set-theme` message to that frame
//! with the widget's name for the new preference.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::CommentsConfig;

/// Message type understood by the widget frame
pub const SET_THEME: &str = "set-theme";

/// Target origin used when posting to the widget frame
pub const TARGET_ORIGIN: &str = "*";

/// Site-wide colour scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn toggle(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            other => Err(format!("unknown theme {:?} (expected light or dark)", other)),
        }
    }
}

/// The widget's theme names for each site preference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetThemes {
    pub light: String,
    pub dark: String,
}

impl WidgetThemes {
    pub fn for_preference(&self, preference: ThemePreference) -> &str {
        match preference {
            ThemePreference::Light => &self.light,
            ThemePreference::Dark => &self.dark,
        }
    }
}

impl From<&CommentsConfig> for WidgetThemes {
    fn from(config: &CommentsConfig) -> Self {
        Self {
            light: config.theme.clone(),
            dark: config.dark_theme.clone(),
        }
    }
}

/// Payload posted to the widget frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub theme: String,
}

impl ThemeMessage {
    pub fn set_theme(theme: &str) -> Self {
        Self {
            kind: SET_THEME.to_string(),
            theme: theme.to_string(),
        }
    }
}

/// Handle on an embedded widget frame
pub trait WidgetFrame {
    /// Whether the frame is mounted and able to receive messages
    fn is_ready(&self) -> bool;

    /// Post a message without waiting for any acknowledgement
    fn post_message(&self, message: &ThemeMessage, target_origin: &str);
}

/// Tell the widget about a new preference
///
/// Returns whether a message was posted. A missing or not-yet-ready frame is
/// skipped: the widget is mounted lazily and picks the theme up on load.
pub fn notify_embedded_widget(
    preference: ThemePreference,
    frame: Option<&dyn WidgetFrame>,
    themes: &WidgetThemes,
) -> bool {
    let Some(frame) = frame.filter(|f| f.is_ready()) else {
        tracing::debug!("Comments widget not mounted, skipping theme sync");
        return false;
    };

    let message = ThemeMessage::set_theme(themes.for_preference(preference));
    frame.post_message(&message, TARGET_ORIGIN);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingFrame {
        ready: bool,
        sent: RefCell<Vec<(ThemeMessage, String)>>,
    }

    impl WidgetFrame for RecordingFrame {
        fn is_ready(&self) -> bool {
            self.ready
        }

        fn post_message(&self, message: &ThemeMessage, target_origin: &str) {
            self.sent
                .borrow_mut()
                .push((message.clone(), target_origin.to_string()));
        }
    }

    fn themes() -> WidgetThemes {
        WidgetThemes::from(&CommentsConfig::default())
    }

    #[test]
    fn test_toggle_is_an_involution() {
        for pref in [ThemePreference::Light, ThemePreference::Dark] {
            assert_ne!(pref.toggle(), pref);
            assert_eq!(pref.toggle().toggle(), pref);
        }
        assert_eq!(ThemePreference::Light.toggle(), ThemePreference::Dark);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("Dark".parse::<ThemePreference>(), Ok(ThemePreference::Dark));
        assert_eq!(ThemePreference::Light.to_string(), "light");
        assert!("sepia".parse::<ThemePreference>().is_err());
    }

    #[test]
    fn test_message_payload() {
        let message = ThemeMessage::set_theme("github-dark");
        assert_eq!(
            serde_json::to_string(&message).unwrap(),
            r#"{"type":"set-theme","theme":"github-dark"}"#
        );
    }

    #[test]
    fn test_notify_ready_frame() {
        let frame = RecordingFrame {
            ready: true,
            ..RecordingFrame::default()
        };
        assert!(notify_embedded_widget(
            ThemePreference::Dark,
            Some(&frame),
            &themes()
        ));

        let sent = frame.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, ThemeMessage::set_theme("github-dark"));
        assert_eq!(sent[0].1, "*");
    }

    #[test]
    fn test_notify_skips_absent_or_unready_frame() {
        assert!(!notify_embedded_widget(ThemePreference::Dark, None, &themes()));

        let frame = RecordingFrame::default();
        assert!(!notify_embedded_widget(
            ThemePreference::Light,
            Some(&frame),
            &themes()
        ));
        assert!(frame.sent.borrow().is_empty());
    }
}
