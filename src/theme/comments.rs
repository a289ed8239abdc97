//! utterances comments embed

use super::bridge::{ThemePreference, WidgetThemes};
use crate::config::CommentsConfig;
use crate::helpers::html_escape;

/// Class of the iframe utterances injects, used by the page script to find it
pub const FRAME_CLASS: &str = "utterances-frame";

/// The `<script>` tag that mounts the widget, `None` when comments are off
pub fn embed_script(config: &CommentsConfig, preference: ThemePreference) -> Option<String> {
    if !config.enable || config.repo.is_empty() {
        return None;
    }

    let themes = WidgetThemes::from(config);
    Some(format!(
        r#"<script src="{}" repo="{}" issue-term="{}" label="{}" theme="{}" crossorigin="anonymous" async></script>"#,
        html_escape(&config.script_src),
        html_escape(&config.repo),
        html_escape(&config.issue_term),
        html_escape(&config.label),
        html_escape(themes.for_preference(preference)),
    ))
}
