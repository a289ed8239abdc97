//! Theme module - light/dark preference and comments widget sync

mod bridge;
pub mod comments;
mod store;

pub use bridge::{
    notify_embedded_widget, ThemeMessage, ThemePreference, WidgetFrame, WidgetThemes, SET_THEME,
    TARGET_ORIGIN,
};
pub use store::{ThemeController, ThemeStore};
