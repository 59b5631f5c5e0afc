//! Terminal front end for AyurHaven: a conversation view with a sidebar of
//! past chats, sample questions and a light/dark theme.

pub mod app;
pub mod events;
pub mod ui;

pub use app::{App, CompletionEvent};
pub use events::{handle_key_event, handle_paste};
pub use ui::{ui, Palette};
