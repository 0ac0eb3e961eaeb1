//! Calling contexts around the compositor: a debounced preview, an on-demand final render, and
//! the session record that owns both.

/// On-demand final render.
pub mod final_render;
/// Debounced preview rendering.
pub mod preview;
/// Owned editor state.
pub mod state;
