//! Platform-specific key bindings

use crossterm::event::{KeyEvent, KeyModifiers};

/// Modifier for wizard shortcuts
/// - macOS: SUPER (Cmd key), Ctrl also accepted
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Continue to the next step, or submit on the last one.
/// Ctrl+S works on all platforms.
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

#[cfg(target_os = "macos")]
pub const ADD_RECORD_SHORTCUT: &str = "Cmd+A";

#[cfg(not(target_os = "macos"))]
pub const ADD_RECORD_SHORTCUT: &str = "Ctrl+A";

#[cfg(target_os = "macos")]
pub const REMOVE_RECORD_SHORTCUT: &str = "Cmd+D";

#[cfg(not(target_os = "macos"))]
pub const REMOVE_RECORD_SHORTCUT: &str = "Ctrl+D";

#[cfg(target_os = "macos")]
pub const EARLY_ACCESS_SHORTCUT: &str = "Cmd+E";

#[cfg(not(target_os = "macos"))]
pub const EARLY_ACCESS_SHORTCUT: &str = "Ctrl+E";

/// Whether `key` carries the shortcut modifier (Ctrl is always accepted)
pub fn is_shortcut(key: &KeyEvent) -> bool {
    key.modifiers.contains(SHORTCUT_MODIFIER) || key.modifiers.contains(KeyModifiers::CONTROL)
}
