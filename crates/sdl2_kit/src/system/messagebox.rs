//! Modal message boxes

use bitflags::bitflags;

use crate::backend::Video;
use crate::render::Window;

bitflags! {
    /// Message box kind and layout
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MessageBoxFlags: u32 {
        /// Error dialog
        const ERROR = 0x0000_0010;
        /// Warning dialog
        const WARNING = 0x0000_0020;
        /// Informational dialog
        const INFORMATION = 0x0000_0040;
        /// Buttons placed left to right
        const BUTTONS_LEFT_TO_RIGHT = 0x0000_0080;
        /// Buttons placed right to left
        const BUTTONS_RIGHT_TO_LEFT = 0x0000_0100;
    }
}

bitflags! {
    /// Keyboard defaults of a message box button
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ButtonFlags: u32 {
        /// Selected by the return key
        const RETURNKEY_DEFAULT = 0x0000_0001;
        /// Selected by the escape key
        const ESCAPEKEY_DEFAULT = 0x0000_0002;
    }
}

/// One button of a custom message box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBoxButton {
    /// Keyboard defaults
    pub flags: ButtonFlags,
    /// Id reported when the button is chosen
    pub id: i32,
    /// Label
    pub text: String,
}

impl MessageBoxButton {
    /// Plain button
    pub fn new(id: i32, text: impl Into<String>) -> Self {
        Self {
            flags: ButtonFlags::empty(),
            id,
            text: text.into(),
        }
    }

    /// Set the keyboard defaults
    pub fn with_flags(mut self, flags: ButtonFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// Contents of a custom message box
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageBoxData {
    /// Kind and layout
    pub flags: MessageBoxFlags,
    /// Window title
    pub title: String,
    /// Body text
    pub message: String,
    /// Buttons in display order
    pub buttons: Vec<MessageBoxButton>,
}

impl MessageBoxData {
    /// Message box without buttons
    pub fn new(flags: MessageBoxFlags, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            flags,
            title: title.into(),
            message: message.into(),
            buttons: Vec::new(),
        }
    }

    /// Append a button
    pub fn with_button(mut self, button: MessageBoxButton) -> Self {
        self.buttons.push(button);
        self
    }
}

/// Show a message box with a single OK button; blocks until dismissed
pub fn show_simple<B: Video>(flags: MessageBoxFlags, title: &str, message: &str, parent: Option<&Window<B>>) -> bool {
    B::show_simple_message_box(flags.bits(), title, message, parent.and_then(Window::raw)) == 0
}

/// Show a custom message box, returning the chosen button id
///
/// Closing the box without choosing a button reports `-1`.
pub fn show<B: Video>(data: &MessageBoxData, parent: Option<&Window<B>>) -> Option<i32> {
    let mut button = -1;
    (B::show_message_box(data, parent.and_then(Window::raw), &mut button) == 0).then_some(button)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::{self, Headless};

    #[test]
    fn test_show_simple() {
        headless::reset();
        assert!(show_simple::<Headless>(MessageBoxFlags::INFORMATION, "title", "body", None));
    }

    #[test]
    fn test_show_picks_return_key_default() {
        headless::reset();
        let data = MessageBoxData::new(MessageBoxFlags::WARNING, "Quit?", "Unsaved changes")
            .with_button(MessageBoxButton::new(1, "Cancel").with_flags(ButtonFlags::ESCAPEKEY_DEFAULT))
            .with_button(MessageBoxButton::new(2, "Quit").with_flags(ButtonFlags::RETURNKEY_DEFAULT));
        assert_eq!(show::<Headless>(&data, None), Some(2));
    }

    #[test]
    fn test_show_without_buttons_reports_closed() {
        headless::reset();
        let data = MessageBoxData::new(MessageBoxFlags::ERROR, "t", "m");
        assert_eq!(show::<Headless>(&data, None), Some(-1));
    }
}
