//! Prompt theme for interactive pickers

use console::Style;
use dialoguer::theme::Theme;
use std::fmt;

/// Design system colors
#[cfg_attr(not(feature = "tui"), allow(dead_code))]
pub mod colors {
    pub const PRIMARY: (u8, u8, u8) = (100, 181, 246);      // #64B5F6
    pub const SUCCESS: (u8, u8, u8) = (165, 214, 167);      // #A5D6A7
    pub const WARNING: (u8, u8, u8) = (255, 202, 40);       // #FFCA28
    pub const ERROR: (u8, u8, u8) = (239, 154, 154);        // #EF9A9A
    pub const MUTED: (u8, u8, u8) = (84, 110, 122);         // #546E7A
    pub const FG: (u8, u8, u8) = (212, 212, 215);           // #D4D4D7
}

/// Dialoguer theme matching the renderer's palette
pub struct SearchTheme {
    pub prompt_style: Style,
    pub active_style: Style,
    pub inactive_style: Style,
    pub hint_style: Style,
    pub success_style: Style,
    pub error_style: Style,
    pub active_prefix: String,
    pub inactive_prefix: String,
    pub prompt_prefix: String,
    pub success_prefix: String,
}

impl Default for SearchTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchTheme {
    pub fn new() -> Self {
        // The picker runs on terminals without truecolor, so `colors` is mapped
        // onto the nearest xterm-256 entries: blue titles, amber cursor row
        Self {
            prompt_style: Style::new().fg(console::Color::Color256(117)).bold(),
            active_style: Style::new().fg(console::Color::Color256(220)).bold(),
            inactive_style: Style::new().fg(console::Color::Color256(252)),
            hint_style: Style::new().fg(console::Color::Color256(242)),
            success_style: Style::new().fg(console::Color::Color256(114)),
            error_style: Style::new().fg(console::Color::Color256(210)),
            active_prefix: "❯ ".to_string(),
            inactive_prefix: "  ".to_string(),
            prompt_prefix: "󰍉 ".to_string(),
            success_prefix: "✓ ".to_string(),
        }
    }
}

impl Theme for SearchTheme {
    fn format_prompt(&self, f: &mut dyn fmt::Write, prompt: &str) -> fmt::Result {
        write!(
            f,
            "{}{} {}",
            self.prompt_style.apply_to(&self.prompt_prefix),
            self.prompt_style.apply_to(prompt),
            self.hint_style.apply_to("(↑↓ navigate, enter search, esc cancel)")
        )
    }

    fn format_error(&self, f: &mut dyn fmt::Write, err: &str) -> fmt::Result {
        write!(f, "{}", self.error_style.apply_to(err))
    }

    fn format_select_prompt(&self, f: &mut dyn fmt::Write, prompt: &str) -> fmt::Result {
        self.format_prompt(f, prompt)
    }

    fn format_select_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        sel: &str,
    ) -> fmt::Result {
        write!(
            f,
            "{}{}: {}",
            self.success_style.apply_to(&self.success_prefix),
            self.prompt_style.apply_to(prompt),
            self.success_style.apply_to(sel)
        )
    }

    fn format_select_prompt_item(
        &self,
        f: &mut dyn fmt::Write,
        text: &str,
        active: bool,
    ) -> fmt::Result {
        if active {
            write!(
                f,
                "{}{}",
                self.active_style.apply_to(&self.active_prefix),
                self.active_style.apply_to(text)
            )
        } else {
            write!(f, "{}{}", self.inactive_prefix, self.inactive_style.apply_to(text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_line_contains_choice() {
        let theme = SearchTheme::new();
        let mut line = String::new();
        theme
            .format_select_prompt_selection(&mut line, "Example", "websockets")
            .unwrap();
        assert!(line.contains("Example"));
        assert!(line.contains("websockets"));
    }

    #[test]
    fn test_active_item_has_cursor() {
        let theme = SearchTheme::new();
        let mut line = String::new();
        theme.format_select_prompt_item(&mut line, "websockets", true).unwrap();
        assert!(line.contains("❯ "));
        assert!(line.contains("websockets"));
    }

    #[test]
    fn test_inactive_item_has_no_cursor() {
        let theme = SearchTheme::new();
        let mut line = String::new();
        theme.format_select_prompt_item(&mut line, "graphql observability", false).unwrap();
        assert!(!line.contains('❯'));
        assert!(line.starts_with("  "));
    }
}
