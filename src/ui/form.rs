//! Interactive example-query picker

use anyhow::Result;
use console::Term;
use dialoguer::Select;

use super::theme::SearchTheme;

/// A query offered in the picker
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleOption {
    pub query: String,
    /// Shown on the empty-query prompt as well
    pub featured: bool,
}

impl ExampleOption {
    pub fn new(query: impl Into<String>, featured: bool) -> Self {
        Self {
            query: query.into(),
            featured,
        }
    }

    fn display(&self) -> String {
        if self.featured {
            format!("{} (featured)", self.query)
        } else {
            self.query.clone()
        }
    }
}

pub struct ExamplePicker {
    theme: SearchTheme,
}

impl Default for ExamplePicker {
    fn default() -> Self {
        Self::new()
    }
}

impl ExamplePicker {
    pub fn new() -> Self {
        Self {
            theme: SearchTheme::new(),
        }
    }

    /// Ask for one example; `None` if the user backs out
    pub fn pick<'a>(&self, options: &'a [ExampleOption]) -> Result<Option<&'a ExampleOption>> {
        if options.is_empty() {
            return Ok(None);
        }

        let items: Vec<String> = options.iter().map(|o| o.display()).collect();
        let selection = Select::with_theme(&self.theme)
            .with_prompt("Pick an example query")
            .items(&items)
            .default(0)
            .interact_on_opt(&Term::stderr())?;

        Ok(selection.and_then(|i| options.get(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_featured_display() {
        let option = ExampleOption::new("api load testing", true);
        assert_eq!(option.display(), "api load testing (featured)");
        assert_eq!(ExampleOption::new("websockets", false).display(), "websockets");
    }

    #[test]
    fn test_pick_with_no_options() {
        let picker = ExamplePicker::new();
        assert_eq!(picker.pick(&[]).unwrap(), None);
    }
}
