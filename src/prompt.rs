//! Single-select prompt capability
//!
//! The launch flow hands a prompt an ordered menu and gets back the value of
//! the chosen entry, or `None` if the user backed out.

use dialoguer::{theme::ColorfulTheme, Select};
use emus_core::{EmusError, Result};
use tracing::debug;

/// One row of a menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry<T> {
    Choice { label: String, value: T },
    /// Visual break; never selectable
    Separator,
}

impl<T> MenuEntry<T> {
    pub fn choice(label: impl Into<String>, value: T) -> Self {
        MenuEntry::Choice {
            label: label.into(),
            value,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            MenuEntry::Choice { label, .. } => Some(label),
            MenuEntry::Separator => None,
        }
    }
}

fn choices<T>(entries: &[MenuEntry<T>]) -> Vec<(&str, &T)> {
    entries
        .iter()
        .filter_map(|entry| match entry {
            MenuEntry::Choice { label, value } => Some((label.as_str(), value)),
            MenuEntry::Separator => None,
        })
        .collect()
}

/// Something that can ask the user to pick one menu entry
pub trait Prompt {
    /// Blocks until a choice is made. `Ok(None)` means the prompt was cancelled.
    fn select<T: Clone>(&self, message: &str, entries: &[MenuEntry<T>]) -> Result<Option<T>>;
}

/// Arrow-key menu on the controlling terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn select<T: Clone>(&self, message: &str, entries: &[MenuEntry<T>]) -> Result<Option<T>> {
        let choices = choices(entries);
        if choices.is_empty() {
            return Ok(None);
        }

        let labels: Vec<&str> = choices.iter().map(|(label, _)| *label).collect();
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .items(&labels)
            .default(0)
            .interact_opt()
            .map_err(|e| EmusError::Prompt(e.to_string()))?;

        debug!("Prompt {:?} answered with {:?}", message, selection);
        Ok(selection.map(|index| choices[index].1.clone()))
    }
}

/// Non-interactive stand-in that always takes the first choice
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstChoicePrompt;

impl Prompt for FirstChoicePrompt {
    fn select<T: Clone>(&self, message: &str, entries: &[MenuEntry<T>]) -> Result<Option<T>> {
        let first = choices(entries).into_iter().next();
        if let Some((label, _)) = first {
            println!("{} {}", message, label);
        }
        Ok(first.map(|(_, value)| value.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_choice_skips_separators() {
        let entries = vec![
            MenuEntry::Separator,
            MenuEntry::choice("Pixel_5", 1),
            MenuEntry::choice("Exit", 2),
        ];
        assert_eq!(FirstChoicePrompt.select("Pick:", &entries).unwrap(), Some(1));
    }

    #[test]
    fn test_first_choice_on_empty_menu() {
        let entries: Vec<MenuEntry<u8>> = vec![MenuEntry::Separator];
        assert_eq!(FirstChoicePrompt.select("Pick:", &entries).unwrap(), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(MenuEntry::choice("Exit", ()).label(), Some("Exit"));
        assert_eq!(MenuEntry::<()>::Separator.label(), None);
    }
}
