use nu_ansi_term::Color;
use reedline::{Prompt, PromptEditMode, PromptHistorySearch};
use std::borrow::Cow;

pub const DEFAULT_PROMPT: &str = "mnesh|> ";

pub struct ShellPrompt {
    text: Cow<'static, str>,
}

impl ShellPrompt {
    pub fn new(config: &crate::config::Config) -> Self {
        let text = config
            .prompt
            .as_ref()
            .map(|s| Cow::Owned(s.to_string()))
            .unwrap_or(Cow::Borrowed(DEFAULT_PROMPT));

        Self { text }
    }
}

impl Prompt for ShellPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Owned(Color::Cyan.paint(self.text.as_ref()).to_string())
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_history_search_indicator(
        &self,
        _history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        Cow::Borrowed("? ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_default_prompt_is_colored() {
        let prompt = ShellPrompt::new(&Config { prompt: None, startup: vec![] });
        let left = prompt.render_prompt_left();
        assert!(left.contains(DEFAULT_PROMPT));
        assert!(left.starts_with("\u{1b}[36m"));
    }

    #[test]
    fn test_custom_prompt() {
        let prompt = ShellPrompt::new(&Config { prompt: Some("lab> ".into()), startup: vec![] });
        assert!(prompt.render_prompt_left().contains("lab> "));
    }
}
