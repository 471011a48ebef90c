use std::{
    collections::BTreeMap,
    env,
    fs,
    path::PathBuf,
};
use reedline::{Completer, Span, Suggestion};

use crate::mnemonics;

/// Completes the first token from the mnemonic table and `PATH`, later
/// tokens from the file system.
pub struct ShellCompleter {
    /// Command name to optional description.
    commands: BTreeMap<String, Option<String>>,
}

impl ShellCompleter {
    pub fn new() -> Self {
        let mut commands: BTreeMap<String, Option<String>> = load_path_commands()
            .into_iter()
            .map(|cmd| (cmd, None))
            .collect();
        commands.extend(mnemonic_commands());
        Self { commands }
    }

    /// Completer over a fixed command list, no `PATH` scan.
    pub fn with_commands<I: IntoIterator<Item = String>>(extra: I) -> Self {
        let mut commands: BTreeMap<String, Option<String>> =
            extra.into_iter().map(|cmd| (cmd, None)).collect();
        commands.extend(mnemonic_commands());
        Self { commands }
    }

    /// Handle file/directory completions
    fn complete_files(&self, current: &str, span: Span) -> Vec<Suggestion> {
        let last_slash = current.rfind('/').map_or(0, |i| i + 1);
        let (base, partial) = current.split_at(last_slash);

        let base_dir = if base.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(base)
        };

        let partial_span = Span::new(span.start + last_slash, span.end);

        let Ok(reader) = fs::read_dir(&base_dir) else {
            return Vec::new();
        };

        let mut suggestions: Vec<Suggestion> = reader
            .flatten()
            .filter_map(|entry| {
                let file_name = entry.file_name();
                let name = file_name.to_str()?;

                // Skip hidden files unless explicitly requested
                if !partial.starts_with('.') && name.starts_with('.') {
                    return None;
                }
                if !name.starts_with(partial) {
                    return None;
                }

                let is_dir = entry.path().is_dir();
                let value = if is_dir {
                    format!("{name}/")
                } else {
                    name.to_string()
                };

                Some(Suggestion {
                    value,
                    span: partial_span,
                    append_whitespace: !is_dir,
                    ..Default::default()
                })
            })
            .collect();
        suggestions.sort_by(|a, b| a.value.cmp(&b.value));
        suggestions
    }
}

impl Default for ShellCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl Completer for ShellCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let line = &line[..pos];
        let last_sep = line
            .rfind([' ', ',', '\t'])
            .map(|i| i + 1)
            .unwrap_or(0);
        let span = Span::new(last_sep, pos);
        let current_word = &line[last_sep..pos];
        let first_token = line[..last_sep].trim_matches([' ', ',', '\t']).is_empty();

        // Complete commands at beginning
        if first_token {
            return self
                .commands
                .iter()
                .filter(|(cmd, _)| cmd.starts_with(current_word))
                .map(|(cmd, description)| Suggestion {
                    value: cmd.clone(),
                    description: description.clone(),
                    span,
                    append_whitespace: true,
                    ..Default::default()
                })
                .collect();
        }

        self.complete_files(current_word, span)
    }
}

fn mnemonic_commands() -> impl Iterator<Item = (String, Option<String>)> {
    mnemonics::sorted()
        .into_iter()
        .map(|(key, entry)| (key.to_string(), Some(entry.description.to_string())))
}

fn load_path_commands() -> Vec<String> {
    let Some(path_var) = env::var_os("PATH") else {
        return Vec::new();
    };
    env::split_paths(&path_var)
        .flat_map(|dir| fs::read_dir(dir).ok().into_iter().flatten())
        .filter_map(|entry| entry.ok().and_then(|e| e.file_name().to_str().map(str::to_string)))
        .collect()
}

/// Create default completer instance
pub fn create_default_completer() -> Box<dyn Completer> {
    Box::new(ShellCompleter::new())
}
