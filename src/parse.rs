use crate::mnemonics::{self, Banner};

/// Name carried by the command produced for a blank line.
pub const NOOP: &str = "";

/// Characters that separate tokens on the input line.
const DELIMITERS: &[char] = &[' ', ',', '\t', '\n', '\r'];

/// One parsed user request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    /// Program handed to exec.
    pub name: String,
    /// Tokens as typed, followed by any fixed arguments from the table.
    pub arguments: Vec<String>,
    pub background: bool,
    pub banner: Banner,
}

impl Command {
    pub fn is_noop(&self) -> bool {
        self.name == NOOP
    }

    /// Number of arguments, not counting the program slot.
    pub fn argc(&self) -> usize {
        self.arguments.len().saturating_sub(1)
    }

    /// Argument vector for exec: slot 0 holds the resolved program name.
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.name.as_str())
            .chain(self.arguments.iter().skip(1).map(String::as_str))
            .collect()
    }

    pub fn reset(&mut self) {
        *self = Command::default();
    }
}

/// Split a raw line on delimiter runs.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split(DELIMITERS)
        .filter(|tok| !tok.is_empty())
        .map(str::to_string)
        .collect()
}

/// Turn a raw input line into a command. Never fails: unknown first tokens
/// are executed literally.
pub fn resolve(line: &str) -> Command {
    let mut tokens = tokenize(line);
    let Some(first) = tokens.first() else {
        return Command::default();
    };

    let command = match mnemonics::lookup(first) {
        Some(entry) => {
            let name = entry.program.to_string();
            tokens.extend(entry.extra_args.iter().map(|arg| arg.to_string()));
            Command {
                name,
                arguments: tokens,
                background: entry.background,
                banner: entry.banner,
            }
        }
        None => Command {
            name: first.clone(),
            arguments: tokens,
            background: false,
            banner: Banner::None,
        },
    };

    tracing::debug!(
        name = %command.name,
        argc = command.argc(),
        background = command.background,
        "resolved command"
    );
    command
}
