use std::{collections::HashMap, env};

/// Text printed by the child right before its image is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Banner {
    #[default]
    None,
    Text(&'static str),
    /// Rendered from the working directory at launch time.
    WorkingDirectory,
}

impl Banner {
    pub fn render(&self) -> Option<String> {
        match self {
            Banner::None => None,
            Banner::Text(text) => Some((*text).to_string()),
            Banner::WorkingDirectory => {
                let cwd = env::current_dir()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "<unknown directory>".into());
                Some(format!("Contents of {cwd}:"))
            }
        }
    }
}

/// One row of the mnemonic table.
#[derive(Debug, Clone, Copy)]
pub struct Mnemonic {
    pub program: &'static str,
    pub background: bool,
    /// Appended after every user-supplied token.
    pub extra_args: &'static [&'static str],
    pub banner: Banner,
    pub usage: &'static str,
    pub description: &'static str,
}

impl Mnemonic {
    const fn foreground(
        program: &'static str,
        usage: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            program,
            background: false,
            extra_args: &[],
            banner: Banner::None,
            usage,
            description,
        }
    }
}

lazy_static::lazy_static! {
    pub static ref MNEMONICS: HashMap<&'static str, Mnemonic> = {
        let mut table = HashMap::new();
        table.insert(
            "C",
            Mnemonic::foreground(
                "cp",
                "C file1 file2",
                "Copy; create file2 and copy all bytes of file1 into it.",
            ),
        );
        table.insert("D", Mnemonic::foreground("rm", "D file", "Delete the named file."));
        table.insert(
            "E",
            Mnemonic::foreground(
                "echo",
                "E comment",
                "Echo; display comment on screen followed by a new line.",
            ),
        );
        table.insert("H", Mnemonic::foreground("help", "H", "Help; display this manual."));
        table.insert(
            "L",
            Mnemonic {
                extra_args: &["-l"],
                banner: Banner::WorkingDirectory,
                ..Mnemonic::foreground("ls", "L", "List the contents of the current directory.")
            },
        );
        table.insert(
            "M",
            Mnemonic::foreground(
                "nano",
                "M file",
                "Make; create or edit the named text file in a text editor.",
            ),
        );
        table.insert(
            "P",
            Mnemonic::foreground(
                "more",
                "P file",
                "Print; display the contents of the named file on screen.",
            ),
        );
        table.insert("Q", Mnemonic::foreground("exit", "Q", "Quit the shell."));
        table.insert(
            "S",
            Mnemonic {
                background: true,
                banner: Banner::Text("Launching web browser"),
                ..Mnemonic::foreground(
                    "firefox",
                    "S",
                    "Surf the web with a browser running in the background.",
                )
            },
        );
        table.insert("W", Mnemonic::foreground("clear", "W", "Wipe; clear the screen."));
        table
    };
}

pub fn lookup(key: &str) -> Option<&'static Mnemonic> {
    MNEMONICS.get(key)
}

/// Table entries ordered by key.
pub fn sorted() -> Vec<(&'static str, &'static Mnemonic)> {
    let mut entries: Vec<_> = MNEMONICS.iter().map(|(k, v)| (*k, v)).collect();
    entries.sort_by_key(|(k, _)| *k);
    entries
}
