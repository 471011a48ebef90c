use crate::mnemonics;

/// Program names the launcher handles itself instead of spawning.
pub const EXIT: &str = "exit";
pub const HELP: &str = "help";

pub fn help() -> String {
    let mut text = String::from("\tList of commands:\n");
    for (_, entry) in mnemonics::sorted() {
        text.push_str(&format!("{:<20} {}\n", entry.usage, entry.description));
    }
    text
}
