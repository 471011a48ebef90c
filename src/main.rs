use std::io::{self, IsTerminal};

use nu_ansi_term::{Color, Style};
use reedline::{
    default_emacs_keybindings, ColumnarMenu, DefaultHinter, Emacs,
    KeyCode, KeyModifiers, MenuBuilder, Reedline, ReedlineEvent, ReedlineMenu,
};

use mnesh::{
    completions::create_default_completer,
    config, logging,
    prompt::ShellPrompt,
    reader::{InteractiveReader, LineReader, PipedReader},
    Shell, Step,
};

fn main() {
    if let Err(e) = logging::init_logging() {
        eprintln!("mnesh: {e:#}");
    }

    // [1] Load configuration
    let cfg = config::init();
    let prompt = ShellPrompt::new(&cfg);

    // [2] Pick the line source
    let mut reader: Box<dyn LineReader> = if io::stdin().is_terminal() {
        Box::new(InteractiveReader::new(build_editor(), prompt))
    } else {
        Box::new(PipedReader::new(io::stdin().lock()))
    };

    let mut shell = Shell::new(cfg, io::stdout());

    // [3] Startup commands, then the main loop
    let code = match shell.run_startup() {
        Step::Exit(code) => code,
        Step::Continue => shell.run(reader.as_mut()),
    };
    std::process::exit(code);
}

fn build_editor() -> Reedline {
    let menu = ReedlineMenu::EngineCompleter(Box::new(
        ColumnarMenu::default()
            .with_name("completion_menu")
            .with_column_width(Some(20)),
    ));

    let mut keybindings = default_emacs_keybindings();
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".into()),
            ReedlineEvent::MenuNext,
        ]),
    );
    keybindings.add_binding(
        KeyModifiers::SHIFT,
        KeyCode::BackTab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".into()),
            ReedlineEvent::MenuPrevious,
        ]),
    );

    // History stays in memory only.
    Reedline::create()
        .with_completer(create_default_completer())
        .with_menu(menu)
        .with_hinter(Box::new(
            DefaultHinter::default()
                .with_style(Style::new().italic().fg(Color::Rgb(120, 120, 120)))
                .with_min_chars(1),
        ))
        .with_edit_mode(Box::new(Emacs::new(keybindings)))
}
