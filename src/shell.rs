use std::io::Write;

use nu_ansi_term::Color;

use crate::{
    config::Config,
    parse::{resolve, Command},
    process_exec::{launch, LaunchOutcome},
    reader::LineReader,
};

/// Where the loop is within one read-resolve-launch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Ready,
    Reading,
    Resolving,
    Launching,
    /// A forked child whose exec failed. Never left.
    FatalExit,
}

/// What the driver does after a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Exit(i32),
}

/// One shell session, owned by `main`.
pub struct Shell<W: Write> {
    config: Config,
    current: Command,
    state: State,
    out: W,
}

impl<W: Write> Shell<W> {
    pub fn new(config: Config, out: W) -> Self {
        Self {
            config,
            current: Command::default(),
            state: State::Ready,
            out,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn current(&self) -> &Command {
        &self.current
    }

    /// Run the configured startup lines. Stops early if one of them ends the
    /// shell.
    pub fn run_startup(&mut self) -> Step {
        let lines = self.config.startup.clone();
        for line in &lines {
            tracing::debug!(line = %line, "startup command");
            if let Step::Exit(code) = self.execute(line) {
                return Step::Exit(code);
            }
        }
        Step::Continue
    }

    /// Loop until the session ends and return the process exit status.
    pub fn run(&mut self, reader: &mut dyn LineReader) -> i32 {
        loop {
            if let Step::Exit(code) = self.run_cycle(reader) {
                return code;
            }
        }
    }

    pub fn run_cycle(&mut self, reader: &mut dyn LineReader) -> Step {
        self.transition(State::Reading);
        match reader.read_line() {
            Ok(Some(line)) => self.execute(&line),
            Ok(None) => {
                tracing::debug!("end of input");
                Step::Exit(0)
            }
            Err(e) => {
                report(&format!("{e:#}"));
                Step::Exit(1)
            }
        }
    }

    /// Resolve and launch one line.
    pub fn execute(&mut self, line: &str) -> Step {
        self.transition(State::Resolving);
        self.current = resolve(line);

        self.transition(State::Launching);
        let result = launch(&self.current, &mut self.out);
        self.current.reset();

        match result {
            Ok(LaunchOutcome::Exit) => Step::Exit(0),
            Ok(_) => {
                self.transition(State::Ready);
                Step::Continue
            }
            Err(e) => {
                report(&e.to_string());
                if e.is_fatal() {
                    self.transition(State::FatalExit);
                    Step::Exit(1)
                } else {
                    self.transition(State::Ready);
                    Step::Continue
                }
            }
        }
    }

    fn transition(&mut self, next: State) {
        tracing::trace!(from = ?self.state, to = ?next, "state transition");
        self.state = next;
    }
}

fn report(msg: &str) {
    eprintln!("{}", Color::Red.paint(format!("ERROR: {msg}")));
}
