use std::{
    ffi::CString,
    io::{self, Write},
    ptr,
};

use libc::{execvp, fork, setsid, waitpid};

use crate::{
    builtins,
    errors::LaunchError,
    parse::Command,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// Blank line, nothing to do.
    Skipped,
    /// Help text was printed.
    Help,
    /// The user asked the shell to quit.
    Exit,
    /// Foreground child ran and was reaped.
    Completed,
    /// Background child left running.
    Detached,
}

/// Run a resolved command.
///
/// Creates at most one child. In the child this only returns if exec failed,
/// in which case the error is fatal and the caller must terminate.
pub fn launch<W: Write>(cmd: &Command, out: &mut W) -> Result<LaunchOutcome, LaunchError> {
    if cmd.is_noop() {
        return Ok(LaunchOutcome::Skipped);
    }
    match cmd.name.as_str() {
        builtins::EXIT => return Ok(LaunchOutcome::Exit),
        builtins::HELP => {
            out.write_all(builtins::help().as_bytes())
                .and_then(|()| out.flush())
                .map_err(LaunchError::Output)?;
            return Ok(LaunchOutcome::Help);
        }
        _ => {}
    }

    // Everything the child needs is built before fork.
    let program = to_cstring(&cmd.name)?;
    let args_cstr: Vec<CString> = cmd
        .argv()
        .into_iter()
        .map(to_cstring)
        .collect::<Result<_, _>>()?;
    let argv: Vec<*const libc::c_char> = args_cstr
        .iter()
        .map(|c| c.as_ptr())
        .chain(std::iter::once(ptr::null()))
        .collect();
    let banner = cmd.banner.render();

    // Anything still buffered would otherwise be written twice.
    if let Err(e) = out.flush().and_then(|()| io::stdout().flush()) {
        tracing::warn!(error = %e, "could not flush output before fork");
    }

    match unsafe { fork() } {
        -1 => Err(LaunchError::Creation(io::Error::last_os_error())),
        0 => {
            // Child process
            if cmd.background {
                unsafe { setsid(); }
            }
            if let Some(banner) = banner {
                if let Err(e) = writeln!(out, "{banner}").and_then(|()| out.flush()) {
                    tracing::warn!(error = %e, "could not print banner");
                }
            }
            unsafe { execvp(program.as_ptr(), argv.as_ptr()); }
            Err(LaunchError::Exec {
                name: cmd.name.clone(),
                source: io::Error::last_os_error(),
            })
        }
        pid => {
            // Parent process
            tracing::debug!(pid, name = %cmd.name, background = cmd.background, "spawned child");
            if cmd.background {
                writeln!(out, "[{pid}] Running in background")
                    .and_then(|()| out.flush())
                    .map_err(LaunchError::Output)?;
                return Ok(LaunchOutcome::Detached);
            }
            reap(pid)?;
            Ok(LaunchOutcome::Completed)
        }
    }
}

/// Block until the given child terminates.
fn reap(pid: libc::pid_t) -> Result<(), LaunchError> {
    let mut status = 0;
    loop {
        if unsafe { waitpid(pid, &mut status, 0) } >= 0 {
            break;
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(LaunchError::Reap { pid, source: err });
        }
    }

    if libc::WIFEXITED(status) {
        tracing::debug!(pid, code = libc::WEXITSTATUS(status), "child exited");
    } else if libc::WIFSIGNALED(status) {
        tracing::debug!(pid, signal = libc::WTERMSIG(status), "child killed by signal");
    }
    Ok(())
}

fn to_cstring(s: &str) -> Result<CString, LaunchError> {
    CString::new(s).map_err(|_| LaunchError::InvalidArgument(s.to_string()))
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::{mnemonics::Banner, parse::resolve};

    fn external(args: &[&str], background: bool) -> Command {
        Command {
            name: args[0].to_string(),
            arguments: args.iter().map(|s| s.to_string()).collect(),
            background,
            banner: Banner::None,
        }
    }

    #[test]
    fn test_noop_is_skipped() {
        let mut out = Vec::new();
        let outcome = launch(&resolve(" , \t"), &mut out).unwrap();
        assert_eq!(outcome, LaunchOutcome::Skipped);
        assert!(out.is_empty());
    }

    #[test]
    fn test_help_is_printed_in_process() {
        let mut out = Vec::new();
        let outcome = launch(&resolve("H"), &mut out).unwrap();
        assert_eq!(outcome, LaunchOutcome::Help);
        assert_eq!(String::from_utf8(out).unwrap(), builtins::help());
    }

    #[test]
    fn test_quit_is_intercepted() {
        let mut out = Vec::new();
        assert_eq!(launch(&resolve("Q"), &mut out).unwrap(), LaunchOutcome::Exit);
        assert_eq!(launch(&resolve("exit"), &mut out).unwrap(), LaunchOutcome::Exit);
    }

    #[test]
    fn test_foreground_waits_for_child() {
        let mut out = Vec::new();
        let start = Instant::now();
        let outcome = launch(&external(&["sleep", "1"], false), &mut out).unwrap();
        assert_eq!(outcome, LaunchOutcome::Completed);
        assert!(start.elapsed() >= Duration::from_millis(900));
    }

    #[test]
    fn test_background_does_not_block() {
        let mut out = Vec::new();
        let start = Instant::now();
        let outcome = launch(&external(&["sleep", "5"], true), &mut out).unwrap();
        assert_eq!(outcome, LaunchOutcome::Detached);
        assert!(start.elapsed() < Duration::from_secs(3));
        assert!(String::from_utf8(out).unwrap().contains("Running in background"));
    }

    struct ClosedOutput;

    impl Write for ClosedOutput {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_help_write_error_is_reported() {
        let err = launch(&resolve("H"), &mut ClosedOutput).unwrap_err();
        assert!(matches!(err, LaunchError::Output(_)));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_nul_byte_is_rejected_before_fork() {
        let mut out = Vec::new();
        let err = launch(&external(&["echo", "a\0b"], false), &mut out).unwrap_err();
        assert!(matches!(err, LaunchError::InvalidArgument(_)));
        assert!(!err.is_fatal());
    }
}
