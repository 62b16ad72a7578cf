//! Subprocess execution primitives with consistent error handling.

use std::process::Command;

use crate::error::{Error, Result};

/// Executes argument vectors as subprocesses.
///
/// Every side effect in deckhand goes through this trait (directly or via
/// [`crate::host::Host`]), so tests can swap in a recording implementation.
pub trait ProcessRunner {
    /// Run a command, streaming its output to the terminal.
    /// A non-zero exit status is an error.
    fn run(&self, args: &[String]) -> Result<()>;

    /// Run a command and capture its stdout as text.
    /// A non-zero exit status is an error carrying the command's stderr.
    fn output(&self, args: &[String]) -> Result<String>;
}

/// The real runner, backed by `std::process::Command`.
pub struct SystemRunner;

impl SystemRunner {
    fn command(args: &[String]) -> Result<Command> {
        let (program, rest) = args
            .split_first()
            .ok_or_else(|| Error::config("Cannot run an empty command"))?;

        let mut command = Command::new(program);
        command.args(rest);
        Ok(command)
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, args: &[String]) -> Result<()> {
        let status = Self::command(args)?.status()?;

        if !status.success() {
            return Err(Error::process(args, status.code().unwrap_or(-1), None));
        }

        Ok(())
    }

    fn output(&self, args: &[String]) -> Result<String> {
        let output = Self::command(args)?.output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(Error::process(
                args,
                output.status.code().unwrap_or(-1),
                Some(stderr),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    use super::ProcessRunner;
    use crate::error::{Error, Result};

    /// Records every invocation, plays back scripted stdout, and can be
    /// told to fail a specific invocation.
    pub struct FakeRunner {
        calls: RefCell<Vec<Vec<String>>>,
        outputs: RefCell<VecDeque<String>>,
        failing_call: Cell<Option<usize>>,
    }

    impl FakeRunner {
        pub fn new() -> Self {
            Self::with_outputs(&[])
        }

        pub fn with_outputs(outputs: &[&str]) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                outputs: RefCell::new(outputs.iter().map(|s| s.to_string()).collect()),
                failing_call: Cell::new(None),
            }
        }

        /// Make the `index`-th invocation (0-based, counting every call)
        /// exit non-zero.
        pub fn fail_on_call(&self, index: usize) {
            self.failing_call.set(Some(index));
        }

        pub fn calls(&self) -> Vec<Vec<String>> {
            self.calls.borrow().clone()
        }

        fn record(&self, args: &[String]) -> Result<()> {
            self.calls.borrow_mut().push(args.to_vec());

            if self.failing_call.get() == Some(self.calls.borrow().len() - 1) {
                return Err(Error::process(args, 1, None));
            }

            Ok(())
        }
    }

    impl ProcessRunner for FakeRunner {
        fn run(&self, args: &[String]) -> Result<()> {
            self.record(args)
        }

        fn output(&self, args: &[String]) -> Result<String> {
            self.record(args)?;
            Ok(self.outputs.borrow_mut().pop_front().unwrap_or_default())
        }
    }
}

/// Convenience for building argument vectors from mixed string types.
pub fn argv<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    args.into_iter().map(Into::into).collect()
}
