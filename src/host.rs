//! A command-execution target, local or reached over SSH.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::process::ProcessRunner;

/// The sentinel address meaning "run everything in place".
const LOCALHOST: &str = "localhost";

/// Represents a host you can run commands on.
///
/// When the address is the localhost sentinel, argument vectors run as-is;
/// otherwise they are wrapped in an `ssh <address>` invocation. Every
/// operation spawns exactly one subprocess — there is no session to hold.
pub struct Host<'r> {
    address: String,
    runner: &'r dyn ProcessRunner,
}

impl<'r> Host<'r> {
    pub fn new(address: impl Into<String>, runner: &'r dyn ProcessRunner) -> Self {
        Self {
            address: address.into(),
            runner,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn is_local(&self) -> bool {
        self.address == LOCALHOST
    }

    /// Assemble the final argument vector. This is the single place where
    /// the local/remote branch happens.
    fn command(&self, args: &[String]) -> Vec<String> {
        if self.is_local() {
            return args.to_vec();
        }

        let mut wrapped = Vec::with_capacity(args.len() + 2);
        wrapped.push("ssh".to_string());
        wrapped.push(self.address.clone());
        wrapped.extend(args.iter().cloned());
        wrapped
    }

    /// Run a command on the host for its side effect.
    pub fn run(&self, args: &[String]) -> Result<()> {
        self.runner.run(&self.command(args))
    }

    /// Run a command on the host and return its stdout as non-empty lines.
    pub fn capture_lines(&self, args: &[String]) -> Result<Vec<String>> {
        let output = self.runner.output(&self.command(args))?;

        Ok(output
            .split('\n')
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Run a command on the host and parse its stdout as JSON.
    pub fn capture_json(&self, args: &[String]) -> Result<Value> {
        let raw = self.capture_lines(args)?.concat();

        serde_json::from_str(&raw).map_err(|source| Error::parse(args, source))
    }

    /// Copy a local file to the host: `cp` in place, `scp` over the wire.
    pub fn copy_file(&self, local_path: &str, remote_path: &str) -> Result<()> {
        let args = if self.is_local() {
            vec![
                "cp".to_string(),
                local_path.to_string(),
                remote_path.to_string(),
            ]
        } else {
            vec![
                "scp".to_string(),
                local_path.to_string(),
                format!("{}:{}", self.address, remote_path),
            ]
        };

        self.runner.run(&args)
    }
}

impl std::fmt::Display for Host<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.address)
    }
}
