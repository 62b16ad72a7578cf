use std::path::{Path, PathBuf};

use clap::Parser;

use crate::commands::Command;
use crate::error::{Error, Result};
use crate::log_status;
use crate::process::{argv, ProcessRunner};

/// Install a known_hosts entry for SSH access.
#[derive(Parser)]
#[command(name = "add-host-key")]
pub struct AddHostKey {
    /// Key path
    #[arg(short = 'k', long = "key", default_value = ".circleci/known_hosts")]
    pub key: String,

    /// Overwrite an existing host key
    #[arg(long)]
    pub force: bool,
}

impl AddHostKey {
    fn destination(&self) -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::environment("Cannot determine the home directory"))?;

        Ok(home.join(".ssh").join("known_hosts"))
    }

    fn install(&self, runner: &dyn ProcessRunner, destination: &Path) -> Result<()> {
        let ssh_dir = destination
            .parent()
            .ok_or_else(|| Error::config("known_hosts destination has no parent directory"))?;

        runner.run(&argv(["mkdir", "-p", ssh_dir.to_string_lossy().as_ref()]))?;
        runner.run(&argv([
            "cp",
            self.key.as_str(),
            destination.to_string_lossy().as_ref(),
        ]))
    }
}

impl Command for AddHostKey {
    fn handle(&self, runner: &dyn ProcessRunner) -> Result<()> {
        if !Path::new(&self.key).exists() {
            return Err(Error::config(format!("{} does not exist", self.key)));
        }

        let destination = self.destination()?;
        if !self.force && destination.exists() {
            return Err(Error::config(format!(
                "{} already exists, pass --force to overwrite it",
                destination.display()
            )));
        }

        log_status!("ssh", "Installing {} to {}", self.key, destination.display());
        self.install(runner, &destination)
    }
}
