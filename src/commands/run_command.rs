use clap::Parser;

use crate::commands::Command;
use crate::error::Result;
use crate::host::Host;
use crate::process::{argv, ProcessRunner};
use crate::stack::service_env;

/// Run a one-off command in a container on the manager.
#[derive(Parser)]
#[command(name = "run-command")]
pub struct RunCommand {
    /// Manager address
    pub manager: String,

    /// Command to run within the container
    pub command: String,

    /// Image to run the command in
    #[arg(short = 'i', long = "image")]
    pub image: String,

    /// Take environment variables from the specified running service
    #[arg(long = "env-from")]
    pub env_from: Option<String>,

    /// Extra arguments passed verbatim to the command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub remainder: Vec<String>,
}

impl Command for RunCommand {
    fn handle(&self, runner: &dyn ProcessRunner) -> Result<()> {
        let host = Host::new(&*self.manager, runner);

        let env = match &self.env_from {
            Some(service) => service_env(&host, service)?,
            None => Vec::new(),
        };

        let mut args = argv(["docker", "run", "-t"]);
        args.extend(env.iter().map(|entry| format!("-e{entry}")));
        args.push(self.image.clone());
        args.push(self.command.clone());
        args.extend(self.remainder.iter().cloned());

        host.run(&args)
    }
}
