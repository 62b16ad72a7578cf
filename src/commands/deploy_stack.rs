use clap::Parser;

use crate::commands::Command;
use crate::environment;
use crate::error::Result;
use crate::host::Host;
use crate::log_status;
use crate::process::{argv, ProcessRunner};

/// The compose file always lands under this name on the manager,
/// whatever the local `-c` file is called.
const REMOTE_CONFIG_NAME: &str = "docker-compose.prod.yml";

/// Deploy or update a stack, using docker stack deploy.
#[derive(Parser)]
#[command(name = "deploy-stack")]
pub struct DeployStack {
    /// Manager address
    pub manager: String,

    /// Stack name
    pub name: String,

    /// Stack description in docker-compose format
    #[arg(short = 'c', long = "config", default_value = "docker-compose.prod.yml")]
    pub config: String,

    /// Extra arguments passed verbatim to `docker stack deploy`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub remainder: Vec<String>,
}

impl DeployStack {
    fn stack_path(&self) -> String {
        format!("{}/{}", environment::stack_root(), self.name)
    }

    fn stack_config_path(&self) -> String {
        format!("{}/{}", self.stack_path(), REMOTE_CONFIG_NAME)
    }
}

impl Command for DeployStack {
    fn handle(&self, runner: &dyn ProcessRunner) -> Result<()> {
        let host = Host::new(&*self.manager, runner);
        let config_path = self.stack_config_path();

        log_status!("deploy", "Deploying stack {} on {}", self.name, host);

        host.run(&argv(["mkdir", "-p", &self.stack_path()]))?;
        host.copy_file(&self.config, &config_path)?;

        let mut args = argv(["docker", "stack", "deploy", "--prune", "-c", &config_path]);
        args.extend(self.remainder.iter().cloned());
        args.push(self.name.clone());

        host.run(&args)
    }
}
