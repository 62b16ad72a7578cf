use clap::Parser;

use crate::commands::Command;
use crate::error::Result;
use crate::host::Host;
use crate::log_status;
use crate::process::{argv, ProcessRunner};
use crate::stack::matching_services;

/// Update an image in a running stack.
#[derive(Parser)]
#[command(name = "update-image")]
pub struct UpdateImage {
    /// Manager address
    pub manager: String,

    /// Stack name
    pub name: String,

    /// Image name
    pub image: String,

    /// Extra arguments passed verbatim to `docker service update`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub remainder: Vec<String>,
}

impl Command for UpdateImage {
    fn handle(&self, runner: &dyn ProcessRunner) -> Result<()> {
        let host = Host::new(&*self.manager, runner);

        // Updates run one by one, in orchestrator order; the first
        // failure aborts the rest. Zero matches is a no-op, not an error.
        for service in matching_services(&host, &self.name, &self.image)? {
            log_status!("update", "Updating {} to image {}", service, self.image);

            let mut args = argv([
                "docker",
                "service",
                "update",
                "--with-registry-auth",
                "--image",
                &self.image,
            ]);
            args.extend(self.remainder.iter().cloned());
            args.push(service);

            host.run(&args)?;
        }

        Ok(())
    }
}
