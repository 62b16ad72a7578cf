use clap::Parser;

use crate::commands::Command;
use crate::environment;
use crate::error::Result;
use crate::image::{derive_label, TagMethod};
use crate::log_status;
use crate::process::{argv, ProcessRunner};

/// Build a docker image and tag it as latest.
#[derive(Parser)]
#[command(name = "build-image")]
pub struct BuildImage {
    /// Docker image label, like you/prj
    pub label: String,

    /// Build context path
    pub ctx: String,

    /// Image tagging method: 'sha1' (from the CI build) or 'date'
    #[arg(short = 't', long = "tag-method", default_value = "sha1")]
    pub tag_method: String,

    /// Extra arguments passed verbatim to `docker build`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub remainder: Vec<String>,
}

impl BuildImage {
    fn docker_build(&self, runner: &dyn ProcessRunner, label: &str) -> Result<()> {
        let mut args = argv(["docker", "build", "-t", label]);
        args.extend(self.remainder.iter().cloned());
        args.push(self.ctx.clone());

        runner.run(&args)
    }

    /// Tag the already-resolved versioned label as latest. The latest
    /// reference is derived from the resolved label, never re-resolved
    /// from the clock or the environment.
    fn tag_as_latest(&self, runner: &dyn ProcessRunner, versioned: &str) -> Result<()> {
        let latest = derive_label(versioned, Some("latest"), TagMethod::Sha1)?;
        log_status!("build", "Tagging {} as {}", versioned, latest);

        runner.run(&argv(["docker", "tag", versioned, &latest]))
    }
}

impl Command for BuildImage {
    fn check_environment(&self) -> Result<()> {
        environment::require_ci()
    }

    fn handle(&self, runner: &dyn ProcessRunner) -> Result<()> {
        let method: TagMethod = self.tag_method.parse()?;
        let label = derive_label(&self.label, None, method)?;

        log_status!("build", "Building {}", label);
        self.docker_build(runner, &label)?;

        self.tag_as_latest(runner, &label)
    }
}
