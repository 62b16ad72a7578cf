use clap::Parser;

use crate::commands::Command;
use crate::environment;
use crate::error::Result;
use crate::image::{derive_label, image_is_present, split_label_and_tag, TagMethod};
use crate::log_status;
use crate::process::{argv, ProcessRunner};

/// Push a previously built image to the registry.
#[derive(Parser)]
#[command(name = "push-image")]
pub struct PushImage {
    /// Docker image label, like you/prj
    pub label: String,

    /// Accepted for CLI uniformity; `docker push` takes no extra args
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub remainder: Vec<String>,
}

impl PushImage {
    fn docker_login(&self, runner: &dyn ProcessRunner) -> Result<()> {
        let (user, password) = environment::registry_credentials()?;

        runner.run(&argv(["docker", "login", "-u", &user, "-p", &password]))
    }

    /// The references to push. An explicit tag means exactly that one.
    /// A bare label means latest — plus, under CI, the sha1-tagged
    /// reference when it exists in the local image store, so the registry
    /// ends up with both a floating and an immutable reference.
    fn labels_to_push(&self, runner: &dyn ProcessRunner) -> Result<Vec<String>> {
        let (_, tag) = split_label_and_tag(&self.label);
        if tag.is_some() {
            return Ok(vec![self.label.clone()]);
        }

        let mut labels = vec![derive_label(&self.label, Some("latest"), TagMethod::Sha1)?];

        if environment::is_ci() {
            let sha_tagged = derive_label(&self.label, None, TagMethod::Sha1)?;
            if image_is_present(runner, &sha_tagged)? {
                labels.push(sha_tagged);
            }
        }

        Ok(labels)
    }
}

impl Command for PushImage {
    fn check_environment(&self) -> Result<()> {
        environment::registry_credentials().map(|_| ())
    }

    fn handle(&self, runner: &dyn ProcessRunner) -> Result<()> {
        self.docker_login(runner)?;

        for label in self.labels_to_push(runner)? {
            log_status!("push", "Pushing {}...", label);
            runner.run(&argv(["docker", "push", &label]))?;
        }

        Ok(())
    }
}
