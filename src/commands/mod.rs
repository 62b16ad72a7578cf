//! The command registry: one entry per invokable subcommand.

use clap::{CommandFactory, Parser};

use crate::error::Result;
use crate::process::ProcessRunner;

pub mod add_host_key;
pub mod build_image;
pub mod deploy_stack;
pub mod push_image;
pub mod run_command;
pub mod update_image;

/// A unit of work dispatched from a subcommand name.
///
/// Commands never spawn subprocesses themselves; all side effects go
/// through the supplied runner (directly or via a [`crate::host::Host`]),
/// so local/remote transparency is never bypassed.
pub trait Command {
    /// Verify required environment preconditions before any side effect.
    fn check_environment(&self) -> Result<()> {
        Ok(())
    }

    fn handle(&self, runner: &dyn ProcessRunner) -> Result<()>;
}

/// A registered subcommand: its literal kebab-case name, a one-line
/// description for the usage text, and a constructor that parses the
/// remaining argv into a ready-to-run [`Command`].
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub build: fn(&[String]) -> std::result::Result<Box<dyn Command>, clap::Error>,
}

/// Every dispatchable command. Names are spelled out here rather than
/// derived from type names; this table is the single source of truth.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "build-image",
        description: "Build a docker image and tag it as latest",
        build: parse::<build_image::BuildImage>,
    },
    CommandSpec {
        name: "push-image",
        description: "Push a previously built image to the registry",
        build: parse::<push_image::PushImage>,
    },
    CommandSpec {
        name: "deploy-stack",
        description: "Deploy or update a stack, using docker stack deploy",
        build: parse::<deploy_stack::DeployStack>,
    },
    CommandSpec {
        name: "update-image",
        description: "Update an image in a running stack",
        build: parse::<update_image::UpdateImage>,
    },
    CommandSpec {
        name: "run-command",
        description: "Run a one-off command in a container on the manager",
        build: parse::<run_command::RunCommand>,
    },
    CommandSpec {
        name: "add-host-key",
        description: "Install a known_hosts entry for SSH access",
        build: parse::<add_host_key::AddHostKey>,
    },
];

/// Look up a command by its (case-insensitive) name.
pub fn find(name: &str) -> Option<&'static CommandSpec> {
    let name = name.to_lowercase();
    COMMANDS.iter().find(|spec| spec.name == name)
}

pub fn usage(program: &str) -> String {
    let mut text = format!(
        "Usage: {program} COMMAND <OPTIONS>\n\nWhere COMMAND is one of the following:\n"
    );
    for spec in COMMANDS {
        text.push_str(&format!("      {}\t{}.\n", spec.name, spec.description));
    }
    text
}

fn parse<T>(args: &[String]) -> std::result::Result<Box<dyn Command>, clap::Error>
where
    T: Parser + Command + 'static,
{
    let name = T::command().get_name().to_string();
    let argv = std::iter::once(name).chain(args.iter().cloned());

    T::try_parse_from(argv).map(|command| Box::new(command) as Box<dyn Command>)
}
