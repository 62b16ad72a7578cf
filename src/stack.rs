//! Queries against a running Swarm stack.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::host::Host;
use crate::image::split_label_and_tag;
use crate::process::argv;

/// One service in a stack, as reported by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub name: String,
    pub image: String,
}

/// List every service in the named stack with its image reference.
pub fn fetch_services(host: &Host, stack_name: &str) -> Result<Vec<Service>> {
    let lines = host.capture_lines(&argv([
        "docker",
        "stack",
        "services",
        stack_name,
        "--format",
        "{{.Name}}|{{.Image}}",
    ]))?;

    Ok(lines
        .iter()
        .filter_map(|line| line.split_once('|'))
        .map(|(name, image)| Service {
            name: name.to_string(),
            image: image.to_string(),
        })
        .collect())
}

/// Names of the services running the target image, in orchestrator order.
///
/// Matching compares bare repositories only: tags are ignored on both sides,
/// since the intent is "update whichever services run this image, whatever
/// tag they currently run".
pub fn matching_services(host: &Host, stack_name: &str, image: &str) -> Result<Vec<String>> {
    let (target_repository, _) = split_label_and_tag(image);

    Ok(fetch_services(host, stack_name)?
        .into_iter()
        .filter(|service| split_label_and_tag(&service.image).0 == target_repository)
        .map(|service| service.name)
        .collect())
}

#[derive(Deserialize)]
struct ServiceInspect {
    #[serde(rename = "Spec")]
    spec: ServiceSpec,
}

#[derive(Deserialize)]
struct ServiceSpec {
    #[serde(rename = "TaskTemplate")]
    task_template: TaskTemplate,
}

#[derive(Deserialize)]
struct TaskTemplate {
    #[serde(rename = "ContainerSpec")]
    container_spec: ContainerSpec,
}

#[derive(Deserialize)]
struct ContainerSpec {
    #[serde(rename = "Env", default)]
    env: Vec<String>,
}

/// Environment entries (`KEY=VALUE`) from a running service's task template.
pub fn service_env(host: &Host, service: &str) -> Result<Vec<String>> {
    let args = argv(["docker", "service", "inspect", service]);
    let value = host.capture_json(&args)?;

    // docker emits a one-element array for a single inspected service;
    // anything else (an unknown service inspects to `[]`) is malformed.
    let (inspected,): (ServiceInspect,) =
        serde_json::from_value(value).map_err(|source| Error::parse(&args, source))?;

    Ok(inspected.spec.task_template.container_spec.env)
}
