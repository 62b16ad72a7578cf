//! CI environment variables consumed by deckhand.

use std::env;

use crate::error::{Error, Result};

/// Set by CircleCI in every build container; gates build-only behavior.
pub const CI_MARKER: &str = "CIRCLECI";

/// The commit hash of the build, source of the `sha1` tagging method.
pub const BUILD_SHA: &str = "CIRCLE_SHA1";

pub const REGISTRY_USER: &str = "DOCKER_USER";
pub const REGISTRY_PASSWORD: &str = "DOCKER_PASSWORD";

/// Optional override for where stacks live on the manager.
pub const STACK_DIR: &str = "STACK_DIR";

const DEFAULT_STACK_DIR: &str = "/srv";

pub fn is_ci() -> bool {
    env::var_os(CI_MARKER).is_some()
}

pub fn require_ci() -> Result<()> {
    if is_ci() {
        Ok(())
    } else {
        Err(Error::environment(
            "This command is intended to run inside CI (CIRCLECI is not set)",
        ))
    }
}

pub fn build_sha() -> Result<String> {
    env::var(BUILD_SHA)
        .map_err(|_| Error::environment(format!("${BUILD_SHA} is not set in your build env")))
}

pub fn registry_credentials() -> Result<(String, String)> {
    match (env::var(REGISTRY_USER), env::var(REGISTRY_PASSWORD)) {
        (Ok(user), Ok(password)) => Ok((user, password)),
        _ => Err(Error::environment(format!(
            "You should have ${REGISTRY_USER} and ${REGISTRY_PASSWORD} defined in your build env"
        ))),
    }
}

pub fn stack_root() -> String {
    env::var(STACK_DIR).unwrap_or_else(|_| DEFAULT_STACK_DIR.to_string())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_root_defaults_to_srv() {
        let _guard = testenv::lock();
        env::remove_var(STACK_DIR);

        assert_eq!(stack_root(), "/srv");
    }

    #[test]
    fn stack_root_honors_the_override() {
        let _guard = testenv::lock();
        env::set_var(STACK_DIR, "/opt/stacks");

        assert_eq!(stack_root(), "/opt/stacks");

        env::remove_var(STACK_DIR);
    }

    #[test]
    fn registry_credentials_require_both_variables() {
        let _guard = testenv::lock();
        env::set_var(REGISTRY_USER, "ci");
        env::remove_var(REGISTRY_PASSWORD);

        let err = registry_credentials().unwrap_err();
        assert_eq!(err.code(), "ENVIRONMENT_ERROR");

        env::remove_var(REGISTRY_USER);
    }
}
