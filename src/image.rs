//! Docker image references and tag derivation.

use std::fmt;
use std::str::FromStr;

use crate::environment;
use crate::error::{Error, Result};
use crate::process::{argv, ProcessRunner};

/// A docker image reference: `repository` with an optional `tag`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLabel {
    pub repository: String,
    pub tag: Option<String>,
}

impl ImageLabel {
    /// Split a raw reference on the first colon.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(':') {
            Some((repository, tag)) => Self {
                repository: repository.to_string(),
                tag: Some(tag.to_string()),
            },
            None => Self {
                repository: raw.to_string(),
                tag: None,
            },
        }
    }

    pub fn with_tag(&self, tag: impl Into<String>) -> Self {
        Self {
            repository: self.repository.clone(),
            tag: Some(tag.into()),
        }
    }
}

impl fmt::Display for ImageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "{}:{}", self.repository, tag),
            None => f.write_str(&self.repository),
        }
    }
}

/// Split a raw reference into `(repository, tag)`.
pub fn split_label_and_tag(label: &str) -> (String, Option<String>) {
    let parsed = ImageLabel::parse(label);
    (parsed.repository, parsed.tag)
}

/// The strategy for deriving a tag when none is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagMethod {
    /// The commit hash of the current CI build.
    Sha1,
    /// The current local time, minute granularity.
    Date,
}

impl TagMethod {
    pub fn resolve(&self) -> Result<String> {
        match self {
            TagMethod::Sha1 => environment::build_sha(),
            TagMethod::Date => Ok(chrono::Local::now().format("%Y%m%d%H%M").to_string()),
        }
    }
}

impl FromStr for TagMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sha1" => Ok(TagMethod::Sha1),
            "date" => Ok(TagMethod::Date),
            other => Err(Error::config(format!(
                "Unknown tagging method '{other}' (expected 'sha1' or 'date')"
            ))),
        }
    }
}

/// Derive the full image reference to operate on.
///
/// A reference that already carries a tag is returned unchanged unless an
/// explicit tag override is given, in which case the tag is replaced. A bare
/// repository gets the override tag, or a tag produced by `method` when no
/// override is given.
pub fn derive_label(raw: &str, explicit_tag: Option<&str>, method: TagMethod) -> Result<String> {
    let parsed = ImageLabel::parse(raw);

    let label = match (&parsed.tag, explicit_tag) {
        (Some(_), None) => parsed,
        (_, Some(tag)) => parsed.with_tag(tag),
        (None, None) => parsed.with_tag(method.resolve()?),
    };

    Ok(label.to_string())
}

/// Check whether an image reference exists in the local image store.
pub fn image_is_present(runner: &dyn ProcessRunner, label: &str) -> Result<bool> {
    let output = runner.output(&argv(["docker", "image", "ls", "-q", label]))?;

    Ok(output.split('\n').any(|line| !line.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::fake::FakeRunner;

    #[test]
    fn split_bare_repository() {
        assert_eq!(split_label_and_tag("f213/website"), ("f213/website".to_string(), None));
    }

    #[test]
    fn split_tagged_repository() {
        assert_eq!(
            split_label_and_tag("f213/website:tag"),
            ("f213/website".to_string(), Some("tag".to_string()))
        );
    }

    #[test]
    fn split_takes_the_first_colon() {
        assert_eq!(
            split_label_and_tag("org/app:v1:weird"),
            ("org/app".to_string(), Some("v1:weird".to_string()))
        );
    }

    #[test]
    fn display_round_trips() {
        assert_eq!(ImageLabel::parse("org/app:v1").to_string(), "org/app:v1");
        assert_eq!(ImageLabel::parse("org/app").to_string(), "org/app");
    }

    #[test]
    fn existing_tag_wins_when_no_override_given() {
        assert_eq!(
            derive_label("org/app:v1", None, TagMethod::Sha1).unwrap(),
            "org/app:v1"
        );
    }

    #[test]
    fn explicit_tag_replaces_existing_tag() {
        assert_eq!(
            derive_label("org/app:v1", Some("latest"), TagMethod::Sha1).unwrap(),
            "org/app:latest"
        );
    }

    #[test]
    fn explicit_tag_is_appended_to_bare_repository() {
        assert_eq!(
            derive_label("org/app", Some("latest"), TagMethod::Sha1).unwrap(),
            "org/app:latest"
        );
    }

    #[test]
    fn sha1_method_appends_the_build_identifier() {
        let _guard = crate::environment::testenv::lock();
        std::env::set_var(crate::environment::BUILD_SHA, "cafebabe");

        assert_eq!(
            derive_label("org/app", None, TagMethod::Sha1).unwrap(),
            "org/app:cafebabe"
        );

        std::env::remove_var(crate::environment::BUILD_SHA);
    }

    #[test]
    fn sha1_method_fails_outside_a_build() {
        let _guard = crate::environment::testenv::lock();
        std::env::remove_var(crate::environment::BUILD_SHA);

        let err = derive_label("org/app", None, TagMethod::Sha1).unwrap_err();
        assert_eq!(err.code(), "ENVIRONMENT_ERROR");
    }

    #[test]
    fn date_method_appends_a_minute_granularity_tag() {
        let label = derive_label("org/app", None, TagMethod::Date).unwrap();
        let (repository, tag) = split_label_and_tag(&label);

        assert_eq!(repository, "org/app");
        let tag = tag.unwrap();
        assert_eq!(tag.len(), 12);
        assert!(tag.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn unknown_method_is_a_configuration_error() {
        let err = "md5".parse::<TagMethod>().unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    #[test]
    fn image_is_present_when_listing_returns_ids() {
        let runner = FakeRunner::with_outputs(&["deadbeef0123\n"]);
        assert!(image_is_present(&runner, "org/app:abc").unwrap());
        assert_eq!(
            runner.calls(),
            vec![crate::process::argv(["docker", "image", "ls", "-q", "org/app:abc"])]
        );
    }

    #[test]
    fn image_is_absent_when_listing_is_empty() {
        let runner = FakeRunner::with_outputs(&["\n"]);
        assert!(!image_is_present(&runner, "org/app:abc").unwrap());
    }
}
