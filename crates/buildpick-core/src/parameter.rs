//! Parameter definitions and value binding.
//!
//! A parameter definition names the environment variable to fill and the job
//! whose artifacts are offered; the host persists definitions alongside its
//! build configuration. At trigger time the submitted form is bound to a
//! plain string value carrying the resolved artifact path.

use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_PARAMETER;
use crate::error::{Error, Result};

/// A build parameter that offers archived artifacts of another job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ArtifactParameter {
    /// Name under which the bound value is exposed to the build.
    pub name: String,
    /// Job whose archived artifacts are offered.
    pub job_name: String,
}

/// A bound parameter value handed back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct StringParameterValue {
    /// Parameter name.
    pub name: String,
    /// Resolved artifact path.
    pub value: String,
}

impl ArtifactParameter {
    /// Creates a parameter definition.
    pub fn new(name: impl Into<String>, job_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            job_name: job_name.into(),
        }
    }

    /// Binds a submitted form object to a string parameter value.
    ///
    /// The submission must be a JSON object with `name` and `value` fields;
    /// unknown fields are ignored.
    ///
    /// # Errors
    ///
    /// Fails with [`InvalidArgument`] when the submission does not have the
    /// expected shape.
    ///
    /// [`InvalidArgument`]: crate::ErrorKind::InvalidArgument
    pub fn bind_value(&self, submission: &serde_json::Value) -> Result<StringParameterValue> {
        let value: StringParameterValue =
            serde_json::from_value(submission.clone()).map_err(|err| {
                Error::invalid_argument()
                    .with_message(format!(
                        "submission for parameter {:?} does not bind to a string value",
                        self.name
                    ))
                    .with_source(err)
            })?;

        tracing::debug!(
            target: TRACING_TARGET_PARAMETER,
            parameter = %self.name,
            "bound parameter value from form submission"
        );

        Ok(value)
    }

    /// Creating a value from a bare query string is not supported; artifact
    /// parameters only bind from a form submission.
    pub fn bind_from_query(&self) -> Result<StringParameterValue> {
        tracing::warn!(
            target: TRACING_TARGET_PARAMETER,
            parameter = %self.name,
            "unsupported query-string value creation invoked"
        );
        Err(Error::unsupported().with_message(format!(
            "parameter {:?} can only be bound from a form submission",
            self.name
        )))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn binds_a_well_formed_submission() {
        let parameter = ArtifactParameter::new("ARTIFACT", "build-app");
        let value = parameter
            .bind_value(&json!({
                "name": "ARTIFACT",
                "value": "/data/jobs/build-app/builds/42/archive/dist/app.jar",
            }))
            .unwrap();

        assert_eq!(value.name, "ARTIFACT");
        assert_eq!(
            value.value,
            "/data/jobs/build-app/builds/42/archive/dist/app.jar"
        );
    }

    #[test]
    fn ignores_extra_submission_fields() {
        let parameter = ArtifactParameter::new("ARTIFACT", "build-app");
        let value = parameter
            .bind_value(&json!({"name": "ARTIFACT", "value": "/a/b", "jobName": "build-app"}))
            .unwrap();
        assert_eq!(value.value, "/a/b");
    }

    #[test]
    fn rejects_malformed_submissions() {
        let parameter = ArtifactParameter::new("ARTIFACT", "build-app");
        for submission in [json!({"name": "ARTIFACT"}), json!("nope"), json!(42)] {
            let error = parameter.bind_value(&submission).unwrap_err();
            assert_eq!(error.kind(), ErrorKind::InvalidArgument);
        }
    }

    #[test]
    fn query_string_binding_is_unsupported() {
        let parameter = ArtifactParameter::new("ARTIFACT", "build-app");
        let error = parameter.bind_from_query().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unsupported);
    }

    #[test]
    fn definition_round_trips_through_serde() {
        let parameter = ArtifactParameter::new("ARTIFACT", "build-app");
        let text = serde_json::to_string(&parameter).unwrap();
        let back: ArtifactParameter = serde_json::from_str(&text).unwrap();
        assert_eq!(back, parameter);
    }
}
