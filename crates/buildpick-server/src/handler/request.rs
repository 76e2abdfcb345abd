//! Request types for HTTP handlers.
//!
//! The fill parameters mirror the cascading dropdowns: the job dropdown
//! feeds the build dropdown, which feeds the artifact dropdown. `build` and
//! `artifact` default to the empty string because the UI queries before the
//! user has picked anything.

use schemars::JsonSchema;
use serde::Deserialize;

/// Query parameters for the job dropdown.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct JobFillParams {
    /// Job to leave out of the list (the one the parameter belongs to).
    pub exclude: String,
}

/// Query parameters for the build dropdown.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BuildFillParams {
    /// Job whose builds are listed.
    pub job: String,
}

/// Query parameters for the artifact dropdown.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ArtifactFillParams {
    /// Job whose build is inspected.
    pub job: String,
    /// Selected build number; empty until the user picks one.
    #[serde(default)]
    pub build: String,
}

/// Query parameters for the resolved-value fill.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ValueFillParams {
    /// Job whose artifact was picked.
    pub job: String,
    /// Selected build number; empty until the user picks one.
    #[serde(default)]
    pub build: String,
    /// Selected artifact name; empty until the user picks one.
    #[serde(default)]
    pub artifact: String,
}

/// Path parameters for parameter value binding.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ParameterPathParams {
    /// Name of the parameter being bound.
    pub name: String,
}

/// Form submission for binding an artifact parameter value.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BindValueRequest {
    /// Job whose artifact was picked (explicit context, not rediscovered).
    pub job_name: String,
    /// The submitted form object, `{"name": ..., "value": ...}`.
    pub submission: serde_json::Value,
}
