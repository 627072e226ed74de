/// Contains constants, error handling, and file and macro tooling shared across the crate.
pub mod common;

/// Contains the tools to render the chart's templates with the `helm` binary.
pub mod helm;

/// Contains the typed model of the chart's values.yaml.
pub mod values;

pub use common::error::{Error, Result};
pub use helm::{
    client::{HelmTemplateClient, RenderRequest, TemplateRenderer},
    template::{HelmTemplate, RenderedObject},
};
pub use values::HelmValues;
