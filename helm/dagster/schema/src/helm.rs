/// Contains the structs required to deserialize yaml files from the helm chart.
pub mod chart;

/// Contains the TemplateRenderer boundary and the `helm template` client which implements it.
pub mod client;

/// Contains HelmTemplate, which renders a single chart template into Kubernetes objects.
pub mod template;

/// Validate the helm binary and the chart directory before rendering.
pub mod validators;

#[cfg(test)]
pub(crate) mod mock;
