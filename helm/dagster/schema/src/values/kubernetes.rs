use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kubernetes object annotations.
pub type Annotations = BTreeMap<String, String>;

/// A Service port may be referenced by number or by name.
pub type ServicePort = k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
}
