use crate::values::kubernetes::{Annotations, ServicePort};
use serde::{Deserialize, Serialize};

/// An HTTP ingress path. Lists of these replace the chart defaults as a whole, so every field
/// is required.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressPath {
    pub path: String,
    pub service_name: String,
    pub service_port: ServicePort,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DagitIngressConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preceding_paths: Option<Vec<IngressPath>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub succeeding_paths: Option<Vec<IngressPath>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowerIngressConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preceding_paths: Option<Vec<IngressPath>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub succeeding_paths: Option<Vec<IngressPath>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Ingress {
    /// Guards templates/ingress.yaml.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dagit: Option<DagitIngressConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flower: Option<FlowerIngressConfiguration>,
}
