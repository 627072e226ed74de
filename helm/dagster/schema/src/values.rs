use crate::common::{
    constants::DEFAULT_GENERATE_POSTGRESQL_PASSWORD_SECRET,
    error::{ReadingFile, Result, SerializeToYaml, YamlParseFromFile},
};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use std::{fs, path::Path};

/// Contains the dagit and flower component values.
pub mod dagit;

/// Contains the ingress values.
pub mod ingress;

/// Contains Kubernetes types shared across the values subschemas.
pub mod kubernetes;

/// Contains the PostgreSQL connection values.
pub mod postgresql;

pub use dagit::{Dagit, Flower};
pub use ingress::{DagitIngressConfiguration, FlowerIngressConfiguration, Ingress, IngressPath};
pub use kubernetes::{Annotations, Service, ServicePort};
pub use postgresql::PostgreSql;

/// HelmValues is the typed form of the chart's values.yaml. Every field is an override: a field
/// left as None is not serialized, and helm falls back to the chart default for it. The Default
/// instance therefore renders the chart exactly as values.yaml configures it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmValues {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_override: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fullname_override: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dagit: Option<Dagit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flower: Option<Flower>,
    /// Guards templates/secret-postgres.yaml.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate_postgresql_password_secret: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postgresql_secret_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postgresql: Option<PostgreSql>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress: Option<Ingress>,
}

impl HelmValues {
    /// This creates an empty builder. Fields which are not set on the builder take the chart
    /// defaults.
    pub fn builder() -> HelmValuesBuilder {
        HelmValuesBuilder::default()
    }

    /// Reads a values yaml file. Keys which this schema does not model are ignored.
    pub fn from_yaml_file<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let filepath = path.as_ref().to_path_buf();
        let buf = fs::read(filepath.as_path()).context(ReadingFile {
            filepath: filepath.clone(),
        })?;
        serde_yaml::from_slice(buf.as_slice()).context(YamlParseFromFile { filepath })
    }

    /// Serializes the overrides to yaml, for use with `helm template --values`.
    pub fn to_yaml(&self) -> Result<Vec<u8>> {
        serde_yaml::to_string(self)
            .map(String::into_bytes)
            .context(SerializeToYaml {
                subject: "helm values",
            })
    }

    /// The effective value of `generatePostgresqlPasswordSecret`.
    pub fn generate_postgresql_password_secret(&self) -> bool {
        self.generate_postgresql_password_secret
            .unwrap_or(DEFAULT_GENERATE_POSTGRESQL_PASSWORD_SECRET)
    }

    /// The effective value of `ingress.enabled`.
    pub fn ingress_enabled(&self) -> bool {
        self.ingress
            .as_ref()
            .and_then(|ingress| ingress.enabled)
            .unwrap_or_default()
    }
}

/// This is a builder for HelmValues.
#[derive(Default)]
pub struct HelmValuesBuilder {
    values: HelmValues,
}

impl HelmValuesBuilder {
    #[must_use]
    pub fn with_name_override<J>(mut self, name: J) -> Self
    where
        J: ToString,
    {
        self.values.name_override = Some(name.to_string());
        self
    }

    #[must_use]
    pub fn with_fullname_override<J>(mut self, name: J) -> Self
    where
        J: ToString,
    {
        self.values.fullname_override = Some(name.to_string());
        self
    }

    #[must_use]
    pub fn with_dagit(mut self, dagit: Dagit) -> Self {
        self.values.dagit = Some(dagit);
        self
    }

    #[must_use]
    pub fn with_flower(mut self, flower: Flower) -> Self {
        self.values.flower = Some(flower);
        self
    }

    /// Sets the guard for the PostgreSQL password Secret.
    #[must_use]
    pub fn with_generate_postgresql_password_secret(mut self, generate: bool) -> Self {
        self.values.generate_postgresql_password_secret = Some(generate);
        self
    }

    /// Sets the name of the PostgreSQL password Secret, whether or not the chart generates it.
    #[must_use]
    pub fn with_postgresql_secret_name<J>(mut self, name: J) -> Self
    where
        J: ToString,
    {
        self.values.postgresql_secret_name = Some(name.to_string());
        self
    }

    #[must_use]
    pub fn with_postgresql(mut self, postgresql: PostgreSql) -> Self {
        self.values.postgresql = Some(postgresql);
        self
    }

    #[must_use]
    pub fn with_ingress(mut self, ingress: Ingress) -> Self {
        self.values.ingress = Some(ingress);
        self
    }

    /// Build the HelmValues.
    pub fn build(self) -> HelmValues {
        self.values
    }
}
