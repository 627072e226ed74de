use crate::values::kubernetes::Service;
use serde::{Deserialize, Serialize};

/// Connection values for the PostgreSQL database dagster stores run and event data in.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostgreSql {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postgresql_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postgresql_username: Option<String>,
    /// Stored in the generated Secret, when generatePostgresqlPasswordSecret is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postgresql_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postgresql_database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<Service>,
}
