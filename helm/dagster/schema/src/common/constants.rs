use std::path::PathBuf;

/// This is the name of the Helm chart, as set in its Chart.yaml.
pub const CHART_NAME: &str = "dagster";

/// This is the release name `helm template` uses when none is given.
pub const DEFAULT_RELEASE_NAME: &str = "release-name";

/// This is the name of the helm binary, looked up in $PATH.
pub const HELM_COMMAND: &str = "helm";

/// The chart template which emits the PostgreSQL password Secret.
pub const POSTGRESQL_SECRET_TEMPLATE: &str = "templates/secret-postgres.yaml";

/// The chart template which emits the dagit and flower Ingress.
pub const INGRESS_TEMPLATE: &str = "templates/ingress.yaml";

/// Chart default for `generatePostgresqlPasswordSecret`. Must match values.yaml.
pub const DEFAULT_GENERATE_POSTGRESQL_PASSWORD_SECRET: bool = true;

/// Environment variable which overrides the chart directory.
pub const CHART_DIR_ENV: &str = "DAGSTER_CHART_DIR";

/// Diagnostic phrase helm prints when a `--show-only` template rendered nothing.
pub(crate) const TEMPLATE_NOT_FOUND_REGEX: &str = r"(?i)could not find template";

/// This is the directory of the chart this crate ships in. The crate lives at
/// `<chart>/schema`, so the chart is the parent of the manifest directory.
pub fn default_chart_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..")
}
