use clap::{Parser, ValueEnum};
use dagster_helm_schema::common::constants::{
    default_chart_dir, CHART_DIR_ENV, DEFAULT_RELEASE_NAME, HELM_COMMAND,
};
use std::path::PathBuf;

/// The encoding used to print rendered objects.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum OutputFormat {
    Yaml,
    Json,
}

/// These are the supported cli configuration options for render-template.
#[derive(Parser)]
#[command(version, about = "Renders a single template of the Dagster Helm chart", long_about = None)]
pub(crate) struct CliArgs {
    /// This is the Helm chart directory. Defaults to the chart this binary was built from.
    #[arg(long, env = CHART_DIR_ENV, value_name = "DIR_PATH")]
    chart_dir: Option<PathBuf>,

    /// This is the release name passed to `helm template`.
    #[arg(long, default_value = DEFAULT_RELEASE_NAME)]
    release_name: String,

    /// The chart-relative path of the template to render, e.g. templates/secret-postgres.yaml.
    #[arg(long, short = 's', value_name = "TEMPLATE")]
    show_only: String,

    /// A values yaml file. Keys outside of the values schema are ignored.
    #[arg(long, short = 'f', value_name = "FILE_PATH")]
    values: Option<PathBuf>,

    /// Overrides generatePostgresqlPasswordSecret, on top of the values file if there is one.
    #[arg(long, value_name = "BOOL")]
    generate_postgresql_password_secret: Option<bool>,

    /// The helm v3 binary.
    #[arg(long, env = "HELM_BIN", default_value = HELM_COMMAND)]
    helm: String,

    /// The encoding used to print the rendered objects.
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Yaml)]
    output: OutputFormat,
}

impl CliArgs {
    /// This returns the Helm chart directory.
    pub(crate) fn chart_dir(&self) -> PathBuf {
        self.chart_dir.clone().unwrap_or_else(default_chart_dir)
    }

    /// This returns the Helm release name.
    pub(crate) fn release_name(&self) -> String {
        self.release_name.clone()
    }

    /// This returns the template to render.
    pub(crate) fn show_only(&self) -> String {
        self.show_only.clone()
    }

    /// This returns the values yaml file, if any.
    pub(crate) fn values(&self) -> Option<PathBuf> {
        self.values.clone()
    }

    /// This returns the generatePostgresqlPasswordSecret override, if any.
    pub(crate) fn generate_postgresql_password_secret(&self) -> Option<bool> {
        self.generate_postgresql_password_secret
    }

    /// This returns the helm binary.
    pub(crate) fn helm(&self) -> &str {
        self.helm.as_str()
    }

    /// This returns the output format.
    pub(crate) fn output(&self) -> OutputFormat {
        self.output
    }
}
