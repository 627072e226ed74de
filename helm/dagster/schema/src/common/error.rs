use snafu::Snafu;
use std::path::PathBuf;

/// For use with multiple fallible operations which may fail for different reasons, but are
/// defined withing the same scope and must return to the outer scope (calling scope) using
/// the try operator -- '?'.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))]
pub enum Error {
    /// Error for when a Helm command fails to run.
    #[snafu(display(
        "Failed to run Helm command,\ncommand: {},\nargs: {:?},\ncommand_error: {}",
        command,
        args,
        source
    ))]
    HelmCommand {
        source: std::io::Error,
        command: String,
        args: Vec<String>,
    },

    /// Error for when the `--show-only` template rendered no output, because a guard condition
    /// in the template suppressed every resource in it.
    #[snafu(display(
        "Could not find template {} in chart {},\nstd_err: {}",
        template,
        chart_dir.display(),
        std_err
    ))]
    TemplateNotFound {
        template: String,
        chart_dir: PathBuf,
        std_err: String,
    },

    /// Error for when a Helm template command execution fails for any reason other than a
    /// missing template.
    #[snafu(display(
        "`helm template` command return an error,\ncommand: {},\nargs: {:?},\nstd_err: {}",
        command,
        args,
        std_err,
    ))]
    HelmTemplateCommand {
        command: String,
        args: Vec<String>,
        std_err: String,
    },

    /// Error for when a HelmTemplate is built without the template to render.
    #[snafu(display("No chart template was given to render"))]
    NoTemplateOutput,

    /// Error for when a Helm version command execution succeeds, but with an error.
    #[snafu(display(
        "`helm version` command return an error,\ncommand: {},\nargs: {:?},\nstd_err: {}",
        command,
        args,
        std_err,
    ))]
    HelmVersionCommand {
        command: String,
        args: Vec<String>,
        std_err: String,
    },

    /// Error for when Helm v3.x.y is not present in $PATH.
    #[snafu(display("Helm version {} does not start with 'v3.x.y'", version))]
    HelmVersion { version: String },

    /// Error for when regular expression parsing or compilation fails.
    #[snafu(display("Failed to compile regex {}: {}", expression, source))]
    RegexCompile {
        source: regex::Error,
        expression: String,
    },

    /// Error for use when converting Vec<> to String.
    #[snafu(display("Failed to convert Vec<u8> to UTF-8 formatted String: {}", source))]
    U8VectorToString { source: std::str::Utf8Error },

    /// Error for when helm values or a rendered object could not be serialized to yaml.
    #[snafu(display("Failed to serialize {} to YAML: {}", subject, source))]
    SerializeToYaml {
        source: serde_yaml::Error,
        subject: String,
    },

    /// Error for when yaml could not be parsed from a slice.
    #[snafu(display("Failed to parse YAML {}: {}", input_yaml, source))]
    YamlParseFromSlice {
        source: serde_yaml::Error,
        input_yaml: String,
    },

    /// Error for when yaml could not be parsed from a file.
    #[snafu(display("Failed to parse YAML at {}: {}", filepath.display(), source))]
    YamlParseFromFile {
        source: serde_yaml::Error,
        filepath: PathBuf,
    },

    /// Error for when a rendered object could not be serialized to json.
    #[snafu(display("Failed to serialize rendered object to JSON: {}", source))]
    SerializeObjectToJson { source: serde_json::Error },

    /// Error for when the path to a directory cannot be validated.
    #[snafu(display("Failed to validate directory path {}: {}", path.display(), source))]
    ValidateDirPath {
        source: std::io::Error,
        path: PathBuf,
    },

    /// Error for when the path to a file cannot be validated.
    #[snafu(display("Failed to validate filepath {}: {}", path.display(), source))]
    ValidateFilePath {
        source: std::io::Error,
        path: PathBuf,
    },

    /// Error for when the path is not that of a directory.
    #[snafu(display("{} is not a directory", path.display()))]
    NotADirectory { path: PathBuf },

    /// Error for when the path is not that of a file.
    #[snafu(display("{} is not a file", path.display()))]
    NotAFile { path: PathBuf },

    /// Error for when a file could not be read.
    #[snafu(display("Failed to read file {}: {}", filepath.display(), source))]
    ReadingFile {
        source: std::io::Error,
        filepath: PathBuf,
    },

    /// Error for when the chart found in a path is not the dagster chart.
    #[snafu(display(
        "Failed to find valid Helm chart in path {}: found chart '{}'",
        path.display(),
        chart_name
    ))]
    FindingHelmChart { path: PathBuf, chart_name: String },

    /// Error for when a temporary file could not be created.
    #[snafu(display("Failed to create temporary file: {}", source))]
    TempFileCreation { source: std::io::Error },

    /// Error for when a temporary file could not be written to.
    #[snafu(display("Failed to write to temporary file {}: {}", filepath.display(), source))]
    WriteToTempFile {
        source: std::io::Error,
        filepath: PathBuf,
    },
}

impl Error {
    /// This is a predicate for the expected failure of rendering a template whose guard
    /// condition evaluated to false. Any other error is a genuine failure.
    pub fn is_template_not_found(&self) -> bool {
        matches!(self, Error::TemplateNotFound { .. })
    }
}

/// A wrapper type to remove repeated Result<T, Error> returns.
pub type Result<T, E = Error> = std::result::Result<T, E>;
