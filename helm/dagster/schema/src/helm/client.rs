use crate::{
    common::{
        constants::{HELM_COMMAND, TEMPLATE_NOT_FOUND_REGEX},
        error::{
            HelmCommand, HelmTemplateCommand, RegexCompile, Result, TemplateNotFound,
            U8VectorToString,
        },
        file::write_to_tempfile,
    },
    vec_to_strings,
};
use regex::Regex;
use snafu::ResultExt;
use std::{
    path::{Path, PathBuf},
    process::Command,
    str,
};
use tracing::debug;

/// This is everything a single `helm template --show-only` run needs.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderRequest {
    pub chart_dir: PathBuf,
    pub release_name: String,
    /// The values overrides, serialized as yaml.
    pub values_yaml: Vec<u8>,
    /// The chart-relative path of the template to render, e.g. templates/secret-postgres.yaml.
    pub show_only: String,
}

/// A TemplateRenderer expands one chart template against a set of values. It returns the raw
/// manifest stream on success. When the template emits nothing, it fails with
/// Error::TemplateNotFound.
pub trait TemplateRenderer {
    fn render(&self, request: &RenderRequest) -> Result<Vec<u8>>;
}

impl<T> TemplateRenderer for &T
where
    T: TemplateRenderer + ?Sized,
{
    fn render(&self, request: &RenderRequest) -> Result<Vec<u8>> {
        (**self).render(request)
    }
}

/// This is a builder for HelmTemplateClient.
#[derive(Default)]
pub struct HelmTemplateClientBuilder {
    command: Option<String>,
    values_dir: Option<PathBuf>,
    extra_args: Vec<String>,
}

impl HelmTemplateClientBuilder {
    /// The helm binary to run. Defaults to `helm`, from $PATH.
    #[must_use]
    pub fn with_command<J>(mut self, command: J) -> Self
    where
        J: ToString,
    {
        self.command = Some(command.to_string());
        self
    }

    /// The directory the temporary values file is written into. Defaults to the system's
    /// temporary directory.
    #[must_use]
    pub fn with_values_dir<P>(mut self, dir: P) -> Self
    where
        P: AsRef<Path>,
    {
        self.values_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Arguments which are appended to every `helm template` command, e.g. `--kube-version`.
    #[must_use]
    pub fn with_extra_args<A>(mut self, extra_args: Vec<A>) -> Self
    where
        A: ToString,
    {
        self.extra_args.extend(extra_args.iter().map(ToString::to_string));
        self
    }

    /// Build the HelmTemplateClient.
    pub fn build(self) -> Result<HelmTemplateClient> {
        let template_not_found = Regex::new(TEMPLATE_NOT_FOUND_REGEX).context(RegexCompile {
            expression: TEMPLATE_NOT_FOUND_REGEX.to_string(),
        })?;

        Ok(HelmTemplateClient {
            command: self.command.unwrap_or_else(|| HELM_COMMAND.to_string()),
            values_dir: self.values_dir,
            extra_args: self.extra_args,
            template_not_found,
        })
    }
}

/// This type renders chart templates by running `helm template`.
#[derive(Clone, Debug)]
pub struct HelmTemplateClient {
    command: String,
    values_dir: Option<PathBuf>,
    extra_args: Vec<String>,
    template_not_found: Regex,
}

impl HelmTemplateClient {
    /// This creates an empty builder.
    pub fn builder() -> HelmTemplateClientBuilder {
        HelmTemplateClientBuilder::default()
    }

    /// A client which runs `helm` from $PATH.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// The binary name of the `helm` command.
    pub fn command(&self) -> &str {
        self.command.as_str()
    }

    /// Helm reports a `--show-only` template which rendered to nothing with a message like
    /// "Error: could not find template templates/secret-postgres.yaml in chart". Only the phrase
    /// is matched, the rest of the wording varies across helm releases.
    pub(crate) fn is_template_not_found(&self, std_err: &str) -> bool {
        self.template_not_found.is_match(std_err)
    }

    /// Runs command `helm template <release> <chart_dir> --values <file> --show-only <template>`.
    fn template(&self, request: &RenderRequest, values_file: &Path) -> Result<Vec<u8>> {
        let command = self.command();
        let mut args: Vec<String> = vec_to_strings![
            "template",
            request.release_name,
            request.chart_dir.to_string_lossy(),
            "--values",
            values_file.to_string_lossy(),
            "--show-only",
            request.show_only
        ];

        // Extra args
        args.extend(self.extra_args.iter().cloned());

        debug!(%command, ?args, "Helm template command");

        let output = Command::new(command)
            .args(args.clone())
            .output()
            .context(HelmCommand {
                command: command.to_string(),
                args: args.clone(),
            })?;

        if output.status.success() {
            let stdout_str =
                str::from_utf8(output.stdout.as_slice()).context(U8VectorToString)?;
            debug!(stdout=%stdout_str, "Helm template command standard output");
            return Ok(output.stdout);
        }

        let std_err = str::from_utf8(output.stderr.as_slice())
            .context(U8VectorToString)?
            .to_string();
        debug!(status=%output.status, %std_err, "Helm template command failed");

        if self.is_template_not_found(std_err.as_str()) {
            return TemplateNotFound {
                template: request.show_only.clone(),
                chart_dir: request.chart_dir.clone(),
                std_err,
            }
            .fail();
        }

        HelmTemplateCommand {
            command: command.to_string(),
            args,
            std_err,
        }
        .fail()
    }
}

impl TemplateRenderer for HelmTemplateClient {
    fn render(&self, request: &RenderRequest) -> Result<Vec<u8>> {
        // The file is removed when the handle drops, after helm has exited.
        let values_file =
            write_to_tempfile(self.values_dir.as_ref(), request.values_yaml.as_slice())?;
        self.template(request, values_file.path())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        common::{constants::POSTGRESQL_SECRET_TEMPLATE, error::Error},
        helm::client::{HelmTemplateClient, RenderRequest, TemplateRenderer},
    };
    use std::path::PathBuf;

    fn request() -> RenderRequest {
        RenderRequest {
            chart_dir: PathBuf::from("/nonexistent/chart"),
            release_name: "release-name".to_string(),
            values_yaml: b"generatePostgresqlPasswordSecret: false\n".to_vec(),
            show_only: POSTGRESQL_SECRET_TEMPLATE.to_string(),
        }
    }

    #[test]
    fn test_template_not_found_diagnostic() {
        let client = HelmTemplateClient::new().unwrap();

        assert!(client.is_template_not_found(
            "Error: could not find template templates/secret-postgres.yaml in chart"
        ));
        assert!(client.is_template_not_found("error: Could Not Find Template foo.yaml"));
        assert!(!client.is_template_not_found(
            "Error: template: dagster/templates/secret-postgres.yaml:10:50: executing \
             \"dagster/templates/secret-postgres.yaml\" at <b64enc>: wrong type for value"
        ));
        assert!(!client.is_template_not_found("Error: path \"/nonexistent/chart\" not found"));
    }

    #[test]
    fn test_builder_defaults() {
        let client = HelmTemplateClient::new().unwrap();
        assert_eq!(client.command(), "helm");

        let client = HelmTemplateClient::builder()
            .with_command("/opt/helm/bin/helm")
            .with_extra_args(vec!["--kube-version", "1.20.0"])
            .build()
            .unwrap();
        assert_eq!(client.command(), "/opt/helm/bin/helm");
        assert_eq!(client.extra_args, vec!["--kube-version", "1.20.0"]);
    }

    #[test]
    fn test_missing_binary_is_not_template_not_found() {
        let values_dir = tempfile::tempdir().unwrap();
        let client = HelmTemplateClient::builder()
            .with_command("/nonexistent/bin/helm")
            .with_values_dir(values_dir.path())
            .build()
            .unwrap();

        let error = client.render(&request()).unwrap_err();
        assert!(matches!(error, Error::HelmCommand { .. }));
        assert!(!error.is_template_not_found());

        // The temporary values file does not outlive the call.
        assert_eq!(std::fs::read_dir(values_dir.path()).unwrap().count(), 0);
    }

    /// These run `helm template` against shell scripts standing in for helm, so the exit status
    /// and stderr handling is covered without a helm install.
    #[cfg(unix)]
    mod stub_helm {
        use super::request;
        use crate::{
            common::{constants::POSTGRESQL_SECRET_TEMPLATE, error::Error},
            helm::{
                client::{HelmTemplateClient, TemplateRenderer},
                template::{HelmTemplate, RenderedObject},
            },
            values::HelmValues,
        };
        use std::{
            fs,
            os::unix::fs::PermissionsExt,
            path::{Path, PathBuf},
            sync::Mutex,
        };

        /// Serializes writing and running stub binaries, so no other stub test forks while a
        /// stub's file descriptor is open for writing.
        static STUB_LOCK: Mutex<()> = Mutex::new(());

        /// Writes an executable shell script standing in for helm.
        fn write_stub(dir: &Path, script: &str) -> PathBuf {
            let path = dir.join("helm");
            fs::write(path.as_path(), format!("#!/bin/sh\n{script}")).unwrap();
            fs::set_permissions(path.as_path(), fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        fn stub_client(dir: &Path, script: &str) -> HelmTemplateClient {
            HelmTemplateClient::builder()
                .with_command(write_stub(dir, script).display())
                .with_values_dir(dir)
                .build()
                .unwrap()
        }

        #[test]
        fn test_stub_helm_template_not_found() {
            let _guard = STUB_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            let dir = tempfile::tempdir().unwrap();
            let client = stub_client(
                dir.path(),
                "echo 'Error: could not find template secret-postgres.yaml in chart' >&2\n\
                 exit 1\n",
            );

            let error = client.render(&request()).unwrap_err();
            match error {
                Error::TemplateNotFound {
                    template,
                    chart_dir,
                    std_err,
                } => {
                    assert_eq!(template, POSTGRESQL_SECRET_TEMPLATE);
                    assert_eq!(chart_dir, PathBuf::from("/nonexistent/chart"));
                    assert!(std_err.contains("Error: could not find template"));
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[test]
        fn test_stub_helm_other_failure() {
            let _guard = STUB_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            let dir = tempfile::tempdir().unwrap();
            let client = stub_client(
                dir.path(),
                "echo 'Error: template: secret-postgres.yaml:10:50: nil pointer' >&2\n\
                 exit 1\n",
            );

            let error = client.render(&request()).unwrap_err();
            assert!(!error.is_template_not_found());
            match error {
                Error::HelmTemplateCommand { args, std_err, .. } => {
                    assert_eq!(args[0], "template");
                    assert!(args.contains(&"--show-only".to_string()));
                    assert!(args.contains(&POSTGRESQL_SECRET_TEMPLATE.to_string()));
                    assert!(std_err.contains("nil pointer"));
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[test]
        fn test_stub_helm_success_decides_on_exit_status() {
            let _guard = STUB_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            let dir = tempfile::tempdir().unwrap();
            // The phrase on stderr does not matter when helm exits 0.
            let client = stub_client(
                dir.path(),
                "echo 'could not find template' >&2\n\
                 echo '---'\n\
                 echo '# Source: dagster/templates/secret-postgres.yaml'\n\
                 exit 0\n",
            );
            let template = HelmTemplate::builder()
                .with_output(POSTGRESQL_SECRET_TEMPLATE)
                .with_chart_dir("/nonexistent/chart")
                .build_with(client)
                .unwrap();

            let objects = template
                .render::<RenderedObject>(&HelmValues::default())
                .unwrap();
            assert!(objects.is_empty());
        }

        #[test]
        fn test_stub_helm_receives_values_file() {
            let _guard = STUB_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            let dir = tempfile::tempdir().unwrap();
            // Prints the file following --values back as the rendered manifest.
            let client = stub_client(
                dir.path(),
                "while [ $# -gt 0 ]; do\n\
                 if [ \"$1\" = --values ]; then cat \"$2\"; fi\n\
                 shift\n\
                 done\n",
            );

            let stdout = client.render(&request()).unwrap();
            assert_eq!(stdout, request().values_yaml);
        }
    }
}
