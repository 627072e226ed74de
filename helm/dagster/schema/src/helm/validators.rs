use crate::{
    common::{
        constants::CHART_NAME,
        error::{
            FindingHelmChart, HelmCommand, HelmVersion, HelmVersionCommand, NotADirectory,
            NotAFile, ReadingFile, RegexCompile, Result, U8VectorToString, ValidateDirPath,
            ValidateFilePath, YamlParseFromFile,
        },
    },
    helm::chart::Chart,
    vec_to_strings,
};
use regex::bytes::Regex;
use snafu::{ensure, ResultExt};
use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
    str,
};
use tracing::debug;

/// Validate that `command` runs a helm v3 binary. The command is whatever the caller renders
/// with: render-template passes its `--helm` flag, which falls back to the HELM_BIN environment
/// variable and then to `helm`. A bare name is looked up in the shell's $PATH.
pub fn validate_helmv3_in_path(command: &str) -> Result<()> {
    let args: Vec<String> = vec_to_strings!["version", "--short"];

    debug!(%command, ?args, "Helm version command");

    // Execute `helm version` to verify if the binary exists.
    let output = Command::new(command)
        .args(args.clone())
        .output()
        .context(HelmCommand {
            command: command.to_string(),
            args: args.clone(),
        })?;

    let stdout_str = str::from_utf8(output.stdout.as_slice()).context(U8VectorToString)?;
    debug!(stdout=%stdout_str, "Helm version command standard output");
    ensure!(
        output.status.success(),
        HelmVersionCommand {
            command: command.to_string(),
            args,
            std_err: str::from_utf8(output.stderr.as_slice())
                .context(U8VectorToString)?
                .to_string()
        }
    );

    // Parse based on regex, to validate if the version string (semver) is v3.x.
    let regex: &str = r"^(v3\.[0-9]+\.[0-9])";
    if !Regex::new(regex)
        .context(RegexCompile {
            expression: regex.to_string(),
        })?
        .is_match(output.stdout.as_slice())
    {
        return HelmVersion {
            version: stdout_str.to_string(),
        }
        .fail();
    }

    Ok(())
}

/// Validate the input helm chart directory path:
/// - validate if the path exists.
/// - validate if the Chart.yaml and values.yaml files and the templates directory are present.
/// - validate if the chart name in the Chart.yaml file is correct.
pub fn validate_helm_chart_dir<P>(dir_path: P) -> Result<Chart>
where
    P: AsRef<Path>,
{
    let dir_path = dir_path.as_ref().to_path_buf();

    let path_exists_and_is_dir = |path: PathBuf| -> Result<bool> {
        fs::metadata(path.as_path())
            .map(|m| m.is_dir())
            .context(ValidateDirPath { path })
    };

    let path_exists_and_is_file = |path: PathBuf| -> Result<bool> {
        fs::metadata(path.as_path())
            .map(|m| m.is_file())
            .context(ValidateFilePath { path })
    };

    ensure!(
        path_exists_and_is_dir(dir_path.clone())?,
        NotADirectory { path: dir_path }
    );

    // Validate Chart.yaml file.
    let chart_yaml_path = dir_path.join("Chart.yaml");
    ensure!(
        path_exists_and_is_file(chart_yaml_path.clone())?,
        NotAFile {
            path: chart_yaml_path.clone()
        }
    );

    let chart_yaml_file = fs::read(chart_yaml_path.as_path()).context(ReadingFile {
        filepath: chart_yaml_path.clone(),
    })?;
    let chart_yaml: Chart =
        serde_yaml::from_slice(chart_yaml_file.as_slice()).context(YamlParseFromFile {
            filepath: chart_yaml_path,
        })?;

    ensure!(
        chart_yaml.name().eq(CHART_NAME),
        FindingHelmChart {
            path: dir_path,
            chart_name: chart_yaml.name()
        }
    );

    // Validate values.yaml file.
    let values_yaml_path = dir_path.join("values.yaml");
    ensure!(
        path_exists_and_is_file(values_yaml_path.clone())?,
        NotAFile {
            path: values_yaml_path
        }
    );

    // Validate templates directory.
    let templates_dir_path = dir_path.join("templates");
    ensure!(
        path_exists_and_is_dir(templates_dir_path.clone())?,
        NotADirectory {
            path: templates_dir_path
        }
    );

    debug!(
        path=%dir_path.display(),
        version=%chart_yaml.version(),
        "Validated helm chart directory"
    );

    Ok(chart_yaml)
}
