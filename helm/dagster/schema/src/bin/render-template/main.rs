use crate::opts::{CliArgs, OutputFormat};
use clap::Parser;
use dagster_helm_schema::{
    helm::{
        template::{to_json_array, to_yaml_stream},
        validators::{validate_helm_chart_dir, validate_helmv3_in_path},
    },
    Error, HelmTemplate, HelmTemplateClient, HelmValues, RenderedObject, Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod opts;

fn main() {
    init_logging();

    let opts = CliArgs::parse();
    match render(&opts) {
        Ok(()) => {}
        Err(Error::TemplateNotFound {
            template, std_err, ..
        }) => {
            info!(%template, "Template rendered no objects");
            console_logger::skipped(
                format!("Template {template} rendered no objects with these values").as_str(),
                std_err.as_str(),
            );
            std::process::exit(1);
        }
        Err(error) => {
            error!(%error, "Failed to render template");
            console_logger::error("Failed to render template", error.to_string().as_str());
            std::process::exit(1);
        }
    }
}

/// Initialize logging components -- tracing. Logs and console messages go to stderr, so stdout
/// carries only the rendered objects.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

/// Validates the inputs, renders the template and prints the objects it emitted to stdout, as one
/// yaml stream or one json array.
fn render(opts: &CliArgs) -> Result<()> {
    validate_helmv3_in_path(opts.helm())?;
    let chart = validate_helm_chart_dir(opts.chart_dir())?;
    info!(chart = chart.name(), version = %chart.version(), "Validated all inputs");

    let mut values = match opts.values() {
        Some(path) => HelmValues::from_yaml_file(path)?,
        None => HelmValues::default(),
    };
    if let Some(generate) = opts.generate_postgresql_password_secret() {
        values.generate_postgresql_password_secret = Some(generate);
    }

    let client = HelmTemplateClient::builder()
        .with_command(opts.helm())
        .build()?;
    let template = HelmTemplate::builder()
        .with_output(opts.show_only())
        .with_chart_dir(opts.chart_dir())
        .with_release_name(opts.release_name())
        .build_with(client)?;

    let objects: Vec<RenderedObject> = template.render(&values)?;
    console_logger::info(
        format!(
            "Rendered {} object(s) from {}",
            objects.len(),
            template.output()
        )
        .as_str(),
    );

    for object in objects.iter() {
        console_logger::object(object.kind.as_str(), object.name());
    }

    // The yaml stream already ends each document with a newline.
    match opts.output() {
        OutputFormat::Yaml => print!("{}", to_yaml_stream(objects.as_slice())?),
        OutputFormat::Json => println!("{}", to_json_array(objects.as_slice())?),
    }

    Ok(())
}
