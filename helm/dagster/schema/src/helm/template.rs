use crate::{
    common::{
        constants::{default_chart_dir, DEFAULT_RELEASE_NAME},
        error::{
            NoTemplateOutput, Result, SerializeObjectToJson, SerializeToYaml, YamlParseFromSlice,
        },
    },
    helm::client::{HelmTemplateClient, RenderRequest, TemplateRenderer},
    values::HelmValues,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use snafu::{OptionExt, ResultExt};
use std::{collections::BTreeMap, path::PathBuf};
use tracing::debug;

/// A rendered Kubernetes object of any kind. The fields besides apiVersion, kind and metadata
/// are kept as they are.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedObject {
    pub api_version: String,
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_yaml::Value>,
}

impl RenderedObject {
    /// The object's name, or an empty string if it has none.
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context(SerializeToYaml {
            subject: format!("{} {}", self.kind, self.name()),
        })
    }
}

/// Encodes objects as a yaml stream, with a `---` separator ahead of each document, so the
/// stream decodes back into the same objects.
pub fn to_yaml_stream(objects: &[RenderedObject]) -> Result<String> {
    let mut stream = String::new();
    for object in objects {
        stream.push_str("---\n");
        stream.push_str(object.to_yaml()?.as_str());
    }
    Ok(stream)
}

/// Encodes objects as a single pretty-printed json array.
pub fn to_json_array(objects: &[RenderedObject]) -> Result<String> {
    serde_json::to_string_pretty(objects).context(SerializeObjectToJson)
}

/// This is a builder for HelmTemplate.
#[derive(Default)]
pub struct HelmTemplateBuilder {
    output: Option<String>,
    chart_dir: Option<PathBuf>,
    release_name: Option<String>,
}

impl HelmTemplateBuilder {
    /// This is a builder option to add the template path. This is mandatory, the template is
    /// passed to `helm template --show-only`.
    #[must_use]
    pub fn with_output<J>(mut self, output: J) -> Self
    where
        J: ToString,
    {
        self.output = Some(output.to_string());
        self
    }

    /// The chart to render. Defaults to the chart this crate ships in.
    #[must_use]
    pub fn with_chart_dir<P>(mut self, chart_dir: P) -> Self
    where
        P: Into<PathBuf>,
    {
        self.chart_dir = Some(chart_dir.into());
        self
    }

    #[must_use]
    pub fn with_release_name<J>(mut self, release_name: J) -> Self
    where
        J: ToString,
    {
        self.release_name = Some(release_name.to_string());
        self
    }

    /// Build the HelmTemplate with a renderer of choice.
    pub fn build_with<R>(self, renderer: R) -> Result<HelmTemplate<R>>
    where
        R: TemplateRenderer,
    {
        let output = self.output.context(NoTemplateOutput)?;
        Ok(HelmTemplate {
            output,
            chart_dir: self.chart_dir.unwrap_or_else(default_chart_dir),
            release_name: self
                .release_name
                .unwrap_or_else(|| DEFAULT_RELEASE_NAME.to_string()),
            renderer,
        })
    }

    /// Build the HelmTemplate with a `helm template` client.
    pub fn build(self) -> Result<HelmTemplate> {
        let client = HelmTemplateClient::new()?;
        self.build_with(client)
    }
}

/// HelmTemplate renders a single template of a chart against a set of values, and decodes the
/// objects the template emits.
pub struct HelmTemplate<R = HelmTemplateClient> {
    output: String,
    chart_dir: PathBuf,
    release_name: String,
    renderer: R,
}

impl HelmTemplate {
    /// Renders `output` from the bundled chart with `helm` from $PATH.
    pub fn new<J>(output: J) -> Result<Self>
    where
        J: ToString,
    {
        Self::builder().with_output(output).build()
    }

    /// This creates an empty builder.
    pub fn builder() -> HelmTemplateBuilder {
        HelmTemplateBuilder::default()
    }
}

impl<R> HelmTemplate<R>
where
    R: TemplateRenderer,
{
    /// The chart-relative path of the template.
    pub fn output(&self) -> &str {
        self.output.as_str()
    }

    pub fn chart_dir(&self) -> &PathBuf {
        &self.chart_dir
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The request passed to the renderer for these values.
    pub fn request(&self, values: &HelmValues) -> Result<RenderRequest> {
        Ok(RenderRequest {
            chart_dir: self.chart_dir.clone(),
            release_name: self.release_name.clone(),
            values_yaml: values.to_yaml()?,
            show_only: self.output.clone(),
        })
    }

    /// Renders the template and decodes each emitted document into K, e.g.
    /// k8s_openapi::api::core::v1::Secret. A template whose guard condition suppressed all of
    /// its output fails with Error::TemplateNotFound.
    pub fn render<K>(&self, values: &HelmValues) -> Result<Vec<K>>
    where
        K: DeserializeOwned,
    {
        let request = self.request(values)?;
        let manifests = self.renderer.render(&request)?;
        let objects = decode_manifests(manifests.as_slice())?;
        debug!(template=%self.output, count=objects.len(), "Rendered helm template");
        Ok(objects)
    }
}

/// Decodes a stream of yaml documents. Empty documents, like those holding only a
/// `# Source:` comment, are skipped.
pub(crate) fn decode_manifests<K>(buf: &[u8]) -> Result<Vec<K>>
where
    K: DeserializeOwned,
{
    let input_yaml = || String::from_utf8_lossy(buf).to_string();
    let mut objects: Vec<K> = Vec::new();

    if buf.iter().all(u8::is_ascii_whitespace) {
        return Ok(objects);
    }

    for document in serde_yaml::Deserializer::from_slice(buf) {
        let value = serde_yaml::Value::deserialize(document).with_context(|_| {
            YamlParseFromSlice {
                input_yaml: input_yaml(),
            }
        })?;
        if value.is_null() {
            continue;
        }
        let object = serde_yaml::from_value(value).with_context(|_| YamlParseFromSlice {
            input_yaml: input_yaml(),
        })?;
        objects.push(object);
    }

    Ok(objects)
}
