use crate::{
    common::{
        constants::POSTGRESQL_SECRET_TEMPLATE,
        error::{Result, TemplateNotFound, YamlParseFromSlice},
    },
    helm::client::{RenderRequest, TemplateRenderer},
    values::HelmValues,
};
use snafu::ResultExt;
use std::cell::RefCell;

/// MockRenderer stands in for `helm template`. It emulates the guard condition of
/// templates/secret-postgres.yaml and reports every other template as not found. Each request
/// is recorded.
#[derive(Default)]
pub(crate) struct MockRenderer {
    requests: RefCell<Vec<RenderRequest>>,
}

impl MockRenderer {
    pub(crate) fn requests(&self) -> Vec<RenderRequest> {
        self.requests.borrow().clone()
    }

    fn secret_manifest(request: &RenderRequest) -> String {
        format!(
            r#"---
# Source: dagster/templates/secret-postgres.yaml
apiVersion: v1
kind: Secret
metadata:
  name: "dagster-postgresql-secret"
  labels:
    app: dagster
    chart: dagster-0.9.0
    release: {}
    heritage: Helm
type: Opaque
data:
  postgresql-password: "dGVzdA=="
"#,
            request.release_name
        )
    }
}

impl TemplateRenderer for MockRenderer {
    fn render(&self, request: &RenderRequest) -> Result<Vec<u8>> {
        self.requests.borrow_mut().push(request.clone());

        let values: HelmValues =
            serde_yaml::from_slice(request.values_yaml.as_slice()).context(YamlParseFromSlice {
                input_yaml: String::from_utf8_lossy(request.values_yaml.as_slice()).to_string(),
            })?;

        if request.show_only.eq(POSTGRESQL_SECRET_TEMPLATE)
            && values.generate_postgresql_password_secret()
        {
            return Ok(Self::secret_manifest(request).into_bytes());
        }

        TemplateNotFound {
            template: request.show_only.clone(),
            chart_dir: request.chart_dir.clone(),
            std_err: format!(
                "Error: could not find template {} in chart",
                request.show_only
            ),
        }
        .fail()
    }
}
