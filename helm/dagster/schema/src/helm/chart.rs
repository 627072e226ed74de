use semver::Version;
use serde::Deserialize;

/// Chart for name and version, from the Chart.yaml file.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct Chart {
    name: String,
    version: Version,
    #[serde(default)]
    app_version: Option<String>,
}

impl Chart {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn app_version(&self) -> Option<&str> {
        self.app_version.as_deref()
    }
}
