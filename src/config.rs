use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Engine configuration, read from `engine.toml` and overridable from
/// the command line. Built once at startup and passed by reference to
/// everything that needs it.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Root that local resource identifiers resolve under.
    pub root: PathBuf,

    /// Where module manifests live, relative to the root.
    pub modules_path: String,

    /// Modules the boot sequence resolves, in construction order.
    pub modules: Vec<String>,

    /// The vertex/fragment source pair fetched at boot.
    pub shaders: Vec<String>,

    pub surface: SurfaceConfig,

    /// Where the rendered frame is written.
    pub output: PathBuf,

    /// Log debug detail.
    pub debug: bool,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            root: PathBuf::from("./content"),
            modules_path: "modules".to_string(),
            modules: vec!["input".to_string(), "renderer".to_string()],
            shaders: vec![
                "shaders/example_vertex.fx".to_string(),
                "shaders/example_fragment.fx".to_string(),
            ],
            surface: SurfaceConfig::default(),
            output: PathBuf::from("./frame.png"),
            debug: false,
        }
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        SurfaceConfig {
            width: 1280,
            height: 720,
        }
    }
}

impl EngineConfig {
    /// A missing file just yields the defaults; a present but invalid
    /// file is an error.
    pub async fn load(path: &Path) -> anyhow::Result<EngineConfig> {
        let contents = tokio::fs::read_to_string(path).await.unwrap_or_default();

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Manifest identifier for a logical module name.
    pub fn manifest_id(&self, module: &str) -> String {
        format!("{}/{module}.toml", self.modules_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = EngineConfig::load(&dir.path().join("engine.toml"))
            .await
            .unwrap();

        assert_eq!(config.modules, vec!["input", "renderer"]);
        assert_eq!(config.surface.width, 1280);
        assert!(!config.debug);
    }

    #[tokio::test]
    async fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        tokio::fs::write(
            &path,
            "root = \"./assets\"\ndebug = true\n\n[surface]\nwidth = 640\nheight = 480\n",
        )
        .await
        .unwrap();

        let config = EngineConfig::load(&path).await.unwrap();

        assert_eq!(config.root, PathBuf::from("./assets"));
        assert_eq!(config.surface.height, 480);
        assert!(config.debug);
        // untouched fields keep their defaults
        assert_eq!(config.modules_path, "modules");
    }

    #[tokio::test]
    async fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        tokio::fs::write(&path, "surface = 3").await.unwrap();

        assert!(EngineConfig::load(&path).await.is_err());
    }

    #[test]
    fn manifest_ids_live_under_the_modules_path() {
        let config = EngineConfig::default();
        assert_eq!(config.manifest_id("renderer"), "modules/renderer.toml");
    }
}
