use anyhow::Context;
use tracing::debug;

use crate::config::EngineConfig;
use crate::loader::{self, Fetch};
use crate::module::{renderer, EngineModule, ModuleManifest, ModuleRegistry, RendererModule};
use crate::report::Reporter;

const MANIFEST_MIME: &str = "text/plain";
const SHADER_MIME: &str = "text/plain";

/// The engine context. Created once in `main` and passed down
/// explicitly; nothing about it lives in a global.
pub struct Engine<F: Fetch> {
    config: EngineConfig,
    registry: ModuleRegistry,
    fetcher: F,
    reporter: Reporter,
    modules: Vec<Box<dyn EngineModule>>,
    delta_time: f32,
}

impl<F: Fetch> Engine<F> {
    pub fn new(
        config: EngineConfig,
        registry: ModuleRegistry,
        fetcher: F,
        reporter: Reporter,
    ) -> Self {
        Engine {
            config,
            registry,
            fetcher,
            reporter,
            modules: Vec::new(),
            delta_time: 0.0,
        }
    }

    /// The boot chain: resolve modules, fetch the shader pair, draw one
    /// frame.
    pub async fn boot(&mut self) -> anyhow::Result<()> {
        debug!("engine has been loaded");

        self.load_modules().await?;

        let assets = loader::load_all(
            &self.fetcher,
            &self.reporter,
            &self.config.shaders,
            SHADER_MIME,
        )
        .await
        .context("failed to load shader assets")?;

        self.render(&assets)
    }

    /// Fetch every requested module's manifest as one batch, then
    /// construct the modules from the registry in request order.
    async fn load_modules(&mut self) -> anyhow::Result<()> {
        let names = self.config.modules.clone();
        let ids: Vec<String> = names
            .iter()
            .map(|name| self.config.manifest_id(name))
            .collect();

        let payloads = loader::load_all(&self.fetcher, &self.reporter, &ids, MANIFEST_MIME)
            .await
            .context("failed to load engine modules")?;

        for (name, payload) in names.iter().zip(&payloads) {
            let manifest = ModuleManifest::parse(name, payload)?;
            debug!("engine module: {} - {}", manifest.name, manifest.description);

            if self.modules.iter().any(|module| module.name() == name.as_str()) {
                anyhow::bail!("module `{name}` constructed twice");
            }

            let module = self.registry.construct(name, &self.config)?;
            self.modules.push(module);
        }

        debug!("requested modules have been loaded");
        Ok(())
    }

    fn render(&mut self, assets: &[String]) -> anyhow::Result<()> {
        let [vertex_src, fragment_src] = assets else {
            anyhow::bail!(
                "expected a vertex/fragment source pair, got {} assets",
                assets.len()
            );
        };

        let renderer: &mut RendererModule = self
            .module_mut(renderer::MODULE_NAME)
            .context("renderer module was not constructed")?;

        renderer.render(vertex_src, fragment_src)
    }

    pub fn tick(&mut self, delta: f32) {
        self.delta_time = delta;

        for module in &mut self.modules {
            module.tick(delta);
        }
    }

    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Look up a constructed module by name, downcast to its concrete
    /// type.
    pub fn module_mut<M: 'static>(&mut self, name: &str) -> Option<&mut M> {
        self.modules
            .iter_mut()
            .find(|module| module.name() == name)?
            .as_any_mut()
            .downcast_mut::<M>()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::loader::testing::{RecordingReporter, StubFetcher};
    use crate::module::InputModule;

    const VERTEX_SRC: &str = "void main() { gl_Position = vec4(coordinates, 0.0, 1.0); }";
    const FRAGMENT_SRC: &str = "void main() { gl_FragColor = vec4(0.2, 0.4, 0.6, 1.0); }";

    fn test_config(output: std::path::PathBuf) -> EngineConfig {
        let mut config = EngineConfig::default();
        config.surface.width = 32;
        config.surface.height = 24;
        config.output = output;
        config
    }

    fn booted_stub() -> StubFetcher {
        StubFetcher::new()
            .payload("modules/input.toml", "name = \"input\"")
            .payload("modules/renderer.toml", "name = \"renderer\"")
            .payload("shaders/example_vertex.fx", VERTEX_SRC)
            .payload("shaders/example_fragment.fx", FRAGMENT_SRC)
    }

    #[tokio::test]
    async fn boot_constructs_modules_and_renders_a_frame() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("frame.png");

        let mut engine = Engine::new(
            test_config(output.clone()),
            ModuleRegistry::with_builtins().unwrap(),
            booted_stub(),
            Arc::new(RecordingReporter::default()),
        );

        engine.boot().await.unwrap();

        assert!(output.exists());
        assert!(engine.module_mut::<InputModule>("input").is_some());
        assert!(engine.module_mut::<RendererModule>("renderer").is_some());

        engine.tick(0.016);
        assert_eq!(engine.delta_time(), 0.016);
    }

    #[tokio::test]
    async fn missing_shader_asset_fails_the_boot_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let stub = StubFetcher::new()
            .payload("modules/input.toml", "name = \"input\"")
            .payload("modules/renderer.toml", "name = \"renderer\"")
            .payload("shaders/example_vertex.fx", VERTEX_SRC);
        // fragment shader answers 404

        let recorder = Arc::new(RecordingReporter::default());
        let mut engine = Engine::new(
            test_config(dir.path().join("frame.png")),
            ModuleRegistry::with_builtins().unwrap(),
            stub,
            recorder.clone(),
        );

        assert!(engine.boot().await.is_err());
        assert_eq!(
            recorder.messages(),
            vec!["Failed to load asset: example_fragment"]
        );
    }

    #[tokio::test]
    async fn mismatched_manifest_fails_the_boot() {
        let dir = tempfile::tempdir().unwrap();
        let stub = booted_stub().payload("modules/input.toml", "name = \"renderer\"");

        let mut engine = Engine::new(
            test_config(dir.path().join("frame.png")),
            ModuleRegistry::with_builtins().unwrap(),
            stub,
            Arc::new(RecordingReporter::default()),
        );

        assert!(engine.boot().await.is_err());
    }

    #[tokio::test]
    async fn unregistered_module_fails_the_boot() {
        let dir = tempfile::tempdir().unwrap();
        let stub = booted_stub().payload("modules/physics.toml", "name = \"physics\"");

        let mut config = test_config(dir.path().join("frame.png"));
        config.modules.push("physics".to_string());

        let mut engine = Engine::new(
            config,
            ModuleRegistry::with_builtins().unwrap(),
            stub,
            Arc::new(RecordingReporter::default()),
        );

        assert!(engine.boot().await.is_err());
    }
}
