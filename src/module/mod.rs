// Engine modules are resolved by logical name from a registry built at
// startup, then constructed once their manifests have been fetched.

pub mod input;
pub mod renderer;

use std::any::Any;
use std::collections::HashMap;

use anyhow::Context;
use serde::Deserialize;

use crate::config::EngineConfig;

pub use input::InputModule;
pub use renderer::RendererModule;

/// A constructed engine module, ticked each frame.
pub trait EngineModule: Any + Send {
    fn name(&self) -> &'static str;

    fn tick(&mut self, _delta: f32) {}

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

type ModuleFactory = Box<dyn Fn(&EngineConfig) -> anyhow::Result<Box<dyn EngineModule>> + Send + Sync>;

/// Maps logical module names to constructors. Every module a boot
/// sequence may request has to be registered here before the engine
/// starts; nothing is resolved by injecting code at runtime.
#[derive(Default)]
pub struct ModuleRegistry {
    factories: HashMap<String, ModuleFactory>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in engine modules.
    pub fn with_builtins() -> anyhow::Result<Self> {
        let mut registry = ModuleRegistry::new();

        registry.register(input::MODULE_NAME, |_| Ok(Box::new(InputModule::new())))?;
        registry.register(renderer::MODULE_NAME, |config| {
            Ok(Box::new(RendererModule::new(config)?))
        })?;

        Ok(registry)
    }

    pub fn register(
        &mut self,
        name: &str,
        factory: impl Fn(&EngineConfig) -> anyhow::Result<Box<dyn EngineModule>> + Send + Sync + 'static,
    ) -> anyhow::Result<()> {
        if self.factories.contains_key(name) {
            anyhow::bail!("module `{name}` is already registered");
        }

        self.factories.insert(name.to_string(), Box::new(factory));
        Ok(())
    }

    pub fn construct(
        &self,
        name: &str,
        config: &EngineConfig,
    ) -> anyhow::Result<Box<dyn EngineModule>> {
        let factory = self
            .factories
            .get(name)
            .with_context(|| format!("module `{name}` is not registered"))?;

        factory(config)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

/// On-disk declaration fetched for each requested module before it is
/// constructed. The declared name has to match the logical name the
/// manifest was fetched for.
#[derive(Debug, Deserialize)]
pub struct ModuleManifest {
    pub name: String,

    #[serde(default)]
    pub description: String,
}

impl ModuleManifest {
    pub fn parse(expected_name: &str, payload: &str) -> anyhow::Result<ModuleManifest> {
        let manifest: ModuleManifest = toml::from_str(payload)
            .with_context(|| format!("failed to parse manifest for module `{expected_name}`"))?;

        if manifest.name != expected_name {
            anyhow::bail!(
                "manifest declares module `{}`, expected `{expected_name}`",
                manifest.name
            );
        }

        Ok(manifest)
    }
}
