use std::any::Any;
use std::collections::HashSet;

use super::EngineModule;

pub const MODULE_NAME: &str = "input";

/// Minimal input state holder. The host feeds key transitions in
/// between ticks; nothing here polls a device.
#[derive(Default)]
pub struct InputModule {
    held: HashSet<String>,
}

impl InputModule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: impl Into<String>) {
        self.held.insert(key.into());
    }

    pub fn release(&mut self, key: &str) {
        self.held.remove(key);
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(key)
    }
}

impl EngineModule for InputModule {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
