use std::any::Any;
use std::path::PathBuf;

use anyhow::Context;
use tracing::info;

use crate::config::EngineConfig;
use crate::render::shader::ShaderProgram;
use crate::render::surface::{self, Surface};

use super::EngineModule;

pub const MODULE_NAME: &str = "renderer";

/// The vertex positions the demo hard-codes: one quad as a triangle
/// pair, in clip coordinates.
const QUAD_VERTICES: [[f32; 2]; 6] = [
    // first triangle
    [1.0, 1.0],
    [-1.0, 1.0],
    [-1.0, -1.0],
    // second triangle
    [-1.0, -1.0],
    [1.0, -1.0],
    [1.0, 1.0],
];

const OVERLAY_LABEL: &str = "Renderer test";

/// Terminal consumer of a loaded shader pair. Picks a render context
/// at construction and draws one frame per `render` call.
pub struct RendererModule {
    surface: Box<dyn Surface>,
    output: PathBuf,
}

impl RendererModule {
    pub fn new(config: &EngineConfig) -> anyhow::Result<Self> {
        let surface = surface::create(config.surface.width, config.surface.height)?;

        Ok(RendererModule {
            surface,
            output: config.output.clone(),
        })
    }

    /// Compile the fetched pair, draw the triangle pair plus overlay,
    /// and write the frame out.
    pub fn render(&mut self, vertex_src: &str, fragment_src: &str) -> anyhow::Result<()> {
        let program = ShaderProgram::compile(vertex_src, fragment_src)?;

        self.surface.draw(&program, &QUAD_VERTICES, OVERLAY_LABEL);

        self.surface
            .frame()
            .save(&self.output)
            .with_context(|| format!("failed to write frame to {}", self.output.display()))?;

        info!("wrote frame to {}", self.output.display());
        Ok(())
    }
}

impl EngineModule for RendererModule {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(output: PathBuf) -> EngineConfig {
        let mut config = EngineConfig::default();
        config.surface.width = 32;
        config.surface.height = 24;
        config.output = output;
        config
    }

    #[test]
    fn renders_a_frame_to_the_output_path() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("frame.png");

        let mut renderer = RendererModule::new(&config(output.clone())).unwrap();
        renderer
            .render(
                "void main() { gl_Position = vec4(coordinates, 0.0, 1.0); }",
                "void main() { gl_FragColor = vec4(0.2, 0.4, 0.6, 1.0); }",
            )
            .unwrap();

        assert!(output.exists());
    }

    #[test]
    fn invalid_shader_source_fails_the_render() {
        let dir = tempfile::tempdir().unwrap();
        let mut renderer = RendererModule::new(&config(dir.path().join("frame.png"))).unwrap();

        assert!(renderer.render("", "void main() {}").is_err());
    }
}
