use std::fmt::Display;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Stage::Vertex => "vertex",
            Stage::Fragment => "fragment",
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShaderError {
    #[error("{0} shader source is empty")]
    Empty(Stage),

    #[error("{0} shader does not define `main`")]
    MissingEntryPoint(Stage),
}

const WHITE: [u8; 4] = [255, 255, 255, 255];

// first vec4 literal in the fragment source, components in 0..=1
const VEC4_REGEX_SPEC: &str =
    r"vec4\s*\(\s*([0-9.]+)\s*,\s*([0-9.]+)\s*,\s*([0-9.]+)\s*,\s*([0-9.]+)\s*\)";

/// A validated vertex/fragment source pair.
///
/// There is no shader backend in this build, so compiling means the
/// per-stage checks the fixed-function path needs: each source must be
/// non-empty and define an entry point. The flat output color is taken
/// from the first `vec4(r, g, b, a)` literal in the fragment source,
/// defaulting to white.
#[derive(Debug)]
pub struct ShaderProgram {
    pub vertex: String,
    pub fragment: String,
    pub color: [u8; 4],
}

impl ShaderProgram {
    pub fn compile(vertex: &str, fragment: &str) -> Result<ShaderProgram, ShaderError> {
        validate(Stage::Vertex, vertex)?;
        validate(Stage::Fragment, fragment)?;

        Ok(ShaderProgram {
            vertex: vertex.to_string(),
            fragment: fragment.to_string(),
            color: fragment_color(fragment).unwrap_or(WHITE),
        })
    }
}

fn validate(stage: Stage, source: &str) -> Result<(), ShaderError> {
    if source.trim().is_empty() {
        return Err(ShaderError::Empty(stage));
    }

    if !source.contains("main") {
        return Err(ShaderError::MissingEntryPoint(stage));
    }

    Ok(())
}

fn fragment_color(source: &str) -> Option<[u8; 4]> {
    static VEC4_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(VEC4_REGEX_SPEC).unwrap());

    let captures = VEC4_REGEX.captures(source)?;
    let mut color = [0u8; 4];

    for (slot, capture) in color.iter_mut().zip(captures.iter().skip(1)) {
        let component: f32 = capture?.as_str().parse().ok()?;
        *slot = (component.clamp(0.0, 1.0) * 255.0).round() as u8;
    }

    Some(color)
}
