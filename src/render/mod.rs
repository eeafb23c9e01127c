// The terminal consumer of a loaded shader pair: surface selection,
// shader validation, and the software raster path.

pub mod raster;
pub mod shader;
pub mod surface;
