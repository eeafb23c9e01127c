/// Short display name for a resource identifier: the final path segment
/// with its extension stripped, so `content/shaders/example_vertex.fx`
/// logs as `example_vertex`.
pub fn path_to_name(path: &str) -> &str {
    let file = path.rsplit('/').next().unwrap_or(path);
    file.split('.').next().unwrap_or(file)
}
