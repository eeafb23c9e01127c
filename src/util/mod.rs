pub mod fails;
pub mod paths;
