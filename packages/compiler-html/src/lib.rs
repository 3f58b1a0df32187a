mod minifier;
mod serializer;

pub use minifier::{minify, minify_nodes, MinifyError, MinifyOptions};
pub use serializer::serialize;

#[cfg(test)]
mod tests;
