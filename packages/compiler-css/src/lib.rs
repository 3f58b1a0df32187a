mod compiler;
mod minifier;
mod plugin;

pub use compiler::{check_stylesheet, CssCompiler};
pub use minifier::{calculate_compression_ratio, minify_stylesheet};
pub use plugin::{builtin_plugin, MinifyCssPlugin, BUILTIN_PLUGINS};
