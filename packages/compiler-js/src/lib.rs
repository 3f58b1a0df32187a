mod compiler;
mod injector;
mod scanner;

pub use compiler::JsCompiler;
pub use injector::TemplateInjector;
pub use scanner::check_script;
