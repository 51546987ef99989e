//! Console output: severities, logger handles, the output facade and table
//! renderers

mod console;
mod logger;
mod renderer;
mod severity;

pub use console::ConsoleOutput;
pub use logger::Logger;
pub use renderer::{
    PlainRenderer, RendererKind, RichRenderer, SilentRenderer, TableOptions, TableRenderer,
};
pub use severity::Severity;
