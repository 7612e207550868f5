pub mod chooser;
pub mod output;
pub mod signals;

pub use chooser::{ConsoleChooser, DirectoryChooser, PresetChooser};
pub use output::{OutputFormatter, OutputMode};
pub use signals::GracefulShutdown;
