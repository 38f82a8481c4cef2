mod config;
mod logging;
mod pid_file;

pub use config::{config_source, load_config};
pub use logging::init_logging;
pub use pid_file::PidFile;
