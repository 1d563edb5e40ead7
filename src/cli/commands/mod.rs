pub mod options;

pub use options::{get_command, info_command, init_command, list_command, set_command};
