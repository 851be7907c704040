pub mod constants;
pub mod filename;
pub mod numeric;
pub mod progress;
pub mod sanitize;

pub use constants::*;
pub use progress::{ConsoleSink, ProgressReporter};
pub use sanitize::sanitize_variable_name;
