//! Plain-text instance and solution formats.

mod reader;
mod writer;

pub use reader::{parse_instance, parse_instance_with_limits, read_instance};
pub use writer::{format_solution, write_solution, write_solution_json};
