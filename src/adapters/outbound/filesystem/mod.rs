/// Filesystem adapters for file I/O operations
mod file_reader;
mod file_writer;
mod project_file_parser;
mod solution_parser;

pub(crate) use file_reader::safe_read_file;
pub use file_reader::FileSystemReader;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use project_file_parser::{parse_project_file, ProjectFileContents};
pub use solution_parser::parse_solution;
