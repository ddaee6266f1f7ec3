/// Formatter adapters for the different report output formats
mod csv_formatter;
mod json_formatter;
mod table_formatter;
mod text_formatter;

pub use csv_formatter::CsvFormatter;
pub use json_formatter::JsonFormatter;
pub use table_formatter::TableFormatter;
pub use text_formatter::TextFormatter;
