pub mod model;
pub mod parse_error;
pub mod parser;
