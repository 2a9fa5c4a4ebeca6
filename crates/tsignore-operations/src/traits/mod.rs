mod source_file_io;

pub use source_file_io::{SourceReader, SourceWriter};
