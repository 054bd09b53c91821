mod filename;
mod writer;

pub use filename::unique_filename;
pub use writer::save_records_to_csv;
