pub mod size;

pub use size::format_file_size;
