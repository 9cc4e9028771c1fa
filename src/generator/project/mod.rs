mod generate;
mod write;

pub use generate::{
    generate_catalog_module, render_catalog_module, GenerateOptions, GenerationReport,
    DEFAULT_OUTPUT,
};
pub use write::{export_document, write_atomic, DEFAULT_DATA_OUTPUT};
