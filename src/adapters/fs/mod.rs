mod discovery;
mod reader;

pub use discovery::{
    SourceDiscovery, dir_name, scan_class_name, scan_imports, scan_package_declaration,
};
pub use reader::FileSourceReader;
