pub mod parser;
pub mod scan;

pub use parser::{pak_file_name, parse_file_name, InstalledMods, PARTIAL_SUFFIX};
pub use scan::scan_mods_dir;
