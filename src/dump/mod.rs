mod discovery;
mod format;
mod repository;
mod scan;

pub use discovery::{LISTING_EXTENSION, find_listed_packages};
pub use format::{listing_lines, parse_link_listing, parse_name_list};
pub use repository::{
    Dump, DumpRepository, FILES_DIR, INSTALLED_FILE, LINKS_FILE, PROVIDES_DIR, REQUIRES_DIR,
};
pub use scan::LinkScanner;
