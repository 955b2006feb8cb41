pub mod directory_walker;
pub mod product_record;

pub use directory_walker::DirectoryWalker;
pub use product_record::{extract_product_names_and_extensions, ProductRecord};
