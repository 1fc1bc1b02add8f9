pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{expand_assets_dir, load_table, roster_from_arg, validate_url_template};
