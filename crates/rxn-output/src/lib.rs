//! Output side of the pipeline.
//!
//! - **Tables**: flattened and cleaned reaction tables as Parquet or CSV
//! - **Unresolved names**: the names the extract stage could not resolve, as
//!   a JSON array consumed by the clean stage

mod common;
mod names;
mod table;

pub use common::{ensure_output_dir, table_path};
pub use names::{UNRESOLVED_NAMES_FILE, write_unresolved_names};
pub use table::{write_table, write_table_outputs};
