//! Input side of the pipeline: raw record files, reference-table overrides
//! and the flattened tables written by the extract stage.

pub mod discovery;
pub mod error;
pub mod records;
pub mod reference;
pub mod tables;

pub use discovery::{FileFilter, list_files};
pub use error::{IngestError, Result};
pub use records::{RecordFormat, read_records, read_records_from_str};
pub use reference::{ReferencePaths, load_reference_data, read_name_list, read_unresolved_names};
pub use tables::{read_table, read_tables};
