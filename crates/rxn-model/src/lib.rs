pub mod error;
pub mod options;
pub mod reaction;
pub mod record;
pub mod role;

pub use error::ConfigError;
pub use options::{CleanOptions, ExtractOptions, LabellingStrategy, RoleLimits, TableFormat};
pub use reaction::{ProductYield, ResolvedReaction};
pub use record::{ConditionMeasurement, RawInput, RawReactionRecord};
pub use role::{
    ColumnGroup, OTHER_SENTINEL, PROCEDURE_COLUMN, RXN_STR_COLUMN, RXN_TIME_COLUMN, RoleHint,
    TEMPERATURE_COLUMN, column_sort_key, is_numeric_column, parse_column,
};
