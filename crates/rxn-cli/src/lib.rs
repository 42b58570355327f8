//! Library components of the `rxnclean` command-line tool.

pub mod logging;
pub mod pipeline;
