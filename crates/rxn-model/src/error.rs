use thiserror::Error;

/// Cleaning configuration rejected before any data is processed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "trust_labelling={trust_labelling} conflicts with column limits \
         (num_agent={num_agent}, num_catalyst={num_catalyst}, num_reagent={num_reagent}): \
         trusted labels only produce catalysts/reagents, untrusted labels only agents"
    )]
    LabellingConflict {
        trust_labelling: bool,
        num_agent: usize,
        num_catalyst: usize,
        num_reagent: usize,
    },
    #[error(
        "min_frequency_of_occurance_{which}={value} must be greater than \
         map_rare_to_other_threshold={threshold}"
    )]
    ThresholdOrder {
        which: &'static str,
        value: usize,
        threshold: usize,
    },
}
