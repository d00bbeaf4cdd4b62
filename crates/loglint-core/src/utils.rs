//! Utility functions shared by the analyzer and extractor.

pub mod allowance;
pub mod paths;

#[doc(inline)]
pub use allowance::{check_allow_with_reason, AllowCheck};
#[doc(inline)]
pub use paths::{path_to_string, split_last_segment};
