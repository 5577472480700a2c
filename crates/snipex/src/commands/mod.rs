//! CLI command implementations.

mod extract;

pub(crate) use extract::ExtractArgs;
