//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod generate;
mod pipeline;

pub(crate) use check::CheckArgs;
pub(crate) use generate::GenerateArgs;
