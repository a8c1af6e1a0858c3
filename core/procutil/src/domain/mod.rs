//! ドメイン型（Newtype、enum）
//!
//! String / i32 を直接運ばず、意味のある型に包んで境界を明確にする。

pub mod command;
pub mod status;

pub use command::ShellCommand;
pub use status::{ExecutionResult, TerminationStatus};
