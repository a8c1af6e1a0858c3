//! ドメイン型（enum、入力の組）

pub mod command;
pub use command::{Command, Endpoint, RunRequest};
