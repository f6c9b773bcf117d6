//! Library side of the `filecat` binary, split out so commands can be tested.
pub mod assignments;
pub mod clipboard;
pub mod commands;
pub mod interactive;
pub mod output;
