//! Terminal interaction with the release operator

pub mod console;

pub use console::Console;
