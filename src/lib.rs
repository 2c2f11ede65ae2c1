//! OSBA - Our [Simulated] Business Application
//!
//! Two small demo programs sharing one library:
//!
//! - `osba`: a stateful CLI application that keeps a record list in a JSON
//!   document and ties it to a log file through a generated identifier.
//! - `pii-scan`: a naive line scanner that reports lines matching the
//!   contents of a name file.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod menu;
pub mod progress;
pub mod scanner;
pub mod session;

pub use app::run_app;
