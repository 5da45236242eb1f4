//! Command-line front end for dbreader

pub mod app;
pub mod cli;
pub mod logging;
pub mod presenter;

pub use app::{Command, Inspector};
pub use cli::{Cli, OutputFormat, dotenv_failure};
pub use logging::setup_logging;
pub use presenter::{JsonPresenter, Presenter, TextPresenter};
