//! # livetype
//!
//! A stylesheet types itself into the terminal. Each character is run
//! through an incremental CSS highlighter as it arrives, each finished
//! declaration lands in a live stylesheet, and that stylesheet recolours
//! the screen while you watch.
//!
//! - [`app`]: the demo script and the key loop (`p` pause, `s` skip, `q` quit)
//! - [`screen`] / [`terminal`]: panels drawn with crossterm, exposed as a
//!   [`typewriter::Surface`]
//! - [`theme`]: terminal colours read out of the live stylesheet
//! - [`prefix`]: vendor prefix rewriting for the bundled stylesheets
//! - [`config`]: defaults plus `LIVETYPE_*` environment overrides
//!
//! The highlighting itself lives in the `highlight` crate and the pacing in
//! `typewriter`.

pub mod app;
pub mod assets;
pub mod config;
pub mod error;
pub mod log_init;
pub mod prefix;
pub mod screen;
pub mod terminal;
pub mod theme;

pub use app::{run, run_async};
pub use config::Config;
pub use error::{LivetypeError, Result};
pub use terminal::TerminalSurface;
