//! coursecat: load a course catalog into an ordered tree, list it, look up prerequisites.
//!
//! Layers, innermost first: [`domain`] (courses and the catalog tree),
//! [`application`] (loading and rendering), [`infrastructure`] (I/O boundary
//! and wiring), [`cli`] (arguments, commands and the interactive menu).

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
