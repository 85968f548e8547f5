//! Interactive menu over a course catalog
//!
//! The shell is a small state machine: a [`Session`] starts `NotLoaded` and
//! moves to `Loaded` on the first load attempt, whether or not the file could
//! be read. Listing and lookup are refused until then. Input and output are generic so the whole loop can be
//! driven from tests.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::report::{write_course_detail, write_course_list, COURSE_NOT_FOUND};
use crate::application::services::{CatalogLoader, LoadReport};
use crate::application::ApplicationResult;
use crate::cli::{CliError, CliResult};
use crate::config::Settings;
use crate::domain::Catalog;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;
use crate::util::path::expand_path;

const WELCOME: &str = "Welcome to the course planner.";
const FAREWELL: &str = "Thank you for using the course planner!";
const MENU: &str = "1. Load Data Structure\n\
                    2. Print Course List\n\
                    3. Print Course Information\n\
                    9. Exit\n";
const MENU_PROMPT: &str = "What would you like to do? ";
const NOT_A_NUMBER: &str = "Invalid input. Please enter a number.";
const UNKNOWN_OPTION: &str = "Invalid option. Please choose a valid menu option.";
const LOAD_FIRST: &str = "Please load the data first.";
const LOADED: &str = "Data loaded successfully.";

/// Whether a catalog file has been loaded (or a load attempted).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    NotLoaded,
    Loaded,
}

/// Catalog plus load state, owned by one shell run.
#[derive(Debug, Default)]
pub struct Session {
    catalog: Catalog,
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The catalog, but only once something has been loaded.
    pub fn loaded_catalog(&self) -> Option<&Catalog> {
        match self.state {
            SessionState::Loaded => Some(&self.catalog),
            SessionState::NotLoaded => None,
        }
    }

    /// Merge `path` into the catalog. The session counts as loaded even if
    /// the file cannot be read; the catalog then keeps its previous contents.
    pub fn load(&mut self, loader: &CatalogLoader, path: &Path) -> ApplicationResult<LoadReport> {
        self.state = SessionState::Loaded;
        loader.load(path, &mut self.catalog)
    }
}

/// A menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Load,
    List,
    Info,
    Exit,
}

/// Menu input that is not a valid selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInputError {
    NotANumber,
    UnknownOption(i64),
}

impl FromStr for MenuChoice {
    type Err = MenuInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: i64 = s.trim().parse().map_err(|_| MenuInputError::NotANumber)?;
        match n {
            1 => Ok(MenuChoice::Load),
            2 => Ok(MenuChoice::List),
            3 => Ok(MenuChoice::Info),
            9 => Ok(MenuChoice::Exit),
            other => Err(MenuInputError::UnknownOption(other)),
        }
    }
}

/// Interactive menu loop.
pub struct Shell<R, W> {
    loader: CatalogLoader,
    settings: Arc<Settings>,
    input: R,
    output: W,
    session: Session,
}

fn console_err(e: io::Error) -> CliError {
    CliError::Infra(InfraError::io("console", e))
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(container: &ServiceContainer, input: R, output: W) -> Self {
        Self {
            loader: container.loader(),
            settings: Arc::clone(&container.settings),
            input,
            output,
            session: Session::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Consume the shell, returning its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Load a file before the menu starts, reporting like menu option 1.
    pub fn preload(&mut self, path: &Path) -> CliResult<()> {
        self.load_from(path)
    }

    /// Run until the user exits or input ends.
    #[instrument(level = "debug", skip(self))]
    pub fn run(&mut self) -> CliResult<()> {
        writeln!(self.output, "{}", WELCOME).map_err(console_err)?;

        loop {
            write!(self.output, "\n{}\n{}", MENU, MENU_PROMPT).map_err(console_err)?;
            self.output.flush().map_err(console_err)?;

            let Some(line) = self.read_line()? else {
                debug!("end of input, leaving menu");
                return Ok(());
            };

            let choice = match line.parse::<MenuChoice>() {
                Ok(choice) => choice,
                Err(MenuInputError::NotANumber) => {
                    writeln!(self.output, "{}", NOT_A_NUMBER).map_err(console_err)?;
                    continue;
                }
                Err(MenuInputError::UnknownOption(n)) => {
                    debug!("unknown menu option {}", n);
                    writeln!(self.output, "{}", UNKNOWN_OPTION).map_err(console_err)?;
                    continue;
                }
            };

            match choice {
                MenuChoice::Load => self.load_data()?,
                MenuChoice::List => self.print_course_list()?,
                MenuChoice::Info => self.print_course_info()?,
                MenuChoice::Exit => {
                    writeln!(self.output, "{}", FAREWELL).map_err(console_err)?;
                    return Ok(());
                }
            }
        }
    }

    /// Next input line without its terminator; `None` at end of input.
    fn read_line(&mut self) -> CliResult<Option<String>> {
        let mut line = String::new();
        let n = self.input.read_line(&mut line).map_err(console_err)?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt(&mut self, text: &str) -> CliResult<Option<String>> {
        write!(self.output, "{}", text).map_err(console_err)?;
        self.output.flush().map_err(console_err)?;
        self.read_line()
    }

    fn load_data(&mut self) -> CliResult<()> {
        let answer = self.prompt("Enter file name: ")?.unwrap_or_default();
        let answer = answer.trim();

        let path = if answer.is_empty() {
            self.settings.data_file.clone()
        } else {
            Some(PathBuf::from(answer))
        };

        match path {
            Some(path) => self.load_from(&path),
            None => {
                writeln!(self.output, "Error: No file name given.").map_err(console_err)?;
                Ok(())
            }
        }
    }

    fn load_from(&mut self, path: &Path) -> CliResult<()> {
        match self.session.load(&self.loader, &expand_path(path)) {
            Ok(report) => {
                debug!("load report: {:?}", report);
                writeln!(self.output, "{}", LOADED).map_err(console_err)?;
            }
            Err(e) => {
                warn!("load failed: {}", e);
                writeln!(self.output, "Error: Could not open file {}", path.display())
                    .map_err(console_err)?;
            }
        }
        Ok(())
    }

    fn print_course_list(&mut self) -> CliResult<()> {
        let written = match self.session.loaded_catalog() {
            Some(catalog) => write_course_list(&mut self.output, catalog),
            None => writeln!(self.output, "{}", LOAD_FIRST),
        };
        written.map_err(console_err)
    }

    fn print_course_info(&mut self) -> CliResult<()> {
        if self.session.loaded_catalog().is_none() {
            return writeln!(self.output, "{}", LOAD_FIRST).map_err(console_err);
        }

        let answer = self.prompt("Enter course number: ")?.unwrap_or_default();
        let number = answer.split_whitespace().next().unwrap_or("");

        let written = match self.session.catalog().search(number) {
            Some(course) => {
                write_course_detail(&mut self.output, course, self.settings.prerequisite_indent)
            }
            None => writeln!(self.output, "{}", COURSE_NOT_FOUND),
        };
        written.map_err(console_err)
    }
}
