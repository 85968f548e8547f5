//! Command dispatch
//!
//! The one-shot catalog commands write to any [`Write`] so they can be run
//! against a buffer; dispatch hands them locked stdout.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use colored::Colorize;
use tracing::{debug, instrument};

use crate::application::report::{write_course_detail, write_course_list};
use crate::application::IoResultExt;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::shell::Shell;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    match &cli.command {
        None => run_shell(container, None),
        Some(Commands::Shell { file }) => run_shell(container, file.as_deref()),
        Some(Commands::List { file }) => list(container, file, &mut io::stdout().lock()),
        Some(Commands::Show { file, course }) => {
            show(container, file, course, &mut io::stdout().lock())
        }
        Some(Commands::Tree { file }) => tree(container, file, &mut io::stdout().lock()),
        Some(Commands::Config { command }) => config_command(cli, container, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

fn stdout_err(e: io::Error) -> CliError {
    CliError::Infra(InfraError::io("write to stdout", e))
}

#[instrument(skip(container))]
fn run_shell(container: &ServiceContainer, preload: Option<&Path>) -> CliResult<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(container, stdin.lock(), stdout.lock());
    if let Some(path) = preload {
        shell.preload(path)?;
    }
    shell.run()
}

/// Print every course in `file` in ascending number order.
#[instrument(skip(container, out))]
pub fn list(container: &ServiceContainer, file: &Path, out: &mut impl Write) -> CliResult<()> {
    let catalog = container.loader().load_new(file)?;
    write_course_list(out, &catalog).map_err(stdout_err)
}

/// Print one course with its prerequisites; a miss is [`CliError::CourseNotFound`].
#[instrument(skip(container, out))]
pub fn show(
    container: &ServiceContainer,
    file: &Path,
    number: &str,
    out: &mut impl Write,
) -> CliResult<()> {
    let catalog = container.loader().load_new(file)?;
    let course = catalog
        .search(number)
        .ok_or_else(|| CliError::CourseNotFound(number.to_string()))?;
    write_course_detail(out, course, container.settings.prerequisite_indent).map_err(stdout_err)
}

/// Deepest catalog whose shape `tree` still draws.
pub const MAX_DRAWN_DEPTH: usize = 512;

/// Print a size/depth header followed by the tree shape.
///
/// Catalogs deeper than [`MAX_DRAWN_DEPTH`] (typically a file already sorted by
/// course number) only get the header.
#[instrument(skip(container, out))]
pub fn tree(container: &ServiceContainer, file: &Path, out: &mut impl Write) -> CliResult<()> {
    let catalog = container.loader().load_new(file)?;
    let depth = catalog.depth();
    let header = format!("{} courses, depth {}", catalog.len(), depth);
    writeln!(out, "{}", header.cyan().bold()).map_err(stdout_err)?;
    if depth > MAX_DRAWN_DEPTH {
        writeln!(out, "shape omitted: depth exceeds {}", MAX_DRAWN_DEPTH).map_err(stdout_err)?;
        return Ok(());
    }
    if let Some(shape) = catalog.shape() {
        write!(out, "{}", shape).map_err(stdout_err)?;
    }
    Ok(())
}

fn config_path(cli: &Cli) -> CliResult<PathBuf> {
    cli.config
        .clone()
        .or_else(global_config_path)
        .ok_or_else(|| CliError::Usage("cannot determine config directory".into()))
}

#[instrument(skip(cli, container))]
fn config_command(cli: &Cli, container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            output::info(&config_path(cli)?.display());
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let path = config_path(cli)?;
            if container.fs.exists(&path) && !force {
                return Err(CliError::Usage(format!(
                    "config file already exists: {} (use --force to overwrite)",
                    path.display()
                )));
            }
            debug!("writing config template to {}", path.display());
            container
                .fs
                .ensure_parent(&path)
                .with_path_context("create config directory", &path)?;
            container
                .fs
                .write(&path, &Settings::template())
                .with_path_context("write config", &path)?;
            output::success(&format!("Created config: {}", path.display()));
            Ok(())
        }
    }
}
