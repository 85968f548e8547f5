//! End-to-end tests for the interactive shell

use std::io::Cursor;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use coursecat::cli::shell::{SessionState, Shell};
use coursecat::config::Settings;
use coursecat::infrastructure::di::ServiceContainer;
use coursecat::util::testing;

const SAMPLE: &str = "CS101,Intro,\nCS201,DS,CS101\n";

/// Helper to create a catalog file for testing
fn create_catalog(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write catalog file");
    path
}

/// Run the shell over `input`, returning its output and final state.
fn run_shell(settings: Settings, preload: Option<&Path>, input: &str) -> (String, SessionState) {
    testing::init_test_setup();
    let container = ServiceContainer::new(settings);
    let mut shell = Shell::new(&container, Cursor::new(input.to_string()), Vec::new());
    if let Some(path) = preload {
        shell.preload(path).unwrap();
    }
    shell.run().unwrap();
    let state = shell.session().state();
    let output = String::from_utf8(shell.into_output()).unwrap();
    (output, state)
}

#[test]
fn given_sample_catalog_when_listing_and_querying_then_prints_expected_views() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = create_catalog(&temp, "courses.csv", SAMPLE);
    let input = format!("1\n{}\n2\n3\nCS201\n3\nCS999\n9\n", path.display());

    // Act
    let (output, state) = run_shell(Settings::default(), None, &input);

    // Assert
    assert_eq!(state, SessionState::Loaded);
    assert!(output.starts_with("Welcome to the course planner.\n"));
    assert!(output.contains("Data loaded successfully.\n"));
    let intro = output.find("CS101, Intro\n").expect("CS101 listed");
    let ds = output.find("CS201, DS\n").expect("CS201 listed");
    assert!(intro < ds, "CS101 must be listed before CS201");
    assert!(output.contains("Enter course number: CS201, DS\nPrerequisites:\n  CS101\n"));
    assert!(output.contains("Enter course number: Course not found.\n"));
    assert!(output.ends_with("Thank you for using the course planner!\n"));
}

#[test]
fn given_loaded_catalog_when_listing_twice_then_output_is_identical() {
    let temp = TempDir::new().unwrap();
    let path = create_catalog(&temp, "courses.csv", SAMPLE);
    let input = format!("1\n{}\n2\n2\n9\n", path.display());

    let (output, _) = run_shell(Settings::default(), None, &input);

    assert_eq!(output.matches("CS101, Intro\nCS201, DS\n").count(), 2);
}

#[test]
fn given_nothing_loaded_when_listing_or_querying_then_asks_to_load_first() {
    let (output, state) = run_shell(Settings::default(), None, "2\n3\n9\n");

    assert_eq!(state, SessionState::NotLoaded);
    assert_eq!(output.matches("Please load the data first.\n").count(), 2);
    assert!(!output.contains("Enter course number:"));
}

#[test]
fn given_bad_menu_input_when_running_then_reprompts_without_exiting() {
    let (output, _) = run_shell(Settings::default(), None, "abc\n\n7\n9\n");

    assert_eq!(
        output
            .matches("Invalid input. Please enter a number.\n")
            .count(),
        2
    );
    assert_eq!(
        output
            .matches("Invalid option. Please choose a valid menu option.\n")
            .count(),
        1
    );
    assert_eq!(output.matches("What would you like to do? ").count(), 4);
    assert!(output.ends_with("Thank you for using the course planner!\n"));
}

#[test]
fn given_missing_file_when_loading_then_reports_and_lists_empty_catalog() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.csv");
    let input = format!("1\n{}\n2\n3\nCS101\n9\n", missing.display());

    let (output, state) = run_shell(Settings::default(), None, &input);

    assert_eq!(state, SessionState::Loaded);
    assert!(output.contains(&format!("Error: Could not open file {}\n", missing.display())));
    assert!(!output.contains("Please load the data first."));
    assert!(!output.contains("Data loaded successfully."));
    assert!(output.contains("Enter course number: Course not found.\n"));
}

#[test]
fn given_failed_load_when_loading_valid_file_then_courses_are_listed() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.csv");
    let path = create_catalog(&temp, "courses.csv", SAMPLE);
    let input = format!("1\n{}\n1\n{}\n2\n9\n", missing.display(), path.display());

    let (output, state) = run_shell(Settings::default(), None, &input);

    assert_eq!(state, SessionState::Loaded);
    assert!(output.contains("CS101, Intro\nCS201, DS\n"));
}

#[test]
fn given_end_of_input_when_running_then_returns_quietly() {
    let (output, state) = run_shell(Settings::default(), None, "");

    assert_eq!(state, SessionState::NotLoaded);
    assert!(output.ends_with("What would you like to do? "));
    assert!(!output.contains("Thank you"));
}

#[test]
fn given_file_name_with_spaces_when_loading_then_uses_whole_line() {
    let temp = TempDir::new().unwrap();
    let path = create_catalog(&temp, "my courses.csv", SAMPLE);
    let input = format!("1\n  {}  \n2\n9\n", path.display());

    let (output, state) = run_shell(Settings::default(), None, &input);

    assert_eq!(state, SessionState::Loaded);
    assert!(output.contains("CS101, Intro\nCS201, DS\n"));
}

#[test]
fn given_configured_data_file_when_file_prompt_left_empty_then_loads_it() {
    let temp = TempDir::new().unwrap();
    let path = create_catalog(&temp, "default.csv", SAMPLE);
    let settings = Settings {
        data_file: Some(path),
        ..Settings::default()
    };

    let (output, state) = run_shell(settings, None, "1\n\n2\n9\n");

    assert_eq!(state, SessionState::Loaded);
    assert!(output.contains("CS101, Intro\nCS201, DS\n"));
}

#[test]
fn given_no_configured_data_file_when_file_prompt_left_empty_then_reports() {
    let (output, state) = run_shell(Settings::default(), None, "1\n\n9\n");

    assert_eq!(state, SessionState::NotLoaded);
    assert!(output.contains("Error: No file name given.\n"));
}

#[test]
fn given_preloaded_file_when_listing_then_no_load_step_needed() {
    let temp = TempDir::new().unwrap();
    let path = create_catalog(&temp, "courses.csv", SAMPLE);

    let (output, state) = run_shell(Settings::default(), Some(&path), "2\n9\n");

    assert_eq!(state, SessionState::Loaded);
    assert!(output.starts_with("Data loaded successfully.\nWelcome to the course planner.\n"));
    assert!(output.contains("CS101, Intro\nCS201, DS\n"));
}

#[test]
fn given_custom_indent_when_showing_course_then_indents_prerequisites() {
    let temp = TempDir::new().unwrap();
    let path = create_catalog(&temp, "courses.csv", "CS301,Algorithms,CS201,MATH101\n");
    let settings = Settings {
        prerequisite_indent: 4,
        ..Settings::default()
    };
    let input = format!("1\n{}\n3\n  CS301  \n9\n", path.display());

    let (output, _) = run_shell(settings, None, &input);

    assert!(output.contains("CS301, Algorithms\nPrerequisites:\n    CS201\n    MATH101\n"));
}

#[test]
fn given_course_without_prerequisites_when_showing_then_says_none() {
    let temp = TempDir::new().unwrap();
    let path = create_catalog(&temp, "courses.csv", SAMPLE);
    let input = format!("1\n{}\n3\nCS101\n9\n", path.display());

    let (output, _) = run_shell(Settings::default(), None, &input);

    assert!(output.contains("CS101, Intro\nPrerequisites: None\n"));
}

#[test]
fn given_lowercase_query_when_showing_then_not_found() {
    let temp = TempDir::new().unwrap();
    let path = create_catalog(&temp, "courses.csv", SAMPLE);
    let input = format!("1\n{}\n3\ncs101\n9\n", path.display());

    let (output, _) = run_shell(Settings::default(), None, &input);

    assert!(output.contains("Course not found.\n"));
}
