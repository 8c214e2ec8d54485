// tests/persistence_tests.rs

mod common;

use std::fs;

use common::{session_with, PenCall};
use tempfile::tempdir;
use turtille::runtime::{persistence::Persistence, Interpreter};
use turtille::TurtilleError;

fn with_store(path: &std::path::Path) -> common::Session {
    session_with(Interpreter::builder().persistence(Persistence::new(path)))
}

#[test]
fn save_then_load_reproduces_macros() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store.tur");

    let mut first = with_store(&store);
    first.vm.run("sq -> f 10 r 90 f 10 r 90").unwrap();
    first.vm.run("save").unwrap();

    let mut second = with_store(&store);
    second.vm.run("load").unwrap();
    second.vm.run("sq").unwrap();
    assert_eq!(
        second.drawn(),
        vec![
            PenCall::Forward(10.0),
            PenCall::Right(90.0),
            PenCall::Forward(10.0),
            PenCall::Right(90.0),
        ]
    );
}

#[test]
fn store_lists_definitions_in_definition_order() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store.tur");

    let mut s = with_store(&store);
    s.vm.run("fr90 -> f r 90").unwrap();
    s.vm.run("rect -> 4 * fr90").unwrap();
    s.vm.run("jump -> up move 10 (-5) down").unwrap();
    s.vm.run("fr90 -> f 5 r 90").unwrap();
    s.vm.run("save").unwrap();

    assert_eq!(
        fs::read_to_string(&store).unwrap(),
        "fr90 -> f 5 r 90\nrect -> repeat 4 [fr90]\njump -> up move 10 (-5) down\n"
    );
}

#[test]
fn explicit_paths_override_the_store() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store.tur");
    let other = dir.path().join("other.tur");

    let mut s = with_store(&store);
    s.vm.run("tri -> 3 * [f r 120]").unwrap();
    s.vm.run(&format!("save \"{}\"", other.display())).unwrap();
    assert!(other.exists());
    assert!(!store.exists());

    let mut fresh = with_store(&store);
    fresh.vm.run(&format!("load \"{}\"", other.display())).unwrap();
    assert_eq!(
        fresh.vm.format_macro("tri").as_deref(),
        Some("tri -> repeat 3 [f 20 r 120]")
    );
}

#[test]
fn loading_a_missing_file_is_not_an_error() {
    let dir = tempdir().unwrap();
    let mut s = with_store(&dir.path().join("absent.tur"));
    s.vm.run("load").unwrap();
    assert_eq!(s.vm.macro_names().count(), 0);
}

#[test]
fn bad_lines_are_skipped() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store.tur");
    fs::write(
        &store,
        "good -> f 1\nthis is ( broken\nquit -> f 2\n\n  also -> r 2\nf 3\n",
    )
    .unwrap();

    let mut s = with_store(&store);
    let program = s.vm.load(None, true);
    assert_eq!(s.vm.macro_names().collect::<Vec<_>>(), vec!["good", "also"]);
    assert_eq!(program.len(), 1);
}

#[test]
fn saving_to_an_unwritable_path_is_an_io_error() {
    let dir = tempdir().unwrap();
    let mut s = with_store(&dir.path().join("missing").join("store.tur"));
    s.vm.run("sq -> f").unwrap();
    let err = s.vm.run("save").unwrap_err();
    assert!(matches!(err, TurtilleError::Io { operation: "save", .. }));
}

#[test]
fn startup_load_is_applied_when_configured() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store.tur");
    fs::write(&store, "hop -> f 2\n").unwrap();

    let mut s = session_with(
        Interpreter::builder()
            .persistence(Persistence::new(&store))
            .load_store(true),
    );
    s.vm.run("hop").unwrap();
    assert_eq!(s.drawn(), vec![PenCall::Forward(2.0)]);
}

#[test]
fn out_of_range_bodies_never_reach_the_store() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store.tur");

    let mut s = with_store(&store);
    let huge = format!("1{}", "0".repeat(309));
    assert!(s.vm.run(&format!("far -> f {huge}")).is_err());
    s.vm.run("near -> f 1").unwrap();
    s.vm.run("save").unwrap();
    assert_eq!(fs::read_to_string(&store).unwrap(), "near -> f 1\n");
}
