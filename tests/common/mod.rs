use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::fixture::ChildPath;
use assert_fs::prelude::*;
use std::path::Path;

/// A source directory with the given files and an empty collection next to it.
pub fn setup_dirs(temp_dir: &TempDir, files: &[&str]) -> (ChildPath, ChildPath) {
    let source = temp_dir.child("incoming");
    source.create_dir_all().unwrap();
    for name in files {
        source.child(name).write_str(name).unwrap();
    }
    let collection = temp_dir.child("collection");
    collection.create_dir_all().unwrap();
    (source, collection)
}

/// `digiimport` run from `source`, with HOME pointing at the temp dir so the
/// user's own ~/.digipics.cfg is never read.
pub fn digiimport(temp_dir: &TempDir, source: &ChildPath) -> Command {
    let mut cmd = Command::cargo_bin("digiimport").unwrap();
    cmd.current_dir(source.path()).env("HOME", temp_dir.path());
    cmd
}

pub fn get_test_photos_dir() -> &'static Path {
    Path::new("tests/fixtures")
}

pub fn exiftool_available() -> bool {
    std::process::Command::new("exiftool")
        .arg("-ver")
        .output()
        .is_ok_and(|out| out.status.success())
}
