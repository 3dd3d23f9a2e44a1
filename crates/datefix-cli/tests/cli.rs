// E2E tests for the datefix binary
use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

const SIDECAR: &str = r#"{
    "creationTime": {"timestamp": "1609459200"},
    "photoTakenTime": {"timestamp": "1609459200"},
    "photoLastModifiedTime": {"timestamp": "1612137600"}
}"#;

#[test]
fn test_fixes_an_album_tree() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("albums_input");
    input.child("trip/clip.mp4").write_binary(b"mp4 bytes").unwrap();
    input.child("trip/clip.mp4.json").write_str(SIDECAR).unwrap();
    input.child("trip/notes.txt").write_str("not media").unwrap();
    let output = temp.child("albums_output");

    let mut cmd = Command::cargo_bin("datefix").unwrap();
    cmd.arg(input.path())
        .arg("--output")
        .arg(output.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 fixed"))
        .stdout(predicate::str::contains("Handled extensions: mp4"))
        .stderr(predicate::str::contains("WARNING: .txt not handled!"));

    output.child("trip/clip.mp4").assert(predicate::path::exists());
    output.child("trip/notes.txt").assert(predicate::path::missing());
}

#[test]
fn test_missing_sidecar_is_reported_not_fatal() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("albums_input");
    input.child("trip/clip.mp4").write_binary(b"mp4 bytes").unwrap();
    let output = temp.child("albums_output");

    let mut cmd = Command::cargo_bin("datefix").unwrap();
    cmd.arg(input.path())
        .arg("-o")
        .arg(output.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 copied without metadata"))
        .stderr(predicate::str::contains("sidecar not found"));

    output.child("trip/clip.mp4").assert(predicate::path::exists());
}

#[test]
fn test_rejects_bad_mapping() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("albums_input");
    input.create_dir_all().unwrap();

    let mut cmd = Command::cargo_bin("datefix").unwrap();
    cmd.arg(input.path())
        .arg("-o")
        .arg(temp.child("albums_output").path())
        .arg("--map")
        .arg("webp=audio")
        .assert()
        .failure();
}

#[test]
fn test_missing_input_fails() {
    let temp = assert_fs::TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("datefix").unwrap();
    cmd.arg(temp.child("nope").path())
        .arg("-o")
        .arg(temp.child("albums_output").path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot list input directory"));
}
