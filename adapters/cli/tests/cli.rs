use std::{fs, path::Path, process::Command};

fn validate(levels_dir: &Path) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_ledgehop"))
        .args(["--validate-levels", "--levels-dir"])
        .arg(levels_dir)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to launch ledgehop binary")
}

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "ledgehop"])
        .status()
        .expect("failed to invoke cargo check for ledgehop CLI binary");

    assert!(status.success(), "cargo check --bin ledgehop should succeed");
}

#[test]
fn validation_reports_every_consecutive_level() {
    let dir = tempfile::tempdir().expect("temporary directory");
    fs::write(dir.path().join("level_1.txt"), "P...\n####").expect("write level 1");
    fs::write(dir.path().join("level_2.txt"), "P.SE\n@$##").expect("write level 2");
    fs::write(dir.path().join("level_4.txt"), "not reached").expect("write level 4");

    let output = validate(dir.path());
    assert!(output.status.success(), "validation should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("level 1: 4x2 (4 solid tiles, 0 spikes, no exit)"));
    assert!(stdout.contains("level 2: 4x2 (4 solid tiles, 1 spikes, exit present)"));
    assert!(!stdout.contains("level 4"));
}

#[test]
fn validation_fails_on_malformed_level() {
    let dir = tempfile::tempdir().expect("temporary directory");
    fs::write(dir.path().join("level_1.txt"), "P.P\n###").expect("write level 1");

    let output = validate(dir.path());
    assert!(!output.status.success(), "two players must be rejected");
}

#[test]
fn validation_fails_without_levels() {
    let dir = tempfile::tempdir().expect("temporary directory");

    let output = validate(dir.path());
    assert!(!output.status.success());
}

#[test]
fn shipped_levels_are_valid() {
    let levels = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../levels");

    let output = validate(&levels);
    assert!(
        output.status.success(),
        "shipped levels should validate: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}
