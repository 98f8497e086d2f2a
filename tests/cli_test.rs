use std::process::Command;

/// Path to the built binary
fn binary_path() -> &'static str {
    env!("CARGO_BIN_EXE_paramedit")
}

#[test]
fn test_wrong_argument_count_prints_usage() {
    let output = Command::new(binary_path())
        .arg("only-one.json")
        .output()
        .expect("Failed to run paramedit");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: paramedit"), "stderr:\n{}", stderr);
}

#[test]
fn test_missing_files_fail_before_terminal_setup() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = Command::new(binary_path())
        .arg(dir.path().join("params.json"))
        .arg(dir.path().join("model.json"))
        .env("XDG_CACHE_HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .output()
        .expect("Failed to run paramedit");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("params.json"), "stderr:\n{}", stderr);
}

#[test]
fn test_unparseable_params_reported() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let params = dir.path().join("params.json");
    let model = dir.path().join("model.json");
    std::fs::write(&params, "[{\"id\": \"one\"}]").expect("write params");
    std::fs::write(&model, "{\"paramValues\": [], \"colors\": []}").expect("write model");

    let output = Command::new(binary_path())
        .arg(&params)
        .arg(&model)
        .env("XDG_CACHE_HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .output()
        .expect("Failed to run paramedit");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot parse"), "stderr:\n{}", stderr);
}
