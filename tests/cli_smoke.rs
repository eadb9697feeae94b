use std::path::PathBuf;

fn bin() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_scrollscene")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "scrollscene.exe"
            } else {
                "scrollscene"
            });
            p
        })
}

#[test]
fn cli_validate_accepts_fixture() {
    let fixture = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("portfolio.json");

    let status = std::process::Command::new(bin())
        .args(["validate", "--in"])
        .arg(&fixture)
        .status()
        .unwrap();
    assert!(status.success());
}

#[test]
fn cli_validate_rejects_malformed_document() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("bad.json");
    std::fs::write(&path, r#"{ "portfolio": { "name": "  " } }"#).unwrap();

    let status = std::process::Command::new(bin())
        .args(["validate", "--in"])
        .arg(&path)
        .status()
        .unwrap();
    assert!(!status.success());
}

#[test]
fn cli_simulate_runs_a_short_sweep() {
    let output = std::process::Command::new(bin())
        .args(["simulate", "--frames", "120", "--banded"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Dark") || stdout.contains("Light"));
}
