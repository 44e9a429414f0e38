use std::{fs, path::PathBuf, process::Command};

fn write_config(name: &str, contents: &str) -> PathBuf {
    let file = format!("spice-defence-{}-{name}.toml", std::process::id());
    let path = std::env::temp_dir().join(file);
    fs::write(&path, contents).expect("temp dir is writable");
    path
}

#[test]
fn single_wave_run_prints_victory_summary() {
    let config = write_config("victory", "final_wave = 1\nguard_damage = 10000\n");

    let output = Command::new(env!("CARGO_BIN_EXE_spice-defence"))
        .arg("--config")
        .arg(&config)
        .args(["--towers-per-wave", "4"])
        .output()
        .expect("failed to launch spice-defence");
    let _ = fs::remove_file(&config);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("phase: Won\n"), "unexpected summary: {stdout}");
    assert!(stdout.contains("wave: 1 of 1"));
    assert!(stdout.contains("Guard: built 4"));
}

#[test]
fn unknown_config_keys_fail_the_run() {
    let config = write_config("unknown", "lasers = true\n");

    let output = Command::new(env!("CARGO_BIN_EXE_spice-defence"))
        .arg("--config")
        .arg(&config)
        .output()
        .expect("failed to launch spice-defence");
    let _ = fs::remove_file(&config);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to parse config"));
}
