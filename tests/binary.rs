use anyhow::Result;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const SCRIPT: &str = "FLY away\nADD SHIP owner=A\nPRINT\n";

fn run_binary(dir: &Path, args: &[&str]) -> Result<Output> {
    let output = Command::new(env!("CARGO_BIN_EXE_transport_commands"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()?;
    Ok(output)
}

fn dir_with_commands(content: &str) -> Result<tempfile::TempDir> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("commands.txt"), content)?;
    Ok(dir)
}

#[test]
fn test_lenient_run_reads_default_file_and_exits_zero() -> Result<()> {
    let dir = dir_with_commands(SCRIPT)?;
    let output = run_binary(dir.path(), &[])?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8(output.stdout)?, "[PRINT]\nКонтейнер пуст\n");
    assert!(!String::from_utf8(output.stderr)?.contains("line 1:"));
    Ok(())
}

#[test]
fn test_strict_run_with_failures_exits_one() -> Result<()> {
    let dir = dir_with_commands(SCRIPT)?;
    let output = run_binary(dir.path(), &["--strict"])?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8(output.stdout)?, "[PRINT]\nКонтейнер пуст\n");
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("line 1: unknown command `FLY`"));
    assert!(stderr.contains("line 2: cannot build transport"));
    Ok(())
}

#[test]
fn test_strict_run_without_failures_exits_zero() -> Result<()> {
    let dir = dir_with_commands(
        "ADD TRAIN owner=Ivan speed=100 distance=900 wagons=10\nREM wagons == 10\n",
    )?;
    let output = run_binary(dir.path(), &["--strict"])?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "[REM]\nУдалено объектов: 1\n"
    );
    Ok(())
}

#[test]
fn test_verbose_logs_stay_off_stdout() -> Result<()> {
    let dir = dir_with_commands("ADD TRAIN owner=Ivan speed=100 distance=900 wagons=10\nPRINT\n")?;
    fs::rename(dir.path().join("commands.txt"), dir.path().join("fleet.txt"))?;
    let output = run_binary(dir.path(), &["-v", "fleet.txt"])?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "[PRINT]\n[Поезд] Владелец: Ivan, Скорость: 100, Расстояние: 900, Вагоны: 10\n"
    );
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("added"));
    assert!(stderr.contains("done"));
    Ok(())
}

#[test]
fn test_missing_default_file_fails() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let output = run_binary(dir.path(), &[])?;

    assert_ne!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8(output.stderr)?.contains("cannot open commands file"));
    Ok(())
}
