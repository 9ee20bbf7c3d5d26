use anyhow::Result;
use std::process::Command;

fn scribeql() -> Command {
    Command::new(env!("CARGO_BIN_EXE_scribeql"))
}

/// The help text lists the one-shot subcommands
#[test]
fn test_cli_help() -> Result<()> {
    let output = scribeql().arg("--help").output()?;
    assert!(output.status.success(), "--help failed");

    let text = String::from_utf8(output.stdout)?;
    for command in ["shell", "schemas", "tables", "ddl", "dml"] {
        assert!(text.contains(command), "help is missing {}", command);
    }
    Ok(())
}

/// A one-shot command against an unreachable server fails with a message
#[test]
fn test_cli_unreachable_server() -> Result<()> {
    let output = scribeql()
        .args(["--host", "127.0.0.1", "--port", "1", "--query-timeout-secs", "5", "tables"])
        .env("PGPASSWORD", "unused")
        .output()?;

    assert!(!output.status.success(), "expected a connection failure");
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Failed to connect"), "unexpected stderr: {}", stderr);
    Ok(())
}

#[test]
fn test_cli_rejects_bad_limit() -> Result<()> {
    let output = scribeql().args(["dml", "orders", "--limit", "many"]).output()?;
    assert!(!output.status.success());
    Ok(())
}
