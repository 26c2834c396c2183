use assert_cmd::Command;
use predicates::str::contains;
use std::io::Write;
use tempfile::NamedTempFile;

fn budgets_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("budgets"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_config(content: &str) -> Result<NamedTempFile, String> {
    let mut file = NamedTempFile::new().map_err(|err| format!("failed to create temp file: {err}"))?;
    file.write_all(content.as_bytes())
        .map_err(|err| format!("failed to write temp config: {err}"))?;
    Ok(file)
}

#[test]
fn help_lists_commands() {
    budgets_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("budgets synth"))
        .stdout(contains("budgets amounts"));
}

#[test]
fn amounts_prints_reference_figures() -> Result<(), String> {
    let assert = budgets_cmd()
        .args(["amounts", "--monthly-budget", "100"])
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)
        .map_err(|err| format!("stdout is not JSON: {err}"))?;
    assert_eq!(json["daily"], 3);
    assert_eq!(json["quarterly"], 300);
    assert_eq!(json["yearly"], 1095);
    Ok(())
}

#[test]
fn amounts_below_thirty_reports_zero_daily_but_synth_rejects_it() -> Result<(), String> {
    let assert = budgets_cmd()
        .args(["amounts", "--monthly-budget", "10"])
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)
        .map_err(|err| format!("stdout is not JSON: {err}"))?;
    assert_eq!(json["daily"], 0);
    assert_eq!(json["quarterly"], 30);

    let config = write_config("monthly_budget = 10\n")?;
    budgets_cmd()
        .arg("synth")
        .arg("--config")
        .arg(config.path())
        .assert()
        .code(3)
        .stderr(contains("daily budget of 0"));
    Ok(())
}

#[test]
fn synth_from_config_file_renders_template() -> Result<(), String> {
    let config = write_config(
        "stack_name = \"mocked-stack\"\nmonthly_budget = 100\ndefault_topic = \"mocked-topic\"\nsubscribers = \"alert@example.com, kiarash@kiani.info\"\n",
    )?;

    let assert = budgets_cmd()
        .arg("synth")
        .arg("--config")
        .arg(config.path())
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)
        .map_err(|err| format!("stdout is not JSON: {err}"))?;
    let resources = json["Resources"]
        .as_object()
        .ok_or_else(|| "Resources must be an object".to_string())?;
    let count = |kind: &str| resources.values().filter(|r| r["Type"] == kind).count();

    assert_eq!(count("AWS::Budgets::Budget"), 7);
    assert_eq!(count("AWS::SNS::Topic"), 1);
    Ok(())
}

#[test]
fn flags_override_config_file() -> Result<(), String> {
    let config = write_config("monthly_budget = 100\ncurrency = \"USD\"\n")?;

    let assert = budgets_cmd()
        .arg("synth")
        .arg("--config")
        .arg(config.path())
        .args(["--monthly-budget", "300", "--currency", "EUR"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("\"Amount\": 300"));
    assert!(stdout.contains("\"Unit\": \"EUR\""));
    Ok(())
}

#[test]
fn fractional_monthly_budget_exits_with_validation_code() {
    budgets_cmd()
        .args(["amounts", "--monthly-budget", "3.5"])
        .assert()
        .code(3)
        .stderr(contains("\"code\":\"INVALID\""));
}

#[test]
fn missing_monthly_budget_exits_with_config_code() -> Result<(), String> {
    let config = write_config("default_topic = \"alerts\"\n")?;

    budgets_cmd()
        .arg("synth")
        .arg("--config")
        .arg(config.path())
        .assert()
        .code(2)
        .stderr(contains("monthly_budget is required"));
    Ok(())
}

#[test]
fn unknown_command_suggests_closest() {
    budgets_cmd()
        .arg("synt")
        .assert()
        .code(1)
        .stderr(contains("CLI_ERROR"))
        .stderr(contains("synth"));
}
