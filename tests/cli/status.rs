use anyhow::Result;

use crate::CliTest;

const EN_JSON: &str = "{\n  \"greeting\": \"Hello\",\n  \"farewell\": \"Bye\"\n}\n";

#[test]
fn test_status_reports_pending_keys_without_writing() -> Result<()> {
    let test = CliTest::with_file("locales/en.json", EN_JSON)?;

    let output = test
        .status_command("locales/[locale].json", "json", "de")
        .output()?;

    // Pending work exits 1, like a linter with findings.
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 pending"), "got: {stdout}");

    assert!(!test.root().join("locales/de.json").exists());
    assert!(!test.root().join("i18n.lock").exists());

    Ok(())
}

#[test]
fn test_status_is_clean_after_translate() -> Result<()> {
    let test = CliTest::with_file("locales/en.json", EN_JSON)?;

    test.translate_command("locales/[locale].json", "json", "de")
        .output()?;
    let output = test
        .status_command("locales/[locale].json", "json", "de")
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("up to date"));

    Ok(())
}

#[test]
fn test_status_detects_source_drift() -> Result<()> {
    let test = CliTest::with_file("locales/en.json", EN_JSON)?;
    test.translate_command("locales/[locale].json", "json", "de")
        .output()?;

    test.write_file(
        "locales/en.json",
        "{\n  \"greeting\": \"Howdy\",\n  \"farewell\": \"Bye\"\n}\n",
    )?;
    let output = test
        .status_command("locales/[locale].json", "json", "de")
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1 pending"), "got: {stdout}");

    Ok(())
}

#[test]
fn test_status_with_no_matched_files_is_an_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .status_command("locales/[locale].json", "json", "de")
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No files matched"));

    Ok(())
}
