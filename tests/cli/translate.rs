use anyhow::Result;
use serde_json::Value;

use crate::CliTest;

const EN_JSON: &str = "{\n  \"greeting\": \"Hello\",\n  \"auth\": {\n    \"title\": \"Sign in\"\n  }\n}\n";

#[test]
fn test_translate_writes_target_file_and_lockfile() -> Result<()> {
    let test = CliTest::with_file("locales/en.json", EN_JSON)?;

    let output = test
        .translate_command("locales/[locale].json", "json", "de")
        .output()?;
    assert!(
        output.status.success(),
        "translate should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let de: Value = serde_json::from_str(&test.read_file("locales/de.json")?)?;
    assert_eq!(de["greeting"], "[Hélló]");
    assert_eq!(de["auth"]["title"], "[Sígn ín]");

    let lock = test.read_file("i18n.lock")?;
    assert!(lock.contains("version: 1"));
    assert!(lock.contains("greeting"));
    assert!(lock.contains("auth.title"));

    Ok(())
}

#[test]
fn test_second_run_reports_up_to_date() -> Result<()> {
    let test = CliTest::with_file("locales/en.json", EN_JSON)?;

    test.translate_command("locales/[locale].json", "json", "de")
        .output()?;
    let output = test
        .translate_command("locales/[locale].json", "json", "de")
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("up to date"),
        "expected up-to-date summary, got: {stdout}"
    );

    Ok(())
}

#[test]
fn test_multiple_target_locales() -> Result<()> {
    let test = CliTest::with_file("locales/en.json", EN_JSON)?;

    let output = test
        .translate_command("locales/[locale].json", "json", "de")
        .args(["--target-locale", "fr"])
        .output()?;

    assert!(output.status.success());
    assert!(test.root().join("locales/de.json").exists());
    assert!(test.root().join("locales/fr.json").exists());

    Ok(())
}

#[test]
fn test_manual_target_edits_survive_unrelated_source_changes() -> Result<()> {
    let test = CliTest::with_file("locales/en.json", EN_JSON)?;
    test.translate_command("locales/[locale].json", "json", "de")
        .output()?;

    // A reviewer fixes the machine translation by hand...
    let fixed = test
        .read_file("locales/de.json")?
        .replace("[Hélló]", "Hallo");
    test.write_file("locales/de.json", &fixed)?;

    // ...then an unrelated source key changes.
    test.write_file(
        "locales/en.json",
        "{\n  \"greeting\": \"Hello\",\n  \"auth\": {\n    \"title\": \"Log in\"\n  }\n}\n",
    )?;
    test.translate_command("locales/[locale].json", "json", "de")
        .output()?;

    let de: Value = serde_json::from_str(&test.read_file("locales/de.json")?)?;
    assert_eq!(de["greeting"], "Hallo"); // untouched
    assert_eq!(de["auth"]["title"], "[Lóg ín]"); // re-translated

    Ok(())
}

#[test]
fn test_yaml_bucket_round_trip() -> Result<()> {
    let test = CliTest::with_file("i18n/en.yaml", "title: Welcome\nfooter: Goodbye\n")?;

    let output = test
        .translate_command("i18n/[locale].yaml", "yaml", "fr")
        .output()?;
    assert!(output.status.success());

    let fr = test.read_file("i18n/fr.yaml")?;
    assert!(fr.contains("[Wélcómé]"));
    assert!(fr.contains("[Góódbýé]"));

    Ok(())
}

#[test]
fn test_markdown_bucket_translates_sections() -> Result<()> {
    let test = CliTest::with_file(
        "docs/en/guide.md",
        "# Getting started\n\nInstall the tool.\n",
    )?;

    let output = test
        .translate_command("docs/[locale]/guide.md", "markdown", "es")
        .output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let es = test.read_file("docs/es/guide.md")?;
    assert!(es.contains("Géttíng stártéd"), "got: {es}");

    Ok(())
}

#[test]
fn test_plurals_bucket_merges_into_shared_file() -> Result<()> {
    let test = CliTest::with_file(
        "catalog.json",
        r#"{
  "en": {
    "items": {"one": "{count} item", "other": "{count} items"}
  },
  "de": {
    "items": {"one": "{count} Artikel", "other": "{count} Artikel"}
  }
}"#,
    )?;

    let output = test.translate_command("catalog.json", "plurals", "fr").output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let root: Value = serde_json::from_str(&test.read_file("catalog.json")?)?;
    assert_eq!(root["fr"]["items"]["one"], "[{count} ítém]");
    // Existing locales survive the merge.
    assert_eq!(root["en"]["items"]["one"], "{count} item");
    assert_eq!(root["de"]["items"]["one"], "{count} Artikel");

    Ok(())
}

#[test]
fn test_plurals_multiple_targets_all_land_in_shared_file() -> Result<()> {
    let test = CliTest::with_file(
        "catalog.json",
        r#"{
  "en": {
    "greeting": "Hello"
  }
}"#,
    )?;

    let output = test
        .translate_command("catalog.json", "plurals", "de")
        .args(["--target-locale", "fr", "--target-locale", "it"])
        .output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let root: Value = serde_json::from_str(&test.read_file("catalog.json")?)?;
    for locale in ["en", "de", "fr", "it"] {
        assert!(root.get(locale).is_some(), "locale '{locale}' was lost");
    }
    assert_eq!(root["de"]["greeting"], "[Hélló]");

    Ok(())
}

#[test]
fn test_parse_error_exits_with_failure() -> Result<()> {
    let test = CliTest::with_file("locales/en.json", "{ this is not json")?;

    let output = test
        .translate_command("locales/[locale].json", "json", "de")
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("error"), "got: {stdout}");
    assert!(stdout.contains("locales/en.json"), "got: {stdout}");

    Ok(())
}

#[test]
fn test_missing_placeholder_is_an_error() -> Result<()> {
    let test = CliTest::with_file("locales/en.json", EN_JSON)?;

    let output = test
        .translate_command("locales/en.json", "json", "de")
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[locale]"));

    Ok(())
}

#[test]
fn test_unknown_format_is_an_error() -> Result<()> {
    let test = CliTest::with_file("locales/en.json", EN_JSON)?;

    let output = test
        .translate_command("locales/[locale].json", "toml", "de")
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("toml"));

    Ok(())
}

#[test]
fn test_corrupt_lockfile_does_not_block_translation() -> Result<()> {
    let test = CliTest::with_file("locales/en.json", EN_JSON)?;
    test.write_file("i18n.lock", "][ definitely not yaml }{")?;

    let output = test
        .translate_command("locales/[locale].json", "json", "de")
        .output()?;

    assert!(output.status.success());
    assert!(test.root().join("locales/de.json").exists());
    // The lock was reinitialized and rewritten.
    assert!(test.read_file("i18n.lock")?.contains("version: 1"));

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.command().arg("--help").output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("translate"));
    assert!(stdout.contains("status"));

    Ok(())
}
