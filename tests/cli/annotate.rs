use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

const CORPUS: &str = r#"{
    "LMID_00000001": "你好",
    "LMID_00000002": "再见"
}"#;

#[test]
fn test_annotate_shows_translations() -> Result<()> {
    let test = CliTest::with_corpus(CORPUS)?;
    test.write_file(
        "src/app.tsx",
        r#"export function Greeting() {
    return <p>{t("LMID_00000001")}</p>;
}
"#,
    )?;

    let (code, stdout, stderr) = run(&mut test.annotate_command("src/app.tsx"))?;
    assert_eq!(code, 0, "stderr: {}", stderr);

    let caret_line = format!("  | {}{} 你好", " ".repeat(15), "^".repeat(18));
    let expected = [
        "LMID_00000001 你好",
        " --> src/app.tsx:2:16",
        "  |",
        "2 |     return <p>{t(\"LMID_00000001\")}</p>;",
        caret_line.as_str(),
        "",
        "\u{2713} 1 translation(s) shown in src/app.tsx",
        "",
    ]
    .join("\n");
    assert_eq!(stdout, expected);
    Ok(())
}

#[test]
fn test_annotate_skips_unknown_keys() -> Result<()> {
    let test = CliTest::with_corpus(CORPUS)?;
    test.write_file(
        "src/app.ts",
        "t('LMID_00000002');\nt('LMID_99999999');\n",
    )?;

    let (code, stdout, _) = run(&mut test.annotate_command("src/app.ts"))?;
    assert_eq!(code, 0);
    assert!(stdout.contains("LMID_00000002 再见"));
    assert!(!stdout.contains("LMID_99999999"));
    assert!(stdout.contains("1 translation(s) shown in src/app.ts"));
    assert!(stdout.contains("warning: 1 key reference(s) have no corpus entry"));
    Ok(())
}

#[test]
fn test_annotate_no_references() -> Result<()> {
    let test = CliTest::with_corpus(CORPUS)?;
    test.write_file("index.html", "<p>{t(\"Hello\")}</p>\n")?;

    let (code, stdout, _) = run(&mut test.annotate_command("index.html"))?;
    assert_eq!(code, 0);
    assert_eq!(stdout, "\u{2713} 0 translation(s) shown in index.html\n");
    Ok(())
}

#[test]
fn test_annotate_missing_corpus_is_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/app.ts", "t('LMID_00000001');\n")?;

    let (code, stdout, stderr) = run(&mut test.annotate_command("src/app.ts"))?;
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("error: Failed to read corpus file"));
    assert!(stderr.contains("reconfigure the corpus location"));
    Ok(())
}

#[test]
fn test_annotate_malformed_corpus_is_error() -> Result<()> {
    let test = CliTest::with_corpus("{ not json")?;
    test.write_file("src/app.ts", "t('LMID_00000001');\n")?;

    let (code, _, stderr) = run(&mut test.annotate_command("src/app.ts"))?;
    assert_eq!(code, 2);
    assert!(stderr.contains("Failed to read corpus file"));
    Ok(())
}

#[test]
fn test_annotate_rejects_unsupported_file() -> Result<()> {
    let test = CliTest::with_corpus(CORPUS)?;
    test.write_file("styles.css", ".a { content: t('LMID_00000001'); }\n")?;

    let (code, stdout, stderr) = run(&mut test.annotate_command("styles.css"))?;
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Unsupported file type"));
    Ok(())
}

#[test]
fn test_annotate_corpus_override() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("lang/en.json", r#"{ "LMID_00000001": "Hello" }"#)?;
    test.write_file("app.js", "t(\"LMID_00000001\")\n")?;

    let mut cmd = test.annotate_command("app.js");
    cmd.arg("--corpus").arg("lang/en.json");
    let (code, stdout, _) = run(&mut cmd)?;
    assert_eq!(code, 0);
    assert!(stdout.contains("LMID_00000001 Hello"));
    Ok(())
}

#[test]
fn test_annotate_uses_configured_corpus() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".vvtransrc.json",
        r##"{ "corpusDirectory": "i18n/zh.json", "transStyle": { "color": "#00FF00" } }"##,
    )?;
    test.write_file("i18n/zh.json", r#"{ "LMID_00000001": "配置" }"#)?;
    test.write_file("app.jsx", "<b>{t('LMID_00000001')}</b>\n")?;

    let (code, stdout, _) = run(&mut test.annotate_command("app.jsx"))?;
    assert_eq!(code, 0);
    assert!(stdout.contains("LMID_00000001 配置"));
    Ok(())
}

#[test]
fn test_annotate_disabled() -> Result<()> {
    let test = CliTest::with_corpus(CORPUS)?;
    test.write_file(".vvtransrc.json", r#"{ "enable": false }"#)?;
    test.write_file("app.ts", "t('LMID_00000001')\n")?;

    let (code, stdout, _) = run(&mut test.annotate_command("app.ts"))?;
    assert_eq!(code, 0);
    assert!(stdout.contains("vvtrans is disabled"));
    assert!(!stdout.contains("你好"));
    Ok(())
}
