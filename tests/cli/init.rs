use anyhow::Result;
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("init");
    let (code, stdout, _) = run(&mut cmd)?;
    assert_eq!(code, 0);
    assert!(stdout.contains("Created .vvtransrc.json"));

    let config: Value = serde_json::from_str(&test.read_file(".vvtransrc.json")?)?;
    assert_eq!(config["enable"], Value::Bool(true));
    assert_eq!(config["corpusDirectory"], ".builtinLanguage/zh.json");
    assert_eq!(config["debounceMs"], 500);
    assert!(config["transStyle"].is_object());
    Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".vvtransrc.json", "{ \"enable\": false }")?;

    let mut cmd = test.command();
    cmd.arg("init");
    let (code, _, stderr) = run(&mut cmd)?;
    assert_eq!(code, 1);
    assert!(stderr.contains("already exists"));
    assert_eq!(test.read_file(".vvtransrc.json")?, "{ \"enable\": false }");
    Ok(())
}
