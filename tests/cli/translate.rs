use anyhow::Result;

use crate::{CliTest, run};

#[test]
fn test_translate_is_a_no_op() -> Result<()> {
    let test = CliTest::with_corpus(r#"{ "LMID_00000001": "Hello" }"#)?;
    let source = "t(\"Hello\");\nt(\"LMID_00000001\");\n";
    test.write_file("app.ts", source)?;

    let mut cmd = test.command();
    cmd.arg("translate");
    let (code, stdout, _) = run(&mut cmd)?;
    assert_eq!(code, 0);
    assert!(stdout.contains("translate is reserved and has no effect"));
    assert_eq!(test.read_file("app.ts")?, source);
    Ok(())
}

#[test]
fn test_translate_without_corpus() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("translate");
    let (code, stdout, stderr) = run(&mut cmd)?;
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("translate is reserved"));
    assert!(stderr.is_empty());
    Ok(())
}
