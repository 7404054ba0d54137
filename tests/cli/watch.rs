use std::{
    io::{BufRead, BufReader},
    process::{Child, Stdio},
    sync::mpsc::{self, Receiver},
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result, bail};

use crate::CliTest;

const TIMEOUT: Duration = Duration::from_secs(15);

/// Kills the watcher when the test ends, pass or fail.
struct Watching {
    child: Child,
    lines: Receiver<String>,
}

impl Watching {
    fn start(test: &CliTest, file: &str) -> Result<Self> {
        let mut cmd = test.command();
        cmd.arg("watch").arg(file).stdout(Stdio::piped());
        let mut child = cmd.spawn().context("Failed to start vvtrans watch")?;
        let stdout = child.stdout.take().context("stdout is piped")?;

        let (tx, lines) = mpsc::channel();
        thread::spawn(move || {
            for line in BufReader::new(stdout).lines().map_while(|line| line.ok()) {
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Ok(Self { child, lines })
    }

    /// Collect output until a line contains `needle`.
    fn wait_for(&self, needle: &str) -> Result<Vec<String>> {
        let deadline = Instant::now() + TIMEOUT;
        let mut seen = Vec::new();
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.lines.recv_timeout(remaining) {
                Ok(line) => {
                    let found = line.contains(needle);
                    seen.push(line);
                    if found {
                        return Ok(seen);
                    }
                }
                Err(_) => bail!("Timed out waiting for {:?}; output so far: {:#?}", needle, seen),
            }
        }
    }
}

impl Drop for Watching {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[test]
fn test_watch_reprints_after_change() -> Result<()> {
    let test = CliTest::with_corpus(
        r#"{ "LMID_00000001": "你好", "LMID_00000002": "再见" }"#,
    )?;
    test.write_file(".vvtransrc.json", r#"{ "debounceMs": 50 }"#)?;
    test.write_file("src/app.ts", "t('LMID_00000001');\n")?;

    let watching = Watching::start(&test, "src/app.ts")?;
    let first = watching.wait_for("Watching")?;
    assert!(first.iter().any(|line| line.contains("LMID_00000001 你好")));

    test.write_file("src/app.ts", "t('LMID_00000002');\n")?;
    let second = watching.wait_for("LMID_00000002 再见")?;
    assert!(second.iter().all(|line| !line.contains("Watching")));
    watching.wait_for("1 translation(s) shown in src/app.ts")?;
    Ok(())
}

#[test]
fn test_watch_reloads_corpus() -> Result<()> {
    let test = CliTest::with_corpus(r#"{ "LMID_00000001": "Old" }"#)?;
    test.write_file(".vvtransrc.json", r#"{ "debounceMs": 50 }"#)?;
    test.write_file("app.ts", "t('LMID_00000001');\n")?;

    let watching = Watching::start(&test, "app.ts")?;
    watching.wait_for("Watching")?;

    test.write_file(crate::DEFAULT_CORPUS, r#"{ "LMID_00000001": "New" }"#)?;
    watching.wait_for("LMID_00000001 New")?;
    Ok(())
}
