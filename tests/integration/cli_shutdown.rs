//! The binary ends promptly on Ctrl+C even while stdin stays open.

#![cfg(unix)]

use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

#[test]
fn interrupt_exits_with_stdin_open() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut child = Command::new(env!("CARGO_BIN_EXE_riva"))
        .args(["--text", "--ephemeral"])
        .env("RIVA_DATA_DIR", dir.path())
        .env("RIVA_CONFIG_DIR", dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn riva");
    // Held open for the whole test so EOF never ends the loop.
    let _stdin = child.stdin.take();
    let mut stdout = BufReader::new(child.stdout.take().expect("stdout"));

    let mut intro = String::new();
    stdout.read_line(&mut intro).expect("read intro");
    assert!(intro.contains("Riva"), "{intro}");
    std::thread::sleep(Duration::from_millis(300));

    let status = Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .expect("send SIGINT");
    assert!(status.success());

    let deadline = Instant::now() + Duration::from_secs(10);
    let exited = loop {
        if let Some(status) = child.try_wait().expect("poll child") {
            break Some(status);
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            break None;
        }
        std::thread::sleep(Duration::from_millis(50));
    };
    assert!(exited.is_some(), "riva kept running after Ctrl+C");

    let mut rest = String::new();
    stdout.read_to_string(&mut rest).expect("read output");
    assert!(rest.contains(riva::replies::GOODBYE), "{rest}");
}
