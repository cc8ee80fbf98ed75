//! Live adapter for the `Browser` port using the platform URL opener.

use std::process::{Command, Stdio};

use crate::ports::browser::Browser;

/// Opens URLs with `open` (macOS), `cmd /C start` (Windows) or `xdg-open`.
pub struct LiveBrowser;

impl LiveBrowser {
    fn command(url: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        } else if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", url]);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }
}

impl Browser for LiveBrowser {
    fn open(&self, url: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let status = Self::command(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        if !status.success() {
            return Err(format!("URL opener exited with {status}").into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opener_receives_the_url() {
        let cmd = LiveBrowser::command("https://example.test/tree/main");
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args.last().map(String::as_str), Some("https://example.test/tree/main"));
    }
}
