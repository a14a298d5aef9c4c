use std::ffi::OsString;
use std::io::{Read as _, Write as _};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::caption::provider::CaptionProvider;
use crate::foundation::error::{BoothError, BoothResult};

const POLL_INTERVAL: Duration = Duration::from_millis(10);
// How long pipe threads get to finish once the command itself has exited.
const PIPE_GRACE: Duration = Duration::from_millis(500);

/// Delegates captioning to an external program.
///
/// The program receives the PNG on stdin and must print the caption on stdout. This is the hook
/// for remote multimodal services: a small script can forward the image and relay the answer.
#[derive(Clone, Debug)]
pub struct CommandCaptionProvider {
    program: OsString,
    args: Vec<OsString>,
    timeout: Duration,
}

impl CommandCaptionProvider {
    /// Default time allowed for one caption.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Run `program` with no arguments and the default timeout.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Append command-line arguments.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Replace the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl CaptionProvider for CommandCaptionProvider {
    fn generate_caption(&self, image_png: &[u8]) -> BoothResult<String> {
        let program = self.program.to_string_lossy().into_owned();
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                BoothError::caption_provider(format!("failed to spawn '{program}': {e}"))
            })?;

        let mut stdin = child.stdin.take().ok_or_else(|| {
            BoothError::caption_provider(format!("failed to open '{program}' stdin (unexpected)"))
        })?;
        let mut stdout = child.stdout.take().ok_or_else(|| {
            BoothError::caption_provider(format!("failed to open '{program}' stdout (unexpected)"))
        })?;
        let mut stderr = child.stderr.take().ok_or_else(|| {
            BoothError::caption_provider(format!("failed to open '{program}' stderr (unexpected)"))
        })?;

        let png = image_png.to_vec();
        let stdin_feed = std::thread::spawn(move || stdin.write_all(&png));
        let stdout_drain = std::thread::spawn(move || {
            let mut bytes = Vec::new();
            stdout.read_to_end(&mut bytes).map(|_| bytes)
        });
        let stderr_drain = std::thread::spawn(move || {
            let mut bytes = Vec::new();
            stderr.read_to_end(&mut bytes).map(|_| bytes)
        });

        let started = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if started.elapsed() >= self.timeout => {
                    if let Err(e) = child.kill() {
                        tracing::warn!(program = %program, error = %e, "failed to kill caption command");
                    }
                    // Reap the killed child.
                    let _ = child.wait();
                    // Descendants of the command may still hold the pipes; their threads are
                    // left to end when those processes close them.
                    let settled = wait_until(Instant::now() + PIPE_GRACE, || {
                        stdin_feed.is_finished()
                            && stdout_drain.is_finished()
                            && stderr_drain.is_finished()
                    });
                    if settled {
                        let _ = stdin_feed.join();
                        let _ = stdout_drain.join();
                        let _ = stderr_drain.join();
                    } else {
                        tracing::debug!(program = %program, "caption command left processes holding its pipes");
                    }
                    return Err(BoothError::caption_provider(format!(
                        "'{program}' timed out after {:?}",
                        self.timeout
                    )));
                }
                Ok(None) => std::thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    return Err(BoothError::caption_provider(format!(
                        "failed to wait for '{program}': {e}"
                    )));
                }
            }
        };

        let deadline = (started + self.timeout).max(Instant::now() + PIPE_GRACE);
        let settled = wait_until(deadline, || {
            stdin_feed.is_finished() && stdout_drain.is_finished() && stderr_drain.is_finished()
        });
        if !settled {
            return Err(BoothError::caption_provider(format!(
                "'{program}' exited but its output pipes stayed open past the {:?} timeout",
                self.timeout
            )));
        }

        match stdin_feed.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::debug!(program = %program, error = %e, "caption command closed stdin early");
            }
            Err(_) => {
                return Err(BoothError::caption_provider("stdin writer thread panicked"));
            }
        }
        let stdout_bytes = stdout_drain
            .join()
            .map_err(|_| BoothError::caption_provider("stdout reader thread panicked"))?
            .map_err(|e| {
                BoothError::caption_provider(format!("failed to read '{program}' stdout: {e}"))
            })?;
        let stderr_bytes = stderr_drain
            .join()
            .map_err(|_| BoothError::caption_provider("stderr reader thread panicked"))?
            .unwrap_or_default();

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(BoothError::caption_provider(format!(
                "'{program}' exited with status {status}: {}",
                stderr.trim()
            )));
        }

        let caption = String::from_utf8_lossy(&stdout_bytes).trim().to_owned();
        if caption.is_empty() {
            return Err(BoothError::caption_provider(format!(
                "'{program}' printed no caption"
            )));
        }
        tracing::debug!(program = %program, elapsed_ms = started.elapsed().as_millis() as u64, "caption generated");
        Ok(caption)
    }
}

fn wait_until(deadline: Instant, done: impl Fn() -> bool) -> bool {
    loop {
        if done() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/caption/command.rs"]
mod tests;
