//! External Command Lookup
//!
//! Runs an external program to fetch market data. The role is passed as
//! the last argument; the program prints a [`MarketSnapshot`] as JSON (or
//! `null` when it has no data) on stdout, or `{"error": "..."}` on failure.
//!
//! The child is killed when the configured timeout expires.

use crate::lookup::{check_snapshot, LookupError, MarketDataLookup};
use crate::types::MarketSnapshot;
use crossbeam_channel::{bounded, Receiver};
use serde::Deserialize;
use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(20);
const DRAIN_GRACE: Duration = Duration::from_millis(250);

/// Error payload a lookup program may print instead of a snapshot
#[derive(Debug, Deserialize)]
struct LookupFailure {
    error: String,
}

#[derive(Debug, Clone)]
pub struct CommandMarketLookup {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandMarketLookup {
    pub fn new(program: &str, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.to_string(),
            args,
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn timeout_millis(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

impl MarketDataLookup for CommandMarketLookup {
    fn name(&self) -> &str {
        "command"
    }

    fn lookup(&self, role: &str) -> Result<Option<MarketSnapshot>, LookupError> {
        log::info!("[lookup:command] running {} for role '{}'", self.program, role);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(role)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                log::error!("[lookup:command] failed to spawn {}: {}", self.program, e);
                LookupError::ExecutionFailed(format!("{}: {}", self.program, e))
            })?;

        let stdout_rx = match child.stdout.take() {
            Some(pipe) => drain(pipe),
            None => return Err(LookupError::ExecutionFailed("No stdout handle".to_string())),
        };
        let stderr_rx = child.stderr.take().map(drain);

        // None when the timeout is too large to represent
        let deadline = Instant::now().checked_add(self.timeout);
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if deadline.is_some_and(|d| Instant::now() >= d) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    let millis = self.timeout_millis();
                    log::warn!("[lookup:command] killed after {} ms", millis);
                    return Err(LookupError::Timeout(millis));
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(LookupError::ExecutionFailed(format!("Wait error: {}", e)));
                }
            }
        };

        let stdout = stdout_rx
            .recv_timeout(DRAIN_GRACE)
            .map_err(|_| {
                LookupError::ExecutionFailed("stdout not closed after exit".to_string())
            })?
            .map_err(|e| LookupError::ExecutionFailed(format!("stdout read error: {}", e)))?;
        let stderr = stderr_rx
            .and_then(|rx| rx.recv_timeout(DRAIN_GRACE).ok())
            .and_then(Result::ok)
            .unwrap_or_default();

        if !stderr.trim().is_empty() {
            log::debug!("[lookup:command] stderr: {}", stderr.trim());
        }

        if !status.success() {
            return Err(LookupError::ExecutionFailed(format!(
                "Exit code: {:?} | stderr: {}",
                status.code(),
                stderr.trim()
            )));
        }

        parse_output(&stdout)
    }
}

/// Read a pipe to the end on a helper thread
fn drain<R: Read + Send + 'static>(mut pipe: R) -> Receiver<std::io::Result<String>> {
    let (tx, rx) = bounded(1);
    thread::spawn(move || {
        let mut buf = String::new();
        let result = pipe.read_to_string(&mut buf).map(|_| buf);
        let _ = tx.send(result);
    });
    rx
}

fn parse_output(stdout: &str) -> Result<Option<MarketSnapshot>, LookupError> {
    if let Ok(failure) = serde_json::from_str::<LookupFailure>(stdout) {
        return Err(LookupError::ExecutionFailed(failure.error));
    }

    let snapshot: Option<MarketSnapshot> = serde_json::from_str(stdout).map_err(|e| {
        let preview: String = stdout.chars().take(200).collect();
        LookupError::InvalidJson(format!("{} | preview: {}", e, preview))
    })?;

    if let Some(snapshot) = &snapshot {
        check_snapshot(snapshot)?;
    }
    Ok(snapshot)
}
