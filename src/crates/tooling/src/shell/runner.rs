use std::env;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tracing::{debug, warn};

use super::escape::escape_argument;
use super::search_path::augmented_search_path;
use super::{CommandError, CommandExecutor};
use crate::async_utils::timeout::{with_timeout, TimeoutError};

/// Wall-clock limit applied by [`CommandExecutor::execute`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on captured stdout (and, separately, stderr).
pub const DEFAULT_MAX_OUTPUT: usize = 1024 * 1024;

const SHELL: &str = "sh";

/// Exit status POSIX shells use for an unresolvable command.
const EXIT_COMMAND_NOT_FOUND: i32 = 127;

/// Runs command lines through `sh -c`.
///
/// Each invocation gets:
/// - a `PATH` extended with common install locations (see
///   [`augmented_search_path`]), computed fresh from the current environment
/// - closed stdin, so interactive tools cannot wait on a terminal
/// - its own process group on Unix, so a timeout takes down the whole
///   pipeline and not just the shell
#[derive(Debug, Clone)]
pub struct ShellRunner {
    timeout: Duration,
    max_output: usize,
}

impl ShellRunner {
    /// Runner with the 30 second timeout and 1 MiB output cap.
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_output: DEFAULT_MAX_OUTPUT,
        }
    }

    /// Set the default timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the output cap in bytes.
    pub fn with_max_output(mut self, max_output: usize) -> Self {
        self.max_output = max_output;
        self
    }

    /// Default timeout for this runner.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn search_path() -> OsString {
        let current = env::var_os("PATH");
        let home = env::var_os("HOME").map(PathBuf::from);
        augmented_search_path(current.as_deref(), home.as_deref())
    }

    async fn run(&self, command_line: &str, timeout: Duration) -> Result<String, CommandError> {
        debug!(command = %command_line, timeout_secs = timeout.as_secs(), "Executing command");

        let mut std_command = std::process::Command::new(SHELL);
        std_command
            .arg("-c")
            .arg(command_line)
            .env("PATH", Self::search_path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        #[cfg(unix)]
        std::os::unix::process::CommandExt::process_group(&mut std_command, 0);

        let mut command = Command::from(std_command);
        command.kill_on_drop(true);

        let mut child = command.spawn().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CommandError::NotFound(format!("{}: {}", SHELL, e)),
            _ => CommandError::Failed(format!("failed to spawn {}: {}", SHELL, e)),
        })?;

        let max_output = self.max_output;
        let outcome = with_timeout(timeout, collect_output(&mut child, max_output)).await;
        match outcome {
            Ok((status, stdout, stderr)) => interpret_exit(status, &stdout, &stderr),
            Err(TimeoutError::Timeout(limit)) => {
                warn!(command = %command_line, timeout_secs = limit.as_secs(), "Command timed out, terminating");
                terminate(&mut child).await;
                Err(CommandError::TimedOut(limit))
            }
            Err(TimeoutError::OperationFailed(CollectError::Overflow)) => {
                terminate(&mut child).await;
                Err(CommandError::Failed(format!(
                    "output exceeded {} bytes",
                    max_output
                )))
            }
            Err(TimeoutError::OperationFailed(CollectError::Io(e))) => {
                terminate(&mut child).await;
                Err(CommandError::Failed(e.to_string()))
            }
        }
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandExecutor for ShellRunner {
    async fn execute(&self, command_line: &str) -> Result<String, CommandError> {
        self.run(command_line, self.timeout).await
    }

    async fn execute_with_timeout(
        &self,
        command_line: &str,
        timeout: Duration,
    ) -> Result<String, CommandError> {
        self.run(command_line, timeout).await
    }

    async fn command_exists(&self, name: &str) -> bool {
        let quoted = escape_argument(name);
        let probes = [
            format!("command -v {}", quoted),
            format!("which {}", quoted),
            format!("type {}", quoted),
        ];

        for probe in &probes {
            match self.execute(probe).await {
                Ok(_) => return true,
                Err(e) => debug!(probe = %probe, error = %e, "Command probe failed"),
            }
        }
        false
    }
}

enum CollectError {
    Io(io::Error),
    Overflow,
}

impl From<io::Error> for CollectError {
    fn from(err: io::Error) -> Self {
        CollectError::Io(err)
    }
}

/// Drain both pipes, then reap the child.
///
/// Either stream going over the cap aborts immediately, without waiting for
/// the other pipe to close.
async fn collect_output(
    child: &mut Child,
    max_output: usize,
) -> Result<(ExitStatus, Vec<u8>, Vec<u8>), CollectError> {
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let (stdout, stderr) = tokio::try_join!(
        read_capped(stdout, max_output),
        read_capped(stderr, max_output)
    )?;
    let status = child.wait().await?;
    Ok((status, stdout, stderr))
}

async fn read_capped<R>(reader: Option<R>, max_output: usize) -> Result<Vec<u8>, CollectError>
where
    R: AsyncRead + Unpin,
{
    let Some(reader) = reader else {
        return Ok(Vec::new());
    };

    let mut buf = Vec::new();
    reader
        .take(max_output as u64 + 1)
        .read_to_end(&mut buf)
        .await?;
    if buf.len() > max_output {
        return Err(CollectError::Overflow);
    }
    Ok(buf)
}

fn interpret_exit(status: ExitStatus, stdout: &[u8], stderr: &[u8]) -> Result<String, CommandError> {
    let stdout = String::from_utf8_lossy(stdout).trim().to_string();
    let stderr = String::from_utf8_lossy(stderr).trim().to_string();

    if status.success() {
        if !stderr.is_empty() {
            warn!(stderr = %stderr, "Command wrote to stderr");
        }
        return Ok(stdout);
    }

    let detail = if !stderr.is_empty() {
        stderr
    } else if !stdout.is_empty() {
        stdout
    } else {
        status.to_string()
    };

    match status.code() {
        Some(EXIT_COMMAND_NOT_FOUND) => Err(CommandError::NotFound(detail)),
        Some(_) => Err(CommandError::Failed(detail)),
        None => Err(CommandError::Failed(format!("terminated by signal: {}", detail))),
    }
}

/// Kill the child's process group and reap the child.
async fn terminate(child: &mut Child) {
    kill_process_group(child);
    if let Err(e) = child.start_kill() {
        debug!(error = %e, "Child already exited before kill");
    }
    if let Err(e) = child.wait().await {
        warn!(error = %e, "Failed to reap terminated child");
    }
}

#[cfg(unix)]
fn kill_process_group(child: &Child) {
    if let Some(pid) = child.id() {
        // SAFETY: killpg only sends a signal; the child leads its own group
        // (process_group(0)), so this cannot reach our own process group.
        let rc = unsafe { libc::killpg(pid as libc::pid_t, libc::SIGKILL) };
        if rc != 0 {
            debug!(pid, error = %io::Error::last_os_error(), "killpg failed");
        }
    }
}

#[cfg(not(unix))]
fn kill_process_group(_child: &Child) {}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::path::Path;

    #[tokio::test]
    async fn test_execute_returns_trimmed_stdout() {
        let runner = ShellRunner::new();
        let output = runner.execute("echo '  hello  '").await.unwrap();
        assert_eq!(output, "hello");
    }

    #[tokio::test]
    async fn test_stderr_on_success_is_not_failure() {
        let runner = ShellRunner::new();
        let output = runner.execute("echo out; echo noise 1>&2").await.unwrap();
        assert_eq!(output, "out");
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_failed() {
        let runner = ShellRunner::new();
        let err = runner.execute("echo boom 1>&2; exit 3").await.unwrap_err();
        assert_eq!(err, CommandError::Failed("boom".to_string()));
    }

    #[tokio::test]
    async fn test_silent_failure_reports_status() {
        let runner = ShellRunner::new();
        match runner.execute("exit 2").await.unwrap_err() {
            CommandError::Failed(detail) => assert!(detail.contains('2'), "{}", detail),
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_executable_is_not_found() {
        let runner = ShellRunner::new();
        let err = runner
            .execute("summairize-definitely-missing-binary --version")
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::NotFound(_)), "{:?}", err);
    }

    #[tokio::test]
    async fn test_stdin_is_closed() {
        let runner = ShellRunner::new().with_timeout(Duration::from_secs(5));
        let output = runner.execute("cat; echo done").await.unwrap();
        assert_eq!(output, "done");
    }

    #[tokio::test]
    async fn test_output_cap_is_failure_not_truncation() {
        let runner = ShellRunner::new().with_max_output(16);
        let err = runner.execute("printf '%0100d' 0").await.unwrap_err();
        assert_eq!(err, CommandError::Failed("output exceeded 16 bytes".to_string()));
    }

    #[tokio::test]
    async fn test_unbounded_output_fails_before_timeout() {
        let runner = ShellRunner::new()
            .with_max_output(1024)
            .with_timeout(Duration::from_secs(20));
        let started = std::time::Instant::now();
        let err = runner.execute("yes").await.unwrap_err();
        assert!(matches!(err, CommandError::Failed(_)), "{:?}", err);
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_child_sees_augmented_path() {
        let runner = ShellRunner::new();
        let path = runner.execute("printf '%s' \"$PATH\"").await.unwrap();
        assert!(path.contains("/usr/local/bin"));
        assert!(path.contains("/opt/homebrew/bin"));
        if let Some(original) = env::var_os("PATH") {
            assert!(path.starts_with(original.to_string_lossy().as_ref()));
        }
    }

    #[tokio::test]
    async fn test_execute_with_timeout_overrides_default() {
        let runner = ShellRunner::new().with_timeout(Duration::from_millis(100));
        let output = runner
            .execute_with_timeout("sleep 0.3; echo slow", Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(output, "slow");
    }

    #[cfg(target_os = "linux")]
    fn is_gone(pid: &str) -> bool {
        // Missing, or a zombie waiting for an init that may never reap it.
        match std::fs::read_to_string(format!("/proc/{}/stat", pid.trim())) {
            Err(_) => true,
            Ok(stat) => stat
                .rsplit(')')
                .next()
                .map(|rest| rest.trim_start().starts_with('Z'))
                .unwrap_or(false),
        }
    }

    #[cfg(target_os = "linux")]
    async fn wait_for_pid_file(path: &Path) -> String {
        for _ in 0..50 {
            if let Ok(pid) = std::fs::read_to_string(path) {
                if !pid.trim().is_empty() {
                    return pid;
                }
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("pid file {} never written", path.display());
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_timeout_terminates_shell_and_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let sh_pid = dir.path().join("sh.pid");
        let bg_pid = dir.path().join("bg.pid");
        let line = format!(
            "echo $$ > {}; sleep 30 & echo $! > {}; wait",
            escape_argument(&sh_pid.to_string_lossy()),
            escape_argument(&bg_pid.to_string_lossy()),
        );

        let runner = ShellRunner::new().with_timeout(Duration::from_millis(500));
        let err = runner.execute(&line).await.unwrap_err();
        assert_eq!(err, CommandError::TimedOut(Duration::from_millis(500)));

        let sh = wait_for_pid_file(&sh_pid).await;
        let bg = wait_for_pid_file(&bg_pid).await;

        let mut terminated = false;
        for _ in 0..50 {
            if is_gone(&sh) && is_gone(&bg) {
                terminated = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert!(terminated, "shell {} or background {} still running", sh, bg);
    }

    #[tokio::test]
    async fn test_command_exists() {
        let runner = ShellRunner::new();
        assert!(runner.command_exists("sh").await);
        assert!(!runner.command_exists("summairize-definitely-missing-binary").await);
    }

    #[tokio::test]
    async fn test_command_exists_does_not_execute_injected_text() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("pwned");
        let name = format!("sh; touch {}", marker.display());

        let runner = ShellRunner::new();
        assert!(!runner.command_exists(&name).await);
        assert!(!marker.exists());
    }
}
