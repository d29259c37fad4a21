use std::{
    io::{self, Read, Write},
    process::{Child, Command, ExitStatus, Stdio},
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};

use log::{debug, warn};

use crate::{ExecutionArgs, ExecutionFailure, ExecutionResult, Executor};

const POLL_INTERVAL: Duration = Duration::from_millis(10);
/// How long to wait for output pipes to drain once the child has exited.
const DRAIN_TIMEOUT: Duration = Duration::from_millis(500);

/// Runs code by piping it to an interpreter's standard input.
#[derive(Clone, Debug)]
pub struct ProcessExecutor {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

struct ProcessOutput {
    /// `None` when the process was killed at the deadline.
    status: Option<ExitStatus>,
    stdout: String,
    stderr: String,
}

fn read_in_background<R: Read + Send + 'static>(reader: Option<R>) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut bytes = Vec::new();
        if let Some(mut reader) = reader {
            let _ = reader.read_to_end(&mut bytes);
        }
        let _ = tx.send(String::from_utf8_lossy(&bytes).into_owned());
    });
    rx
}

fn wait_with_deadline(child: &mut Child, timeout: Duration) -> io::Result<Option<ExitStatus>> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            child.wait()?;
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

impl ProcessExecutor {
    pub fn new(program: &str, args: &[&str], timeout: Duration) -> Self {
        ProcessExecutor {
            program: String::from(program),
            args: args.iter().map(|arg| String::from(*arg)).collect(),
            timeout,
        }
    }
    /// An interpreter that reads its program from standard input, such as `python3 -`.
    pub fn from_args(args: &ExecutionArgs) -> Self {
        ProcessExecutor::new(
            &args.interpreter,
            &["-"],
            Duration::from_millis(args.timeout_ms),
        )
    }
    fn run(&self, code: &str) -> io::Result<ProcessOutput> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;
        let stdin = child.stdin.take();
        let code = String::from(code);
        let writer = thread::spawn(move || {
            if let Some(mut stdin) = stdin {
                let _ = stdin.write_all(code.as_bytes());
            }
        });
        let stdout = read_in_background(child.stdout.take());
        let stderr = read_in_background(child.stderr.take());
        let status = wait_with_deadline(&mut child, self.timeout)?;
        let _ = writer.join();
        Ok(ProcessOutput {
            status,
            stdout: stdout.recv_timeout(DRAIN_TIMEOUT).unwrap_or_default(),
            stderr: stderr.recv_timeout(DRAIN_TIMEOUT).unwrap_or_default(),
        })
    }
}

impl Executor for ProcessExecutor {
    fn execute(&self, code: &str) -> ExecutionResult {
        let start = Instant::now();
        let output = match self.run(code) {
            Ok(output) => output,
            Err(error) => {
                warn!("could not run '{}': {error}", self.program);
                return ExecutionResult::failed(
                    format!("could not run '{}': {error}", self.program),
                    start.elapsed(),
                );
            }
        };
        let elapsed = start.elapsed();
        let failure = match output.status {
            Some(status) if status.success() => None,
            Some(_) => Some(ExecutionFailure::from_stderr(&output.stderr)),
            None => Some(ExecutionFailure {
                message: format!("timed out after {} ms", self.timeout.as_millis()),
                line: None,
            }),
        };
        debug!(
            "'{}' finished in {:?} ({})",
            self.program,
            elapsed,
            if failure.is_none() { "success" } else { "failure" }
        );
        ExecutionResult {
            success: failure.is_none(),
            stdout: output.stdout,
            stderr: output.stderr,
            failure,
            elapsed,
        }
    }
}
