//! Low-level sub-process handling for shell actions

use std::io::{self, Read};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

/// How long to keep reading a child's pipes after it has exited
const OUTPUT_COLLECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum captured output across both streams (10MB)
const MAX_OUTPUT_SIZE: usize = 10 * 1024 * 1024;

const TRUNCATED_MARKER: &str = "\n[output truncated at 10MB]";
const TIMED_OUT_MARKER: &str = "\n[output collection timed out]";

/// Spawn `command` under `shell`.
///
/// The command line is handed to the interpreter as the single argument of
/// `-c`. Output is piped only when `capture` is set, otherwise discarded.
pub(super) fn spawn_shell(
    shell: &str,
    login: bool,
    command: &str,
    capture: bool,
) -> io::Result<Child> {
    let mut cmd = Command::new(shell);
    if login {
        cmd.arg("-l");
    }
    cmd.arg("-c").arg(command);

    let (stdout, stderr) = if capture {
        (Stdio::piped(), Stdio::piped())
    } else {
        (Stdio::null(), Stdio::null())
    };
    cmd.stdin(Stdio::null()).stdout(stdout).stderr(stderr);

    cmd.spawn()
}

/// Bytes read so far from a child's pipes, in arrival order
#[derive(Debug, Default)]
struct Captured {
    bytes: Vec<u8>,
    truncated: bool,
}

impl Captured {
    fn push(&mut self, chunk: &[u8]) {
        let room = MAX_OUTPUT_SIZE.saturating_sub(self.bytes.len());
        if chunk.len() > room {
            self.truncated = true;
        }
        self.bytes.extend_from_slice(&chunk[..chunk.len().min(room)]);
    }
}

fn lock(shared: &Mutex<Captured>) -> MutexGuard<'_, Captured> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Stdout and stderr of a child merged into one buffer as they are read
///
/// Each pipe gets a reader thread. Whatever was read is kept even when a
/// pipe stays open past the collection deadline, which happens when the
/// command leaves a background process holding it.
pub(super) struct OutputCapture {
    shared: Arc<Mutex<Captured>>,
    finished: Receiver<()>,
    readers: usize,
}

impl OutputCapture {
    /// Start reading the child's pipes.
    ///
    /// Must be called before waiting on the child, otherwise it can block on
    /// a full pipe buffer.
    pub(super) fn start(child: &mut Child) -> Self {
        let shared = Arc::new(Mutex::new(Captured::default()));
        let (tx, finished) = mpsc::channel();

        let mut readers = 0;
        if let Some(stdout) = child.stdout.take() {
            read_into(stdout, Arc::clone(&shared), tx.clone());
            readers += 1;
        }
        if let Some(stderr) = child.stderr.take() {
            read_into(stderr, Arc::clone(&shared), tx);
            readers += 1;
        }

        Self {
            shared,
            finished,
            readers,
        }
    }

    /// Everything captured, once the child has exited.
    pub(super) fn collect(self) -> String {
        self.collect_within(OUTPUT_COLLECTION_TIMEOUT)
    }

    /// Wait until both pipes close or `timeout` passes, whichever is first,
    /// and return what was read.
    pub(super) fn collect_within(self, timeout: Duration) -> String {
        let deadline = Instant::now() + timeout;
        let mut closed = 0;
        while closed < self.readers {
            let left = deadline.saturating_duration_since(Instant::now());
            if self.finished.recv_timeout(left).is_err() {
                break;
            }
            closed += 1;
        }

        let captured = lock(&self.shared);
        let mut text = String::from_utf8_lossy(&captured.bytes).into_owned();
        if captured.truncated {
            text.push_str(TRUNCATED_MARKER);
        }
        if closed < self.readers {
            tracing::debug!("output pipes still open after {}s", timeout.as_secs());
            text.push_str(TIMED_OUT_MARKER);
        }
        text
    }
}

/// Copy `stream` into `shared` chunk by chunk on a new thread, signalling
/// `finished` when the stream closes.
fn read_into<R: Read + Send + 'static>(
    mut stream: R,
    shared: Arc<Mutex<Captured>>,
    finished: Sender<()>,
) {
    thread::spawn(move || {
        let mut chunk = [0u8; 8192];
        loop {
            match stream.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => lock(&shared).push(&chunk[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }
        let _ = finished.send(());
    });
}

/// Kill a child process and reap it.
pub(super) fn kill_child_process(child: &mut Child) {
    // The process may already be gone
    let _ = child.kill();
    let _ = child.wait();
}
