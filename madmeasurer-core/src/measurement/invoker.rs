// ============================================================================
// madmeasurer-core/src/measurement/invoker.rs
// ============================================================================
//
// MEASUREMENT INVOKER: Running madMeasureHDR
//
// The measurement tool reports progress by rewriting its status line with
// backspaces and carriage returns. Its output is therefore read in two
// phases: the banner line is read whole, after that the stream is decoded
// byte by byte and every visually complete update is forwarded as a
// MeasurementProgress event.
//
// stderr is drained on a scoped helper thread so the caller sees the
// combined output. There is no timeout and no cancellation: the call blocks
// until the tool exits. Failures are reported through events only.

use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use crate::events::{Event, EventDispatcher};

/// File name of the measurement tool.
pub const EXECUTABLE_NAME: &str = "madMeasureHDR.exe";

const BACKSPACE: u8 = 0x08;

/// Result of one measurement run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureOutcome {
    Completed,
    /// The tool exited unsuccessfully; `None` when it was killed by a signal.
    Failed(Option<i32>),
    SpawnFailed,
    DryRun,
}

impl MeasureOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, MeasureOutcome::Completed | MeasureOutcome::DryRun)
    }
}

/// Something that can measure a target file.
pub trait MeasurementRunner {
    fn measure(&self, target: &Path, events: &EventDispatcher) -> MeasureOutcome;
}

/// Splits the tool's output into progress updates.
///
/// An update ends at a backspace, carriage return or newline. Empty updates
/// are dropped.
#[derive(Debug, Default)]
pub struct ProgressDecoder {
    pending: Vec<u8>,
}

impl ProgressDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one byte, returning an update when it completes one.
    pub fn push(&mut self, byte: u8) -> Option<String> {
        match byte {
            BACKSPACE | b'\r' | b'\n' => self.take(),
            _ => {
                self.pending.push(byte);
                None
            }
        }
    }

    /// Flushes whatever is pending at end of stream.
    pub fn finish(&mut self) -> Option<String> {
        self.take()
    }

    fn take(&mut self) -> Option<String> {
        let bytes = std::mem::take(&mut self.pending);
        let update = String::from_utf8_lossy(&bytes).trim().to_string();
        (!update.is_empty()).then_some(update)
    }
}

fn emit_progress(events: &EventDispatcher, line: String) {
    events.emit(Event::MeasurementProgress { line });
}

/// Forwards everything from `reader` as progress events until end of stream.
pub fn stream_progress<R: Read>(reader: R, events: &EventDispatcher) -> io::Result<()> {
    let mut reader = BufReader::new(reader);

    let mut banner = Vec::new();
    reader.read_until(b'\n', &mut banner)?;
    let banner = String::from_utf8_lossy(&banner).trim().to_string();
    if !banner.is_empty() {
        emit_progress(events, banner);
    }

    let mut decoder = ProgressDecoder::new();
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => break,
            Ok(_) => {
                if let Some(update) = decoder.push(byte[0]) {
                    emit_progress(events, update);
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    if let Some(update) = decoder.finish() {
        emit_progress(events, update);
    }
    Ok(())
}

/// The madMeasureHDR executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MadMeasureHdr {
    executable: PathBuf,
    dry_run: bool,
}

impl MadMeasureHdr {
    pub fn new(executable: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            executable: executable.into(),
            dry_run,
        }
    }

    /// Resolves the tool inside `dir`, or the current directory, as an
    /// absolute path.
    pub fn locate(dir: Option<&Path>, dry_run: bool) -> Self {
        let relative = match dir {
            Some(dir) => dir.join(EXECUTABLE_NAME),
            None => PathBuf::from(EXECUTABLE_NAME),
        };
        Self::new(absolute(relative), dry_run)
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn describe(&self, target: &Path) -> String {
        format!("{} {}", self.executable.display(), target.display())
    }
}

fn absolute(path: PathBuf) -> PathBuf {
    std::path::absolute(&path).unwrap_or(path)
}

impl MeasurementRunner for MadMeasureHdr {
    fn measure(&self, target: &Path, events: &EventDispatcher) -> MeasureOutcome {
        let target = absolute(target.to_path_buf());
        let command = self.describe(&target);

        if self.dry_run {
            events.emit(Event::MeasurementDryRun { command });
            return MeasureOutcome::DryRun;
        }

        events.emit(Event::MeasurementStarted {
            command: command.clone(),
        });
        let mut child = match Command::new(&self.executable)
            .arg(&target)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                events.emit(Event::MeasurementFailed {
                    command,
                    reason: format!("unable to start: {e}"),
                });
                return MeasureOutcome::SpawnFailed;
            }
        };

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        thread::scope(|scope| {
            if let Some(stderr) = stderr {
                scope.spawn(|| {
                    if let Err(e) = stream_progress(stderr, events) {
                        events.emit(Event::MeasurementOutputUnreadable {
                            command: command.clone(),
                            stream: "stderr",
                            reason: e.to_string(),
                        });
                    }
                });
            }
            if let Some(stdout) = stdout {
                if let Err(e) = stream_progress(stdout, events) {
                    events.emit(Event::MeasurementOutputUnreadable {
                        command: command.clone(),
                        stream: "stdout",
                        reason: e.to_string(),
                    });
                }
            }
        });

        match child.wait() {
            Ok(status) if status.success() => {
                events.emit(Event::MeasurementCompleted { command });
                MeasureOutcome::Completed
            }
            Ok(status) => {
                events.emit(Event::MeasurementFailed {
                    command,
                    reason: status.to_string(),
                });
                MeasureOutcome::Failed(status.code())
            }
            Err(e) => {
                events.emit(Event::MeasurementFailed {
                    command,
                    reason: format!("unable to wait for exit: {e}"),
                });
                MeasureOutcome::Failed(None)
            }
        }
    }
}
