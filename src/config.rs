//! The resolved collection configuration handed to the collection engine.

use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;

use serde::{Serialize, Serializer};

use crate::toggles::Toggles;

/// Size of the kernel's task name buffer, terminator included.
pub const TASK_COMM_LEN: usize = 16;

pub const DEFAULT_OUTPUT: &str = "sched-analyzer.perfetto-trace";

/// 250MiB
pub const DEFAULT_MAX_SIZE: u64 = 250 * 1024 * 1024;

/// Where trace data is collected from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmissionMode {
    /// System wide, through the traced and traced_probes daemons.
    #[default]
    System,
    /// Only data generated by this process, without traced.
    App,
}

/// NUL terminated task name of at most `TASK_COMM_LEN - 1` bytes.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TaskComm([u8; TASK_COMM_LEN]);

impl TaskComm {
    /// Copy at most `TASK_COMM_LEN - 1` bytes of `name`, stopping early at
    /// an embedded NUL. The last byte is always left as the terminator.
    pub fn new(name: &str) -> Self {
        let mut buf = [0u8; TASK_COMM_LEN];
        for (dst, src) in buf[..TASK_COMM_LEN - 1]
            .iter_mut()
            .zip(name.bytes().take_while(|b| *b != 0))
        {
            *dst = src;
        }
        TaskComm(buf)
    }

    /// Name bytes without the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        let len = self.0.iter().position(|b| *b == 0).unwrap_or(TASK_COMM_LEN);
        &self.0[..len]
    }

    pub fn as_bytes_with_nul(&self) -> &[u8; TASK_COMM_LEN] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0[0] == 0
    }

    /// Truncation can split a multi-byte character, hence lossy.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }
}

impl fmt::Debug for TaskComm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TaskComm({:?})", self.to_string_lossy())
    }
}

impl fmt::Display for TaskComm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl Serialize for TaskComm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_lossy())
    }
}

/// Everything the collection engine needs to know about what to record
/// and where to write it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    pub mode: EmissionMode,
    /// Trace file name
    pub output: PathBuf,
    /// Directory for the trace file, current directory when unset
    pub output_path: Option<PathBuf>,
    /// Maximum trace size in bytes
    pub max_size: u64,
    pub toggles: Toggles,
    /// Only collect for this pid, 0 for every task
    pub pid: u32,
    /// Only collect for tasks whose name contains this, empty for every task
    pub comm: TaskComm,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            mode: EmissionMode::System,
            output: PathBuf::from(DEFAULT_OUTPUT),
            output_path: None,
            max_size: DEFAULT_MAX_SIZE,
            toggles: Toggles::empty(),
            pid: 0,
            comm: TaskComm::default(),
        }
    }
}

impl Configuration {
    pub fn is_system(&self) -> bool {
        self.mode == EmissionMode::System
    }

    pub fn is_app(&self) -> bool {
        self.mode == EmissionMode::App
    }

    pub fn set_mode(&mut self, mode: EmissionMode) {
        self.mode = mode;
    }

    /// Path of the trace file the writer should create.
    pub fn trace_path(&self) -> PathBuf {
        match &self.output_path {
            Some(dir) => dir.join(&self.output),
            None => self.output.clone(),
        }
    }

    pub fn pid_filter(&self) -> Option<u32> {
        (self.pid != 0).then_some(self.pid)
    }

    pub fn comm_filter(&self) -> Option<&TaskComm> {
        (!self.comm.is_empty()).then_some(&self.comm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_defaults() {
        let config = Configuration::default();
        assert!(config.is_system());
        assert!(!config.is_app());
        assert_eq!(config.output, Path::new("sched-analyzer.perfetto-trace"));
        assert_eq!(config.output_path, None);
        assert_eq!(config.max_size, 262_144_000);
        assert!(config.toggles.is_empty());
        assert_eq!(config.pid_filter(), None);
        assert_eq!(config.comm_filter(), None);
    }

    #[test]
    fn test_mode_is_exclusive() {
        let mut config = Configuration::default();
        config.set_mode(EmissionMode::App);
        assert!(config.is_app() && !config.is_system());
        config.set_mode(EmissionMode::System);
        assert!(config.is_system() && !config.is_app());
    }

    #[test]
    fn test_trace_path() {
        let mut config = Configuration::default();
        assert_eq!(config.trace_path(), Path::new(DEFAULT_OUTPUT));
        config.output_path = Some(PathBuf::from("/tmp/traces"));
        config.output = PathBuf::from("run.perfetto-trace");
        assert_eq!(
            config.trace_path(),
            Path::new("/tmp/traces/run.perfetto-trace")
        );
    }

    #[test]
    fn test_comm_bounds() {
        let short = TaskComm::new("bash");
        assert_eq!(short.as_bytes(), b"bash");
        assert_eq!(short.to_string(), "bash");
        assert!(!short.is_empty());

        let exact = TaskComm::new("123456789012345");
        assert_eq!(exact.as_bytes().len(), TASK_COMM_LEN - 1);

        let long = TaskComm::new("1234567890123456789");
        assert_eq!(long.as_bytes(), b"123456789012345");
        assert_eq!(long.as_bytes_with_nul()[TASK_COMM_LEN - 1], 0);

        assert!(TaskComm::new("").is_empty());
        assert_eq!(TaskComm::new("ab\0cd").as_bytes(), b"ab");
    }

    #[test]
    fn test_comm_split_character_is_lossy() {
        // 14 ASCII bytes then a two byte character straddling the limit.
        let comm = TaskComm::new("abcdefghijklmné");
        assert_eq!(comm.as_bytes().len(), TASK_COMM_LEN - 1);
        assert_eq!(comm.to_string_lossy(), "abcdefghijklmn\u{fffd}");
    }

    #[test]
    fn test_serialize() {
        let mut config = Configuration::default();
        config.comm = TaskComm::new("kworker");
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["mode"], "system");
        assert_eq!(json["comm"], "kworker");
        assert_eq!(json["output_path"], serde_json::Value::Null);
        assert_eq!(json["toggles"], serde_json::json!([]));
    }
}
