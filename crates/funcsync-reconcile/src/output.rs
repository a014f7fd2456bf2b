//! Output channel collaborator

/// Sink for the user-facing progress lines a pass emits.
pub trait OutputChannel {
    fn log_line(&mut self, line: &str);
}

/// Buffers lines in memory; the test-side output channel.
#[derive(Debug, Default)]
pub struct BufferedOutput {
    lines: Vec<String>,
}

impl BufferedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines logged so far, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns true if any logged line contains the given fragment.
    pub fn contains(&self, fragment: &str) -> bool {
        self.lines.iter().any(|line| line.contains(fragment))
    }
}

impl OutputChannel for BufferedOutput {
    fn log_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}
