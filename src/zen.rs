// Zen mode line reconciler
// Flat text buffer <-> (previous lines, current line)

use crate::storage::normalize_header;

/// The buffer as seen by the line-at-a-time editor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZenLines {
    pub previous_lines: Vec<String>,
    pub current_line: String,
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

impl ZenLines {
    /// Split a flat buffer. The last line with content becomes the current
    /// line; trailing blank lines are dropped. A buffer with no content keeps
    /// its leading run of empty lines as padding.
    pub fn split(buffer: &str) -> Self {
        let lines: Vec<&str> = buffer.split('\n').collect();

        match lines.iter().rposition(|line| !is_blank(line)) {
            Some(last) => Self {
                previous_lines: lines[..last].iter().map(|s| s.to_string()).collect(),
                current_line: lines[last].to_string(),
            },
            None => Self {
                previous_lines: lines
                    .iter()
                    .take_while(|line| line.is_empty())
                    .map(|s| s.to_string())
                    .collect(),
                current_line: String::new(),
            },
        }
    }

    /// The flat buffer exactly as split, before any normalization
    pub fn to_buffer(&self) -> String {
        let mut lines: Vec<&str> = self.previous_lines.iter().map(String::as_str).collect();
        lines.push(&self.current_line);
        lines.join("\n")
    }

    /// Rebuild the flat buffer on leaving line mode. A blank current line is
    /// discarded; the result carries the two-newline header.
    pub fn join(&self) -> String {
        let mut lines: Vec<&str> = self.previous_lines.iter().map(String::as_str).collect();
        if !is_blank(&self.current_line) {
            lines.push(&self.current_line);
        }
        normalize_header(&lines.join("\n"))
    }

    /// Enter pressed: keep a non-blank line, clear the input, and return the
    /// flat buffer the editor should now show.
    pub fn submit_line(&mut self) -> String {
        if !is_blank(&self.current_line) {
            let line = std::mem::take(&mut self.current_line);
            self.previous_lines.push(line);
        } else {
            self.current_line.clear();
        }

        let mut buffer = self.previous_lines.join("\n");
        if !self.previous_lines.is_empty() {
            buffer.push('\n');
        }
        buffer
    }
}

/// Split for mode entry; also returns the buffer reassigned to match
pub fn split(buffer: &str) -> (ZenLines, String) {
    let lines = ZenLines::split(buffer);
    let reassigned = lines.to_buffer();
    (lines, reassigned)
}

/// Join for mode exit
pub fn join(previous_lines: &[String], current_line: &str) -> String {
    ZenLines {
        previous_lines: previous_lines.to_vec(),
        current_line: current_line.to_string(),
    }
    .join()
}
