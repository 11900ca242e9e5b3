use bytes::BytesMut;

/// Accumulates raw fragments of the NDJSON body and yields complete lines.
///
/// Fragments arrive at arbitrary byte boundaries: a terminator can fall
/// exactly between two chunks, and a multi-byte UTF-8 sequence can be split
/// mid-character. Splitting happens on raw bytes, so a partial sequence
/// simply waits in the remainder until its line completes.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: BytesMut,
}

impl LineBuffer {
    /// Appends a fragment and returns all newly completed lines in arrival
    /// order. Empty and whitespace-only lines carry no message and are
    /// filtered out; a trailing `\r` is stripped.
    pub fn push(&mut self, fragment: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(fragment);

        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|&byte| byte == b'\n') {
            let mut line = self.pending.split_to(pos + 1);
            line.truncate(line.len() - 1);
            if line.last() == Some(&b'\r') {
                line.truncate(line.len() - 1);
            }
            let text = String::from_utf8_lossy(&line);
            if !text.trim().is_empty() {
                lines.push(text.into_owned());
            }
        }
        lines
    }

    /// End of stream: returns a non-empty remainder that never received its
    /// terminator. A truncated final message is not an event; the caller
    /// logs it and moves on.
    pub fn finish(self) -> Option<String> {
        let text = String::from_utf8_lossy(&self.pending);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}
