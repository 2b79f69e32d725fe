//! Incremental line framing for SSE byte streams
//!
//! Network reads carry no alignment guarantee: a chunk may end mid-line or
//! mid-character. Bytes accumulate here and only complete
//! newline-terminated lines come out; the trailing fragment stays buffered
//! for the next read. Splitting at the byte level keeps multi-byte UTF-8
//! sequences intact across chunk boundaries, since `\n` never occurs
//! inside one.

/// Reassembles complete lines from arbitrarily partitioned byte chunks
#[derive(Debug, Default)]
pub(crate) struct LineBuffer {
    buf: Vec<u8>,
}

impl LineBuffer {
    /// Append a chunk and return every line completed by it
    ///
    /// Trailing `\r` is stripped from each line. Invalid UTF-8 within a
    /// complete line decodes lossily rather than failing the stream.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(newline) = self.buf.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.buf.drain(..=newline).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }

    /// Drain the trailing unterminated fragment, if any
    pub fn flush(&mut self) -> Option<String> {
        if self.buf.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.buf);
        Some(String::from_utf8_lossy(&rest).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_complete_lines_only() {
        let mut buffer = LineBuffer::default();
        assert_eq!(buffer.feed(b"data: hel"), Vec::<String>::new());
        assert_eq!(buffer.feed(b"lo\ndata: wor"), vec!["data: hello"]);
        assert_eq!(buffer.feed(b"ld\n"), vec!["data: world"]);
    }

    #[test]
    fn strips_carriage_returns() {
        let mut buffer = LineBuffer::default();
        assert_eq!(buffer.feed(b"data: hi\r\n\r\n"), vec!["data: hi", ""]);
    }

    #[test]
    fn multibyte_character_split_across_chunks_survives() {
        let text = "data: héllo ✓\n";
        let bytes = text.as_bytes();

        // Split at every byte boundary, including mid-character
        for split in 1..bytes.len() {
            let mut buffer = LineBuffer::default();
            let mut lines = buffer.feed(&bytes[..split]);
            lines.extend(buffer.feed(&bytes[split..]));
            assert_eq!(lines, vec!["data: héllo ✓"], "split at byte {split}");
        }
    }

    #[test]
    fn flush_returns_trailing_fragment_once() {
        let mut buffer = LineBuffer::default();
        buffer.feed(b"data: tail");
        assert_eq!(buffer.flush().as_deref(), Some("data: tail"));
        assert!(buffer.flush().is_none());
    }
}
