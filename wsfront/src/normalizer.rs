//! Strips comment bytes out of incoming source, keeping only the
//! three-character alphabet the tokenizer understands.

const TAB: u8 = b'\t';
const SPACE: u8 = b' ';
const NEWLINE: u8 = b'\n';

/// Accumulates significant bytes ('\t', ' ', '\n') from arbitrarily chunked
/// input, discarding everything else as comment.
#[derive(Default, Debug)]
pub struct Normalizer {
    buffer: Vec<u8>,
}

impl Normalizer {
    pub fn new() -> Normalizer {
        Normalizer { buffer: Vec::new() }
    }

    /// Appends `bytes`, retaining only the significant alphabet.
    pub fn append(&mut self, bytes: &[u8]) {
        self.buffer.extend(
            bytes
                .iter()
                .copied()
                .filter(|&b| b == TAB || b == SPACE || b == NEWLINE),
        );
    }

    /// Returns the accumulated significant characters.
    pub fn finalize(&self) -> Vec<u8> {
        self.buffer.clone()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn strips_comment_bytes() {
        let mut normalizer = Normalizer::new();
        normalizer.append(b"push # comment\tA\n");
        assert_eq!(normalizer.finalize(), b"\t\n".to_vec());
    }

    #[test]
    fn accumulates_across_chunks() {
        let mut normalizer = Normalizer::new();
        normalizer.append(b" \t");
        normalizer.append(b"\n");
        assert_eq!(normalizer.finalize(), b" \t\n".to_vec());
    }

    #[test]
    fn clear_discards_state() {
        let mut normalizer = Normalizer::new();
        normalizer.append(b" \t\n");
        normalizer.clear();
        assert!(normalizer.is_empty());
    }
}
