//! Byte to text chunk decoding
//!
//! Terminal reads can end in the middle of a multi-byte UTF-8 sequence. The
//! decoder holds such a tail back until the next read completes it, and
//! replaces bytes that can never be valid with U+FFFD.

/// Incremental UTF-8 decoder, one text chunk per read
#[derive(Debug, Default)]
pub struct ChunkDecoder {
    carry: Vec<u8>,
}

impl ChunkDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one read. An incomplete trailing sequence is kept for the next
    /// call and not included in the returned chunk.
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        self.carry.extend_from_slice(bytes);

        let mut chunk = String::with_capacity(self.carry.len());
        let mut rest: &[u8] = &self.carry;

        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    chunk.push_str(text);
                    rest = &[];
                    break;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    chunk.push_str(&String::from_utf8_lossy(valid));

                    match e.error_len() {
                        // Incomplete sequence at the end, wait for more bytes
                        None => {
                            rest = after;
                            break;
                        }
                        Some(len) => {
                            chunk.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                    }
                }
            }
        }

        let remainder = rest.to_vec();
        self.carry = remainder;
        chunk
    }

    /// Flush whatever is held back, e.g. when the stream ends.
    pub fn finish(&mut self) -> String {
        let tail = String::from_utf8_lossy(&self.carry).into_owned();
        self.carry.clear();
        tail
    }

    /// Whether bytes are being held back
    pub fn has_pending(&self) -> bool {
        !self.carry.is_empty()
    }
}
