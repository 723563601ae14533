//! Feed a [`StreamParser`] from any byte source, one chunk at a time.

use std::io::{self, Read};

use crate::config::ParserConfig;
use crate::grammar::parser::StreamParser;

/// Bytes requested from the reader per read call.
pub const CHUNK_SIZE: usize = 1000;

/// Parse everything `reader` yields, without buffering the whole input.
///
/// Bytes are decoded as UTF-8; a sequence split across chunk boundaries is
/// carried over to the next chunk, and invalid sequences become U+FFFD.
/// Reading stops at the first parse failure. At end of input the parser is
/// finished.
///
/// I/O errors are returned directly. Parse failures are not: inspect
/// [`StreamParser::error`] on the returned parser.
pub fn parse_reader<R: Read>(mut reader: R, config: ParserConfig) -> io::Result<StreamParser> {
    let mut parser = StreamParser::with_config(config);
    let mut decoder = Utf8Decoder::default();
    let mut buf = [0u8; CHUNK_SIZE];

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if !decoder.decode(&buf[..n], |c| parser.feed(c)) {
            log::debug!("stopped reading at {}", parser.position());
            return Ok(parser);
        }
    }

    // A truncated multi-byte sequence at EOF.
    if decoder.has_pending() && !parser.feed(char::REPLACEMENT_CHARACTER) {
        return Ok(parser);
    }
    // Any failure here is recorded on the parser.
    let _ = parser.finish();
    Ok(parser)
}

/// Incremental UTF-8 decoder that tolerates sequences split across chunks.
#[derive(Debug, Default)]
struct Utf8Decoder {
    /// Leading bytes of an incomplete sequence from the previous chunk.
    pending: Vec<u8>,
}

impl Utf8Decoder {
    /// Decode `bytes`, passing each char to `sink` until it returns `false`.
    ///
    /// Returns `false` if `sink` asked to stop.
    fn decode(&mut self, bytes: &[u8], mut sink: impl FnMut(char) -> bool) -> bool {
        let mut data = std::mem::take(&mut self.pending);
        data.extend_from_slice(bytes);
        let mut rest = data.as_slice();

        loop {
            match std::str::from_utf8(rest) {
                Ok(s) => return s.chars().all(&mut sink),
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    let valid = std::str::from_utf8(valid).unwrap_or_default();
                    if !valid.chars().all(&mut sink) {
                        return false;
                    }
                    match e.error_len() {
                        Some(len) => {
                            if !sink(char::REPLACEMENT_CHARACTER) {
                                return false;
                            }
                            rest = &after[len..];
                        }
                        None => {
                            self.pending.extend_from_slice(after);
                            return true;
                        }
                    }
                }
            }
        }
    }

    fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
