//! Chunk-invariance: splitting input differently must never change the result.

mod common;

use std::io::{self, Read};

use common::{SimpleRng, feed_chunked};
use zplating_core::{ParserConfig, StreamParser, parse_reader};

const INPUTS: &[&str] = &[
    "^XA^FO100,200^FDHello^FS^XZ",
    "^XA\n^CC!\n!CD;\n!FO1;2!FDbang!FS\n!XZ",
    "^XA^A0N,30,25^FDGrüße, €5^FS^BY3^BCN,100,Y,N,N^FD123^FS^XZ",
    "^XA^CT@@HS^PQ2,0,1,Y^XZ",
    "^XA^FO1,2^QQQQ^XZ",
];

/// Reader that hands out bytes in pseudo-random sized pieces, splitting
/// multi-byte characters freely.
struct TrickleReader<'a> {
    data: &'a [u8],
    rng: SimpleRng,
}

impl Read for TrickleReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let want = 1 + self.rng.gen_range(4);
        let n = want.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fn char_by_char(input: &str) -> StreamParser {
    let mut parser = StreamParser::new();
    for c in input.chars() {
        if !parser.feed(c) {
            break;
        }
    }
    parser
}

#[test]
fn fixed_chunk_sizes_match_char_by_char() {
    for input in INPUTS {
        let reference = char_by_char(input);
        for size in [1, 2, 3, 5, 7, 64] {
            let chunked = feed_chunked(input, &[size]);
            assert_eq!(chunked.commands(), reference.commands(), "size {size}: {input}");
            assert_eq!(chunked.error(), reference.error(), "size {size}: {input}");
        }
    }
}

#[test]
fn random_chunk_sizes_match_char_by_char() {
    let mut rng = SimpleRng::new(0x5EED);
    for input in INPUTS {
        let reference = char_by_char(input);
        for _ in 0..50 {
            let sizes: Vec<usize> = (0..8).map(|_| 1 + rng.gen_range(6)).collect();
            let chunked = feed_chunked(input, &sizes);
            assert_eq!(chunked.commands(), reference.commands(), "{sizes:?}: {input}");
            assert_eq!(chunked.error(), reference.error(), "{sizes:?}: {input}");
        }
    }
}

#[test]
fn trickled_bytes_match_whole_string() {
    for (i, input) in INPUTS.iter().enumerate() {
        let mut reference = char_by_char(input);
        let _ = reference.finish();
        let reader = TrickleReader {
            data: input.as_bytes(),
            rng: SimpleRng::new(i as u64 + 1),
        };
        let parsed = parse_reader(reader, ParserConfig::default()).unwrap();
        assert_eq!(parsed.commands(), reference.commands(), "{input}");
        assert_eq!(parsed.error(), reference.error(), "{input}");
    }
}

#[test]
fn reconfiguration_split_at_every_boundary() {
    let input = "^CD;^FO1;2^FS";
    let expected = char_by_char(input);
    for split in 0..=input.len() {
        let mut parser = StreamParser::new();
        parser.feed_str(&input[..split]);
        parser.feed_str(&input[split..]);
        assert_eq!(parser.commands(), expected.commands(), "split at {split}");
    }
}
