//! Shared test helpers for `zplating_core` integration tests.

#![allow(unreachable_pub)]

use std::path::PathBuf;
use zplating_core::{Command, StreamParser};

// ─── Command helpers ─────────────────────────────────────────────────────────

/// Collect mnemonics (in order) from parsed commands.
#[allow(dead_code)]
pub fn mnemonics(commands: &[Command]) -> Vec<String> {
    commands.iter().map(|c| c.mnemonic.clone()).collect()
}

/// Find the first command with the given mnemonic and return its args.
#[allow(dead_code)]
pub fn find_args(commands: &[Command], mnemonic: &str) -> Vec<String> {
    commands
        .iter()
        .find(|c| c.mnemonic == mnemonic)
        .map(|c| c.args.clone())
        .unwrap_or_else(|| panic!("expected command {mnemonic}"))
}

/// Feed `input` in chunks whose sizes cycle through `sizes` (in chars).
#[allow(dead_code)]
pub fn feed_chunked(input: &str, sizes: &[usize]) -> StreamParser {
    let chars: Vec<char> = input.chars().collect();
    let mut parser = StreamParser::new();
    let mut start = 0;
    for &size in sizes.iter().cycle() {
        if start >= chars.len() {
            break;
        }
        let end = (start + size.max(1)).min(chars.len());
        let chunk: String = chars[start..end].iter().collect();
        if !parser.feed_str(&chunk) {
            break;
        }
        start = end;
    }
    parser
}

// ─── Fixtures ────────────────────────────────────────────────────────────────

/// Repository-level `samples/` directory.
#[allow(dead_code)]
pub fn samples_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../samples")
}

// ─── Simple deterministic PRNG (LCG) ────────────────────────────────────────

#[allow(dead_code)]
pub struct SimpleRng(u64);

#[allow(dead_code)]
impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    pub fn gen_range(&mut self, max: usize) -> usize {
        ((self.next() >> 33) as usize) % max
    }

    pub fn gen_bytes(&mut self, len: usize) -> Vec<u8> {
        (0..len).map(|_| (self.next() >> 56) as u8).collect()
    }
}
