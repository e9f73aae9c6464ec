//! CRC-64 over the reflected ISO 3309 polynomial.
//!
//! The register starts at zero and is returned without a final XOR, so the checksum of
//! an empty input is `0`. Values are exposed as `u64`; callers that need the signed view
//! can reinterpret the bit pattern with `as i64`.

const POLY64_REV: u64 = 0xd800_0000_0000_0000;

const LOOKUP_TABLE: [u64; 256] = build_table();

const fn build_table() -> [u64; 256] {
    let mut table = [0u64; 256];
    let mut i = 0;
    while i < 256 {
        let mut v = i as u64;
        let mut bit = 0;
        while bit < 8 {
            v = if v & 1 == 1 {
                (v >> 1) ^ POLY64_REV
            } else {
                v >> 1
            };
            bit += 1;
        }
        table[i] = v;
        i += 1;
    }
    table
}

/// Computes the CRC-64 of `data`.
pub fn crc64(data: &[u8]) -> u64 {
    data.iter().fold(0u64, |sum, &byte| {
        let index = ((sum ^ u64::from(byte)) & 0xff) as usize;
        (sum >> 8) ^ LOOKUP_TABLE[index]
    })
}

/// Streaming CRC-64 for inputs that arrive in pieces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Crc64 {
    sum: u64,
}

impl Crc64 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        for &byte in data {
            let index = ((self.sum ^ u64::from(byte)) & 0xff) as usize;
            self.sum = (self.sum >> 8) ^ LOOKUP_TABLE[index];
        }
        self
    }

    pub fn value(&self) -> u64 {
        self.sum
    }
}
