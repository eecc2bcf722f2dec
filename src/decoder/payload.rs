/// Byte-mode payload parsing from data codewords
use crate::error::ReadbackError;
use crate::models::Version;

const MODE_TERMINATOR: u32 = 0b0000;
const MODE_BYTE: u32 = 0b0100;

pub(crate) fn codewords_to_bits(codewords: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(codewords.len() * 8);
    for &byte in codewords {
        for i in (0..8).rev() {
            bits.push(((byte >> i) & 1) != 0);
        }
    }
    bits
}

pub(crate) fn bits_to_codewords(bits: &[bool]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |byte, &bit| (byte << 1) | bit as u8))
        .collect()
}

/// Parse byte-mode segments until a terminator or the end of the stream
pub(crate) fn decode_payload(
    data_codewords: &[u8],
    version: Version,
) -> Result<Vec<u8>, ReadbackError> {
    let bits = codewords_to_bits(data_codewords);
    let mut reader = BitReader::new(&bits);
    let mut data = Vec::new();

    while reader.remaining() >= 4 {
        match reader.read_bits(4)? {
            MODE_TERMINATOR => break,
            MODE_BYTE => {
                let count = reader.read_bits(version.char_count_bits())? as usize;
                data.reserve(count);
                for _ in 0..count {
                    data.push(reader.read_bits(8)? as u8);
                }
            }
            other => return Err(ReadbackError::UnsupportedMode(other as u8)),
        }
    }

    Ok(data)
}

struct BitReader<'a> {
    bits: &'a [bool],
    idx: usize,
}

impl<'a> BitReader<'a> {
    fn new(bits: &'a [bool]) -> Self {
        Self { bits, idx: 0 }
    }

    fn remaining(&self) -> usize {
        self.bits.len().saturating_sub(self.idx)
    }

    fn read_bits(&mut self, n: usize) -> Result<u32, ReadbackError> {
        if self.idx + n > self.bits.len() {
            return Err(ReadbackError::Truncated);
        }
        let mut val = 0u32;
        for _ in 0..n {
            val = (val << 1) | (self.bits[self.idx] as u32);
            self.idx += 1;
        }
        Ok(val)
    }
}
