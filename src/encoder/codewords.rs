//! Block splitting, error correction and interleaving of the codeword sequence

use super::reed_solomon::ReedSolomonEncoder;
use super::tables::{ec_block_info, total_codewords};
use crate::models::{ECLevel, Version};

/// Data lengths of every block, short blocks first
pub fn block_lengths(version: Version, ec_level: ECLevel, data_total: usize) -> Vec<usize> {
    let info = ec_block_info(version, ec_level);
    let num_long_blocks = data_total % info.num_blocks;
    let num_short_blocks = info.num_blocks - num_long_blocks;
    let short_len = data_total / info.num_blocks;
    (0..info.num_blocks)
        .map(|b| {
            if b < num_short_blocks {
                short_len
            } else {
                short_len + 1
            }
        })
        .collect()
}

/// Append EC codewords per block and interleave into final symbol order.
///
/// Output is all data codewords column by column across blocks, followed by
/// all EC codewords column by column.
pub fn add_ec_and_interleave(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<u8> {
    let info = ec_block_info(version, ec_level);
    let rs = ReedSolomonEncoder::new(info.ecc_per_block);

    let mut data_blocks: Vec<&[u8]> = Vec::with_capacity(info.num_blocks);
    let mut offset = 0;
    for len in block_lengths(version, ec_level, data.len()) {
        data_blocks.push(&data[offset..offset + len]);
        offset += len;
    }
    let ec_blocks: Vec<Vec<u8>> = data_blocks.iter().map(|block| rs.encode(block)).collect();

    let mut result = Vec::with_capacity(total_codewords(version));
    let long_len = data_blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    for i in 0..long_len {
        for block in &data_blocks {
            if let Some(&byte) = block.get(i) {
                result.push(byte);
            }
        }
    }
    for i in 0..info.ecc_per_block {
        for block in &ec_blocks {
            result.push(block[i]);
        }
    }

    result
}
