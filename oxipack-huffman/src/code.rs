//! Canonical Huffman code tables.
//!
//! Code lengths come from a binary merge tree over the symbol weights. Codes
//! are then assigned canonically: shorter lengths first, and within one length
//! in ascending byte order. Because the assignment depends only on the
//! lengths, a decoder given nothing but the `(symbol, length)` pairs rebuilds
//! exactly the table the encoder used.
//!
//! # Tie-breaking
//!
//! Tree nodes are ordered by `(weight, lowest byte value in the subtree)`.
//! Subtrees are disjoint, so this order is total and the tree is fully
//! determined by the input.

use crate::frequency::{ALPHABET_SIZE, FrequencyTable};
use oxipack_core::config::{MAX_CODE_LENGTH, MIN_CODE_LENGTH_LIMIT};
use oxipack_core::error::{OxiPackError, Result};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// A single code: the low `length` bits of `bits`, written MSB-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codeword {
    /// Code value.
    pub bits: u32,
    /// Code length in bits (1-32).
    pub length: u8,
}

impl Codeword {
    /// Whether `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Codeword) -> bool {
        self.length <= other.length
            && u64::from(other.bits) >> (other.length - self.length) == u64::from(self.bits)
    }
}

/// Byte value → canonical prefix code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    lengths: [u8; ALPHABET_SIZE],
    codes: [u32; ALPHABET_SIZE],
}

impl CodeTable {
    /// Derive the code table for a frequency table.
    ///
    /// `max_code_length` is clamped to `8..=32`. A lone symbol gets the 1-bit
    /// code `0`; an empty table yields an empty code table.
    pub fn from_frequencies(frequencies: &FrequencyTable, max_code_length: u8) -> Self {
        let limit = max_code_length.clamp(MIN_CODE_LENGTH_LIMIT, MAX_CODE_LENGTH);
        Self::assign(build_lengths(frequencies, limit))
    }

    /// Rebuild a code table from serialized `(symbol, length)` pairs.
    ///
    /// Pairs must be in strictly ascending symbol order with lengths in
    /// `1..=32`, and must satisfy the Kraft inequality. Incomplete codes are
    /// accepted.
    pub fn from_lengths(pairs: &[(u8, u8)]) -> Result<Self> {
        if pairs.len() > ALPHABET_SIZE {
            return Err(OxiPackError::corrupt_header(format!(
                "{} symbols exceed the alphabet size",
                pairs.len()
            )));
        }

        let mut lengths = [0u8; ALPHABET_SIZE];
        let mut previous: Option<u8> = None;
        let mut kraft = 0u64;

        for &(symbol, length) in pairs {
            if previous.is_some_and(|p| symbol <= p) {
                return Err(OxiPackError::corrupt_header(format!(
                    "symbol {symbol:#04x} is duplicated or out of order"
                )));
            }
            if length == 0 || length > MAX_CODE_LENGTH {
                return Err(OxiPackError::corrupt_header(format!(
                    "code length {length} for symbol {symbol:#04x} outside 1..={MAX_CODE_LENGTH}"
                )));
            }
            lengths[symbol as usize] = length;
            kraft += 1u64 << (MAX_CODE_LENGTH - length);
            previous = Some(symbol);
        }

        if kraft > 1u64 << MAX_CODE_LENGTH {
            return Err(OxiPackError::corrupt_header(
                "code lengths are over-subscribed (Kraft sum exceeds 1)",
            ));
        }

        Ok(Self::assign(lengths))
    }

    /// Assign canonical codes to valid lengths.
    fn assign(lengths: [u8; ALPHABET_SIZE]) -> Self {
        let bl_count = length_counts(&lengths);

        let mut next_code = [0u64; MAX_CODE_LENGTH as usize + 1];
        let mut code = 0u64;
        for bits in 1..=MAX_CODE_LENGTH as usize {
            code = (code + u64::from(bl_count[bits - 1])) << 1;
            next_code[bits] = code;
        }

        let mut codes = [0u32; ALPHABET_SIZE];
        for (symbol, &length) in lengths.iter().enumerate() {
            if length > 0 {
                codes[symbol] = next_code[length as usize] as u32;
                next_code[length as usize] += 1;
            }
        }

        Self { lengths, codes }
    }

    /// Code for `symbol`, or `None` if it does not occur.
    #[inline]
    pub fn get(&self, symbol: u8) -> Option<Codeword> {
        match self.lengths[symbol as usize] {
            0 => None,
            length => Some(Codeword {
                bits: self.codes[symbol as usize],
                length,
            }),
        }
    }

    /// Code length for `symbol` (0 if absent).
    #[inline]
    pub fn length(&self, symbol: u8) -> u8 {
        self.lengths[symbol as usize]
    }

    /// Present `(symbol, length)` pairs in ascending symbol order.
    ///
    /// This is exactly what the container header stores.
    pub fn lengths(&self) -> Vec<(u8, u8)> {
        self.iter().map(|(s, c)| (s, c.length)).collect()
    }

    /// Present symbols with their codes, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Codeword)> + '_ {
        (0..=255u8).filter_map(|s| self.get(s).map(|c| (s, c)))
    }

    /// Number of symbols with a code.
    pub fn symbol_count(&self) -> usize {
        self.lengths.iter().filter(|&&l| l > 0).count()
    }

    /// `true` if no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.symbol_count() == 0
    }

    /// Longest code length (0 for an empty table).
    pub fn max_length(&self) -> u8 {
        self.lengths.iter().copied().max().unwrap_or(0)
    }

    /// Shortest code length (0 for an empty table).
    pub fn min_length(&self) -> u8 {
        self.lengths.iter().copied().filter(|&l| l > 0).min().unwrap_or(0)
    }

    /// Number of codes of each length, indexed by length.
    pub fn length_counts(&self) -> [u32; MAX_CODE_LENGTH as usize + 1] {
        length_counts(&self.lengths)
    }

    /// Payload size in bits for data with these frequencies.
    pub fn encoded_bits(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .present()
            .map(|(s, c)| c * u64::from(self.length(s)))
            .sum()
    }
}

fn length_counts(lengths: &[u8; ALPHABET_SIZE]) -> [u32; MAX_CODE_LENGTH as usize + 1] {
    let mut bl_count = [0u32; MAX_CODE_LENGTH as usize + 1];
    for &length in lengths {
        if length > 0 {
            bl_count[length as usize] += 1;
        }
    }
    bl_count
}

/// Compute code lengths from the merge tree, limited to `limit` bits.
fn build_lengths(frequencies: &FrequencyTable, limit: u8) -> [u8; ALPHABET_SIZE] {
    let present: Vec<(u8, u64)> = frequencies.present().collect();
    let mut lengths = [0u8; ALPHABET_SIZE];

    match present.as_slice() {
        [] => return lengths,
        [(symbol, _)] => {
            lengths[*symbol as usize] = 1;
            return lengths;
        }
        _ => {}
    }

    // Leaves are nodes 0..n, internal nodes are appended after them, so a
    // parent always has a higher index than its children.
    let n = present.len();
    let mut parent = vec![0usize; 2 * n - 1];
    let mut heap = BinaryHeap::with_capacity(n);
    for (index, &(symbol, weight)) in present.iter().enumerate() {
        heap.push(Reverse((weight, symbol, index)));
    }

    let mut next = n;
    while let Some(Reverse((w1, s1, a))) = heap.pop() {
        let Some(Reverse((w2, s2, b))) = heap.pop() else {
            break;
        };
        parent[a] = next;
        parent[b] = next;
        heap.push(Reverse((w1 + w2, s1.min(s2), next)));
        next += 1;
    }

    let root = 2 * n - 2;
    let mut depth = vec![0u32; 2 * n - 1];
    for index in (0..root).rev() {
        depth[index] = depth[parent[index]] + 1;
    }

    let mut leaves: Vec<(u32, u8)> = present
        .iter()
        .enumerate()
        .map(|(index, &(symbol, _))| (depth[index], symbol))
        .collect();

    let deepest = leaves.iter().map(|&(d, _)| d).max().unwrap_or(0);
    if deepest > u32::from(limit) {
        limit_lengths(&mut leaves, deepest as usize, limit as usize);
    }

    for (length, symbol) in leaves {
        lengths[symbol as usize] = length as u8;
    }
    lengths
}

/// Rebalance over-long codes so no length exceeds `limit`.
///
/// Works on the per-length counts (JPEG Annex K.3): two codes at the deepest
/// level are replaced by one a level up, and a shallower leaf is split to
/// absorb the displaced one. The Kraft sum stays exactly 1. Lengths are then
/// dealt back to symbols ordered by their original length and byte value.
fn limit_lengths(leaves: &mut [(u32, u8)], deepest: usize, limit: usize) {
    let mut bl_count = vec![0u32; deepest + 1];
    for &(length, _) in leaves.iter() {
        bl_count[length as usize] += 1;
    }

    for i in (limit + 1..=deepest).rev() {
        while bl_count[i] > 0 {
            let Some(j) = (1..=i - 2).rev().find(|&j| bl_count[j] > 0) else {
                // A complete code over at most 256 symbols always has a
                // shallower leaf once limit >= 8.
                debug_assert!(false, "no shallower leaf to split");
                break;
            };
            bl_count[i] -= 2;
            bl_count[i - 1] += 1;
            bl_count[j + 1] += 2;
            bl_count[j] -= 1;
        }
    }

    leaves.sort_unstable();
    let mut new_lengths =
        (1..=limit).flat_map(|len| std::iter::repeat_n(len as u32, bl_count[len] as usize));
    for leaf in leaves.iter_mut() {
        if let Some(length) = new_lengths.next() {
            leaf.0 = length;
        }
    }
}
