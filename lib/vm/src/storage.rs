//! Helpers for addressing and encoding storage words.
//!
//! Values declared by a contract occupy sequential slots starting at `0`.
//! Mappings follow the Solidity layout: the value for `key` in a mapping
//! declared at slot `p` lives at `keccak256(key . p)`.
use alloy_primitives::{keccak256, Address, B256, U256};

/// Returns the sequential slot `index`.
#[must_use]
pub const fn slot(index: u64) -> B256 {
    let bytes = index.to_be_bytes();
    let mut word = [0u8; 32];
    let mut i = 0;
    while i < bytes.len() {
        word[24 + i] = bytes[i];
        i += 1;
    }
    B256::new(word)
}

/// Slot of the value for a `string` or `bytes` key in a mapping at `base`.
#[must_use]
pub fn mapping_slot(key: &[u8], base: B256) -> B256 {
    keccak256([key, base.as_slice()].concat())
}

/// Slot of the value for an `address` key in a mapping at `base`.
#[must_use]
pub fn address_mapping_slot(key: Address, base: B256) -> B256 {
    mapping_slot(Word::into_word(key).as_slice(), base)
}

/// A primitive value that fits in a single storage word.
pub trait Word: Sized {
    /// Encodes the value as a left-padded word.
    fn into_word(self) -> B256;

    /// Decodes a value from a word. Words that were never written decode to
    /// the zero value.
    fn from_word(word: B256) -> Self;
}

impl Word for B256 {
    fn into_word(self) -> B256 {
        self
    }

    fn from_word(word: B256) -> Self {
        word
    }
}

impl Word for U256 {
    fn into_word(self) -> B256 {
        B256::from(self.to_be_bytes::<32>())
    }

    fn from_word(word: B256) -> Self {
        U256::from_be_bytes(word.0)
    }
}

impl Word for Address {
    fn into_word(self) -> B256 {
        B256::left_padding_from(self.as_slice())
    }

    fn from_word(word: B256) -> Self {
        Address::from_slice(&word[12..])
    }
}

impl Word for bool {
    fn into_word(self) -> B256 {
        U256::from(u8::from(self)).into_word()
    }

    fn from_word(word: B256) -> Self {
        !word.is_zero()
    }
}
