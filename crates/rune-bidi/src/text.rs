//! Code point decoding for the supported input encodings.
//!
//! All positions handed to and returned from the bidi facades are code
//! units of the original buffer: bytes for UTF-8 and Latin-1, `u16` units
//! for UTF-16. The resolver itself works per code point.

/// Input encoding of a text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Utf16,
    Latin1,
}

/// A text buffer decoded into code points with code-unit offsets.
#[derive(Debug, Clone)]
pub(crate) struct DecodedText {
    pub encoding: Encoding,
    pub chars: Vec<char>,
    /// Start offset of each char, followed by the total length in code units.
    pub offsets: Vec<usize>,
}

impl DecodedText {
    pub fn utf8(text: &str) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut offsets = Vec::with_capacity(text.len() + 1);
        for (offset, ch) in text.char_indices() {
            chars.push(ch);
            offsets.push(offset);
        }
        offsets.push(text.len());
        Self {
            encoding: Encoding::Utf8,
            chars,
            offsets,
        }
    }

    /// Unpaired surrogates decode to U+FFFD and keep their single unit.
    pub fn utf16(text: &[u16]) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut offsets = Vec::with_capacity(text.len() + 1);
        let mut offset = 0;
        for decoded in char::decode_utf16(text.iter().copied()) {
            let (ch, len) = match decoded {
                Ok(ch) => (ch, ch.len_utf16()),
                Err(_) => (char::REPLACEMENT_CHARACTER, 1),
            };
            chars.push(ch);
            offsets.push(offset);
            offset += len;
        }
        offsets.push(offset);
        Self {
            encoding: Encoding::Utf16,
            chars,
            offsets,
        }
    }

    pub fn latin1(text: &[u8]) -> Self {
        Self {
            encoding: Encoding::Latin1,
            chars: text.iter().map(|&b| char::from(b)).collect(),
            offsets: (0..=text.len()).collect(),
        }
    }

    /// Length of the buffer in code units.
    pub fn len_units(&self) -> usize {
        self.offsets.last().copied().unwrap_or(0)
    }

    /// Index of the char starting at code unit `offset`, if `offset` is a
    /// character boundary. `len_units()` maps to `chars.len()`.
    pub fn char_index(&self, offset: usize) -> Option<usize> {
        self.offsets.binary_search(&offset).ok()
    }
}
