//! Logical game keys and decoding of raw terminal bytes.
//!
//! The mapping is:
//!
//! | key            | bytes               |
//! |----------------|---------------------|
//! | move left      | `a`, `A`, `ESC [ D` |
//! | move right     | `d`, `D`, `ESC [ C` |
//! | rotate         | `w`, `W`, `ESC [ A` |
//! | soft drop      | `s`, `S`, `ESC [ B` |
//! | hard drop      | space               |
//! | pause          | `p`, `P`            |
//! | ghost toggle   | `g`, `G`            |
//! | quit           | `q`, `Q`            |
//! | restart        | `r`, `R`            |
//!
//! Any other byte decodes to [`Key::Other`].

const ESC: u8 = 0x1b;

/// A key press after translation from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Key {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
    HardDrop,
    Pause,
    ToggleGhost,
    Quit,
    Restart,
    /// A byte with no game meaning. Still counts as "any key".
    Other(u8),
}

impl Key {
    /// Translates a single plain byte.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        match byte.to_ascii_lowercase() {
            b'a' => Key::MoveLeft,
            b'd' => Key::MoveRight,
            b'w' => Key::Rotate,
            b's' => Key::SoftDrop,
            b' ' => Key::HardDrop,
            b'p' => Key::Pause,
            b'g' => Key::ToggleGhost,
            b'q' => Key::Quit,
            b'r' => Key::Restart,
            _ => Key::Other(byte),
        }
    }

    #[must_use]
    pub const fn from_arrow(arrow: Arrow) -> Self {
        match arrow {
            Arrow::Up => Key::Rotate,
            Arrow::Down => Key::SoftDrop,
            Arrow::Right => Key::MoveRight,
            Arrow::Left => Key::MoveLeft,
        }
    }
}

/// Arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    Up,
    Down,
    Right,
    Left,
}

impl Arrow {
    /// Parses the final byte of an `ESC [ x` sequence.
    #[must_use]
    pub const fn from_escape_final(byte: u8) -> Option<Self> {
        match byte {
            b'A' => Some(Arrow::Up),
            b'B' => Some(Arrow::Down),
            b'C' => Some(Arrow::Right),
            b'D' => Some(Arrow::Left),
            _ => None,
        }
    }
}

/// Stateless decoder from raw terminal input to [`Key`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyDecoder;

impl KeyDecoder {
    /// Decodes a buffer of raw bytes.
    ///
    /// An escape byte consumes up to two following bytes. `ESC [ A..D` yields
    /// the arrow's key; any other or truncated sequence yields `Other(0x1b)`.
    ///
    /// ```
    /// use termtris_engine::{Key, KeyDecoder};
    ///
    /// let keys = KeyDecoder::decode(b"a\x1b[Cq");
    /// assert_eq!(keys, [Key::MoveLeft, Key::MoveRight, Key::Quit]);
    /// ```
    #[must_use]
    pub fn decode(bytes: &[u8]) -> Vec<Key> {
        let mut keys = Vec::with_capacity(bytes.len());
        let mut rest = bytes;
        while let Some((&byte, tail)) = rest.split_first() {
            if byte != ESC {
                keys.push(Key::from_byte(byte));
                rest = tail;
                continue;
            }
            let consumed = tail.len().min(2);
            let key = match tail {
                [b'[', last, ..] => {
                    Arrow::from_escape_final(*last).map_or(Key::Other(ESC), Key::from_arrow)
                }
                _ => Key::Other(ESC),
            };
            keys.push(key);
            rest = &tail[consumed..];
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_in_either_case() {
        for (lower, key) in [
            (b'a', Key::MoveLeft),
            (b'd', Key::MoveRight),
            (b'w', Key::Rotate),
            (b's', Key::SoftDrop),
            (b'p', Key::Pause),
            (b'g', Key::ToggleGhost),
            (b'q', Key::Quit),
            (b'r', Key::Restart),
        ] {
            assert_eq!(Key::from_byte(lower), key);
            assert_eq!(Key::from_byte(lower.to_ascii_uppercase()), key);
        }
        assert_eq!(Key::from_byte(b' '), Key::HardDrop);
        assert_eq!(Key::from_byte(b'x'), Key::Other(b'x'));
        assert_eq!(Key::from_byte(b'X'), Key::Other(b'X'));
    }

    #[test]
    fn test_arrow_sequences() {
        assert_eq!(
            KeyDecoder::decode(b"\x1b[A\x1b[B\x1b[C\x1b[D"),
            [Key::Rotate, Key::SoftDrop, Key::MoveRight, Key::MoveLeft]
        );
    }

    #[test]
    fn test_unknown_escape_sequence() {
        assert_eq!(KeyDecoder::decode(b"\x1b[Zd"), [Key::Other(ESC), Key::MoveRight]);
        assert_eq!(KeyDecoder::decode(b"\x1bOAd"), [Key::Other(ESC), Key::MoveRight]);
    }

    #[test]
    fn test_truncated_escape_sequence() {
        assert_eq!(KeyDecoder::decode(b"\x1b"), [Key::Other(ESC)]);
        assert_eq!(KeyDecoder::decode(b"\x1b["), [Key::Other(ESC)]);
    }

    #[test]
    fn test_empty_input() {
        assert!(KeyDecoder::decode(b"").is_empty());
    }
}
