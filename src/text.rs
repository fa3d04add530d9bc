//! Turning a string into something a row of 7 segment digits can show.
//!
//! Dots are folded into the digit before them, `?` borrows the previous digit's dot as well,
//! and letters that need more than one digit of width (`m`, `w`, `M`, `W`) are spread over
//! two digits.

use heapless::Vec;

use crate::font::{DOUBLE_M_LEFT, DOUBLE_M_RIGHT, DOUBLE_W_LEFT, DOUBLE_W_RIGHT};

/// A character code together with the state of the dot that follows it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecoratedChar {
    pub code: u8,
    pub dot: bool,
}

impl DecoratedChar {
    pub const fn new(code: u8, dot: bool) -> Self {
        DecoratedChar { code, dot }
    }

    pub const fn plain(code: u8) -> Self {
        DecoratedChar { code, dot: false }
    }
}

/// A preprocessed message holding at most `N` digits
pub type DecoratedText<const N: usize> = Vec<DecoratedChar, N>;

/// Prepare `text` for display. Output beyond `N` digits is dropped silently.
pub fn preprocess<const N: usize>(text: &str) -> DecoratedText<N> {
    let mut out = DecoratedText::<N>::new();
    let mut previous: Option<u8> = None;

    for byte in text.bytes() {
        if out.is_full() {
            break;
        }

        // at least two free slots are needed to widen a letter
        let room_for_two = out.capacity() - out.len() >= 2;

        match (byte, previous) {
            (b'.', Some(b'.')) => push(&mut out, DecoratedChar::new(b'.', true)),
            (b'.', Some(_)) => mark_dot(&mut out),
            (b'?', Some(_)) => {
                mark_dot(&mut out);
                push(&mut out, DecoratedChar::plain(b'?'));
            }
            (b'm', _) | (b'w', _) if room_for_two => {
                push(&mut out, DecoratedChar::plain(byte));
                push(&mut out, DecoratedChar::plain(byte));
            }
            (b'W', _) if room_for_two => {
                push(&mut out, DecoratedChar::plain(DOUBLE_W_LEFT));
                push(&mut out, DecoratedChar::plain(DOUBLE_W_RIGHT));
            }
            (b'M', _) if room_for_two => {
                push(&mut out, DecoratedChar::plain(DOUBLE_M_LEFT));
                push(&mut out, DecoratedChar::plain(DOUBLE_M_RIGHT));
            }
            _ => push(&mut out, DecoratedChar::plain(byte)),
        }

        previous = Some(byte);
    }

    out
}

fn push<const N: usize>(out: &mut DecoratedText<N>, ch: DecoratedChar) {
    // capacity is checked by the caller, a full buffer just truncates
    let _ = out.push(ch);
}

fn mark_dot<const N: usize>(out: &mut DecoratedText<N>) {
    if let Some(last) = out.last_mut() {
        last.dot = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs<const N: usize>(text: &DecoratedText<N>) -> std::vec::Vec<(u8, bool)> {
        text.iter().map(|c| (c.code, c.dot)).collect()
    }

    #[test]
    fn dot_attaches_to_previous_digit() {
        let out = preprocess::<16>("12.3");
        assert_eq!(pairs(&out), [(b'1', false), (b'2', true), (b'3', false)]);
    }

    #[test]
    fn consecutive_dots_become_their_own_digits() {
        let out = preprocess::<16>("1..2");
        assert_eq!(pairs(&out), [(b'1', true), (b'.', true), (b'2', false)]);
    }

    #[test]
    fn ellipsis_after_text() {
        let out = preprocess::<16>("a...");
        assert_eq!(pairs(&out), [(b'a', true), (b'.', true), (b'.', true)]);
    }

    #[test]
    fn wide_letters_take_two_digits() {
        let out = preprocess::<16>("Mw");
        assert_eq!(
            pairs(&out),
            [
                (DOUBLE_M_LEFT, false),
                (DOUBLE_M_RIGHT, false),
                (b'w', false),
                (b'w', false)
            ]
        );
    }

    #[test]
    fn upper_case_w_uses_its_own_halves() {
        let out = preprocess::<16>("W");
        assert_eq!(pairs(&out), [(DOUBLE_W_LEFT, false), (DOUBLE_W_RIGHT, false)]);
    }

    #[test]
    fn question_mark_lights_previous_dot_and_is_kept() {
        let out = preprocess::<16>("ok?");
        assert_eq!(pairs(&out), [(b'o', false), (b'k', true), (b'?', false)]);
    }

    #[test]
    fn leading_dot_and_question_mark_are_copied_through() {
        assert_eq!(pairs(&preprocess::<4>(".5")), [(b'.', false), (b'5', false)]);
        assert_eq!(pairs(&preprocess::<4>("?")), [(b'?', false)]);
    }

    #[test]
    fn output_is_truncated_at_capacity() {
        let out = preprocess::<3>("12345");
        assert_eq!(pairs(&out), [(b'1', false), (b'2', false), (b'3', false)]);
    }

    #[test]
    fn dot_after_truncation_point_is_ignored() {
        let out = preprocess::<2>("12.");
        assert_eq!(pairs(&out), [(b'1', false), (b'2', false)]);
    }

    #[test]
    fn wide_letter_in_last_slot_is_copied_once() {
        let out = preprocess::<3>("abm");
        assert_eq!(pairs(&out), [(b'a', false), (b'b', false), (b'm', false)]);

        let out = preprocess::<2>("aM");
        assert_eq!(pairs(&out), [(b'a', false), (b'M', false)]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(preprocess::<8>("").is_empty());
    }
}
