//! Display-width measurement for chat text.
//!
//! The renderers lay text out on a fixed-pitch grid where East Asian wide and
//! fullwidth characters occupy two cells and everything else occupies one.
//! Canvas sizing multiplies these cell counts by the per-cell pixel advance,
//! so the ranges here directly decide how wide a generated image gets.

/// Display width of a single character in cells (1 or 2).
///
/// Wide ranges cover hangul jamo, CJK ideographs and radicals, hangul
/// syllables, compatibility ideographs, fullwidth forms and the
/// supplementary ideographic planes.
pub fn rune_width(c: char) -> usize {
    let r = c as u32;
    if r >= 0x1100
        && (r <= 0x115f
            || r == 0x2329
            || r == 0x232a
            || ((0x2e80..=0xa4cf).contains(&r) && r != 0x303f)
            || (0xac00..=0xd7a3).contains(&r)
            || (0xf900..=0xfaff).contains(&r)
            || (0xfe30..=0xfe6f).contains(&r)
            || (0xff00..=0xff60).contains(&r)
            || (0xffe0..=0xffe6).contains(&r)
            || (0x20000..=0x2fffd).contains(&r)
            || (0x30000..=0x3fffd).contains(&r))
    {
        2
    } else {
        1
    }
}

/// Display width of a string in cells.
pub fn str_width(s: &str) -> usize {
    s.chars().map(rune_width).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_single_width() {
        assert_eq!(str_width("hello"), 5);
        assert_eq!(str_width("The quick brown fox!"), 20);
    }

    #[test]
    fn cjk_is_double_width() {
        assert_eq!(str_width("こんにちは"), 10);
        assert_eq!(str_width("漢字"), 4);
        assert_eq!(str_width("안녕하세요"), 10);
    }

    #[test]
    fn mixed_text_sums_per_char() {
        // 3 ASCII + 2 wide
        assert_eq!(str_width("ab cあ"), 6);
    }

    #[test]
    fn empty_string_has_zero_width() {
        assert_eq!(str_width(""), 0);
    }

    #[test]
    fn range_boundaries() {
        assert_eq!(rune_width('\u{10FF}'), 1);
        assert_eq!(rune_width('\u{1100}'), 2);
        assert_eq!(rune_width('\u{115F}'), 2);
        assert_eq!(rune_width('\u{2329}'), 2);
        assert_eq!(rune_width('\u{232B}'), 1);
        // The ideographic half-fill space is the one narrow gap in the CJK block
        assert_eq!(rune_width('\u{303F}'), 1);
        assert_eq!(rune_width('\u{FF60}'), 2);
        assert_eq!(rune_width('\u{FF61}'), 1);
        assert_eq!(rune_width('\u{20000}'), 2);
        assert_eq!(rune_width('\u{2FFFE}'), 1);
    }

    #[test]
    fn fullwidth_forms_are_wide() {
        assert_eq!(str_width("ＡＢＣ"), 6);
        assert_eq!(str_width("！？"), 4);
    }
}
