//! Ordered command dispatch table.
//!
//! Each rule pairs a `!prefix` regex with the [`Style`] its renderer uses.
//! The body is everything after the first whitespace, newlines included, and
//! every matching rule fires, so one message can yield several images.

use std::sync::LazyLock;

use regex::Regex;

use crate::render::style::{
    Anchor, Canvas, Flow, FontChoice, Ink, LINE_ADVANCE, SpriteKey, Style,
};

static RE_IMAGE: LazyLock<Regex> = LazyLock::new(|| compile(r"(?s)^!image\s(.*)"));
static RE_IMAGE_P: LazyLock<Regex> = LazyLock::new(|| compile(r"(?s)^!image_p\s(.*)"));
static RE_KOMEI: LazyLock<Regex> = LazyLock::new(|| compile(r"(?s)^!komei\s(.*)"));
static RE_YUNO: LazyLock<Regex> = LazyLock::new(|| compile(r"(?s)^!yuno\s(.*)"));
static RE_DERIS: LazyLock<Regex> = LazyLock::new(|| compile(r"(?s)^!(?:d(?:eris)?|redis)\s(.*)"));
static RE_GOLGO: LazyLock<Regex> = LazyLock::new(|| compile(r"(?s)^!golgo\s(.*)"));
static RE_SEIKAI: LazyLock<Regex> = LazyLock::new(|| compile(r"(?s)^!seikai\s(.*)"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("hard-coded command regex")
}

/// One entry of the dispatch table.
#[derive(Debug, Clone)]
pub struct CommandRule {
    pub name: &'static str,
    pattern: Regex,
    /// Swap the katakana prolonged sound mark for a vertical bar before
    /// rendering; it reads wrong on the sprite canvases otherwise.
    pub swap_prolonged_mark: bool,
    pub style: Style,
}

/// A matched rule plus the prepared text lines.
#[derive(Debug)]
pub struct CommandMatch<'a> {
    pub rule: &'a CommandRule,
    pub lines: Vec<String>,
}

/// Run a message text against the rules, in table order.
pub fn matches<'a>(rules: &'a [CommandRule], text: &str) -> Vec<CommandMatch<'a>> {
    rules
        .iter()
        .filter_map(|rule| {
            let caps = rule.pattern.captures(text)?;
            let body = caps.get(1)?.as_str();
            let body = if rule.swap_prolonged_mark {
                body.replace('ー', "｜")
            } else {
                body.to_string()
            };
            Some(CommandMatch {
                rule,
                lines: body.split('\n').map(str::to_string).collect(),
            })
        })
        .collect()
}

/// The full dispatch table, in match order.
pub fn command_table() -> Vec<CommandRule> {
    vec![
        CommandRule {
            name: "image",
            pattern: RE_IMAGE.clone(),
            swap_prolonged_mark: false,
            style: Style {
                font: FontChoice::Regular,
                font_size: 21.0,
                ink: Ink::Black,
                flow: Flow::Horizontal,
                canvas: Canvas::FitText,
                anchor: Anchor::TopLeft { x: 10.0, y: 31.0 },
                advance: LINE_ADVANCE,
            },
        },
        CommandRule {
            name: "image_p",
            pattern: RE_IMAGE_P.clone(),
            swap_prolonged_mark: false,
            style: Style {
                font: FontChoice::Proportional,
                font_size: 21.0,
                ink: Ink::Black,
                flow: Flow::Horizontal,
                canvas: Canvas::FitText,
                anchor: Anchor::TopLeft { x: 10.0, y: 31.0 },
                advance: LINE_ADVANCE,
            },
        },
        CommandRule {
            name: "komei",
            pattern: RE_KOMEI.clone(),
            swap_prolonged_mark: true,
            style: Style {
                font: FontChoice::Regular,
                font_size: 18.0,
                ink: Ink::Black,
                flow: Flow::Vertical,
                canvas: Canvas::Sprite(SpriteKey::Komei),
                anchor: Anchor::TopRight {
                    inset: 25.0,
                    y: 20.0,
                },
                advance: LINE_ADVANCE,
            },
        },
        CommandRule {
            name: "yuno",
            pattern: RE_YUNO.clone(),
            swap_prolonged_mark: true,
            style: Style {
                font: FontChoice::Regular,
                font_size: 22.0,
                ink: Ink::White,
                flow: Flow::Horizontal,
                canvas: Canvas::Sprite(SpriteKey::Yuno),
                anchor: Anchor::TopLeft { x: 25.0, y: 46.0 },
                advance: 39.6,
            },
        },
        CommandRule {
            name: "deris",
            pattern: RE_DERIS.clone(),
            swap_prolonged_mark: true,
            style: Style {
                font: FontChoice::Regular,
                font_size: 21.0,
                ink: Ink::Black,
                flow: Flow::Horizontal,
                canvas: Canvas::Bubble(SpriteKey::Deris),
                anchor: Anchor::TopLeft { x: 70.0, y: 56.0 },
                advance: LINE_ADVANCE,
            },
        },
        CommandRule {
            name: "golgo",
            pattern: RE_GOLGO.clone(),
            swap_prolonged_mark: true,
            style: Style {
                font: FontChoice::Regular,
                font_size: 18.0,
                ink: Ink::Black,
                flow: Flow::Vertical,
                canvas: Canvas::Sprite(SpriteKey::Golgo),
                anchor: Anchor::TopRight {
                    inset: 25.0,
                    y: 25.0,
                },
                advance: LINE_ADVANCE,
            },
        },
        CommandRule {
            name: "seikai",
            pattern: RE_SEIKAI.clone(),
            swap_prolonged_mark: true,
            style: Style {
                font: FontChoice::Regular,
                font_size: 18.0,
                ink: Ink::Black,
                flow: Flow::Horizontal,
                canvas: Canvas::Sprite(SpriteKey::Seikai),
                anchor: Anchor::BottomLeft {
                    x: 50.0,
                    inset: 30.0,
                },
                advance: LINE_ADVANCE,
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_match<'a>(rules: &'a [CommandRule], text: &str) -> CommandMatch<'a> {
        let mut found = matches(rules, text);
        assert_eq!(found.len(), 1, "expected exactly one match for {text:?}");
        found.remove(0)
    }

    #[test]
    fn image_prefix_selects_plain_renderer() {
        let rules = command_table();
        let m = single_match(&rules, "!image hello world");
        assert_eq!(m.rule.name, "image");
        assert_eq!(m.lines, vec!["hello world"]);
    }

    #[test]
    fn image_p_does_not_also_match_image() {
        let rules = command_table();
        let m = single_match(&rules, "!image_p proportional");
        assert_eq!(m.rule.name, "image_p");
    }

    #[test]
    fn body_keeps_newlines_as_lines() {
        let rules = command_table();
        let m = single_match(&rules, "!image line one\nline two\nline three");
        assert_eq!(m.lines, vec!["line one", "line two", "line three"]);
    }

    #[test]
    fn newline_counts_as_the_separator_whitespace() {
        let rules = command_table();
        let m = single_match(&rules, "!image\nfirst\nsecond");
        assert_eq!(m.lines, vec!["first", "second"]);
    }

    #[test]
    fn unmatched_text_selects_nothing() {
        let rules = command_table();
        assert!(matches(&rules, "just chatting").is_empty());
        assert!(matches(&rules, "!imagery nope").is_empty());
        assert!(matches(&rules, "!image").is_empty());
        assert!(matches(&rules, "say !image mid-message").is_empty());
    }

    #[test]
    fn deris_aliases_all_match() {
        let rules = command_table();
        for text in ["!d hi", "!deris hi", "!redis hi"] {
            assert_eq!(single_match(&rules, text).rule.name, "deris");
        }
        assert!(matches(&rules, "!de hi").is_empty());
    }

    #[test]
    fn each_sprite_command_selects_its_rule() {
        let rules = command_table();
        for (text, name) in [
            ("!komei 天下三分", "komei"),
            ("!yuno X", "yuno"),
            ("!golgo ……", "golgo"),
            ("!seikai 正解", "seikai"),
        ] {
            assert_eq!(single_match(&rules, text).rule.name, name);
        }
    }

    #[test]
    fn prolonged_mark_swapped_only_on_sprite_commands() {
        let rules = command_table();
        let m = single_match(&rules, "!komei コーヒー");
        assert_eq!(m.lines, vec!["コ｜ヒ｜"]);

        let m = single_match(&rules, "!image コーヒー");
        assert_eq!(m.lines, vec!["コーヒー"]);
    }

    #[test]
    fn every_matching_rule_fires() {
        // No two table patterns overlap, so duplicate one to force overlap.
        let table = command_table();
        let rules = vec![table[0].clone(), table[0].clone()];

        let found = matches(&rules, "!image twice");
        assert_eq!(found.len(), 2);
        for m in &found {
            assert_eq!(m.rule.name, "image");
            assert_eq!(m.lines, vec!["twice"]);
        }
    }

    #[test]
    fn table_order_is_stable() {
        let names: Vec<&str> = command_table().iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec!["image", "image_p", "komei", "yuno", "deris", "golgo", "seikai"]
        );
    }
}
