//! Terminal markdown rendering with syntax-highlighted code blocks.
//!
//! Bot replies are markdown. Prose goes through `termimad`; fenced code
//! blocks are highlighted with `syntect`.

use crossterm::style::Color;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;
use termimad::MadSkin;

const CODE_THEME: &str = "base16-ocean.dark";

/// A run of markdown: prose lines or one fenced code block.
#[derive(Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Prose(Vec<&'a str>),
    Code { lang: &'a str, lines: Vec<&'a str> },
}

/// Split markdown into prose and fenced code segments.
///
/// An unclosed fence runs to the end of the text.
pub fn split_fences(markdown: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut prose: Vec<&str> = Vec::new();
    let mut code: Option<(&str, Vec<&str>)> = None;

    for line in markdown.lines() {
        let fence = line.trim_start().strip_prefix("```");
        match (code.take(), fence) {
            (None, Some(lang)) => {
                if !prose.is_empty() {
                    segments.push(Segment::Prose(std::mem::take(&mut prose)));
                }
                code = Some((lang.trim(), Vec::new()));
            }
            (None, None) => prose.push(line),
            (Some((lang, lines)), Some(_)) => segments.push(Segment::Code { lang, lines }),
            (Some((lang, mut lines)), None) => {
                lines.push(line);
                code = Some((lang, lines));
            }
        }
    }

    if let Some((lang, lines)) = code {
        segments.push(Segment::Code { lang, lines });
    }
    if !prose.is_empty() {
        segments.push(Segment::Prose(prose));
    }
    segments
}

/// Terminal markdown renderer with syntax highlighting.
pub struct ChatRenderer {
    skin: MadSkin,
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl ChatRenderer {
    /// Create a renderer; `accent` tints headers and bold text.
    pub fn new(accent: Color) -> Self {
        let mut skin = MadSkin::default_dark();
        let tint = to_termimad_color(accent);
        skin.bold.set_fg(tint);
        skin.headers[0].set_fg(tint);
        skin.headers[1].set_fg(tint);
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);

        let theme = ThemeSet::load_defaults()
            .themes
            .remove(CODE_THEME)
            .unwrap_or_default();

        Self {
            skin,
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        }
    }

    /// Render a full markdown reply for the terminal.
    pub fn render(&self, markdown: &str) -> String {
        let mut output = String::new();
        for segment in split_fences(markdown) {
            match segment {
                Segment::Prose(lines) => {
                    let text = lines.join("\n");
                    output.push_str(&self.skin.term_text(&text).to_string());
                }
                Segment::Code { lang, lines } => {
                    output.push_str(&self.highlight(&lines, lang));
                }
            }
        }
        output
    }

    fn highlight(&self, lines: &[&str], lang: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        let mut highlighter = HighlightLines::new(syntax, &self.theme);

        let label = if lang.is_empty() { "code" } else { lang };
        let mut output = format!("  {}\n", console::style(format!("--- {label} ---")).dim());
        for line in lines {
            let ranges: Vec<(Style, &str)> = highlighter
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_default();
            let escaped = as_24_bit_terminal_escaped(&ranges[..], false);
            output.push_str(&format!("  {escaped}\x1b[0m\n"));
        }
        output
    }
}

fn to_termimad_color(color: Color) -> termimad::crossterm::style::Color {
    use termimad::crossterm::style::Color as T;
    match color {
        Color::Cyan => T::Cyan,
        Color::Green => T::Green,
        Color::Yellow => T::Yellow,
        Color::Magenta => T::Magenta,
        Color::Blue => T::Blue,
        Color::Red => T::Red,
        Color::Rgb { r, g, b } => T::Rgb { r, g, b },
        _ => T::Cyan,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_prose() {
        assert_eq!(
            split_fences("one\ntwo"),
            vec![Segment::Prose(vec!["one", "two"])]
        );
    }

    #[test]
    fn test_split_code_between_prose() {
        let md = "Try this:\n```rust\nfn main() {}\n```\nDone.";
        assert_eq!(
            split_fences(md),
            vec![
                Segment::Prose(vec!["Try this:"]),
                Segment::Code {
                    lang: "rust",
                    lines: vec!["fn main() {}"]
                },
                Segment::Prose(vec!["Done."]),
            ]
        );
    }

    #[test]
    fn test_split_unclosed_fence() {
        assert_eq!(
            split_fences("```\nlet x = 1;"),
            vec![Segment::Code {
                lang: "",
                lines: vec!["let x = 1;"]
            }]
        );
    }

    #[test]
    fn test_render_keeps_text() {
        let renderer = ChatRenderer::new(Color::Cyan);
        let out = renderer.render("Sorry, try again.\n```sh\necho hi\n```");
        assert!(out.contains("Sorry"));
        assert!(out.contains("--- sh ---"));
        assert!(out.contains("echo"));
    }
}
