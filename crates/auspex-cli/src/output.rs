//! Terminal and JSON presentation.

use std::borrow::Cow;
use std::path::Path;

use auspex::Folder;
use clap::ValueEnum;
use console::Style;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputMode {
    /// Styled when stdout is a terminal
    #[default]
    Auto,
    /// Always styled
    Term,
    /// Plain text
    Text,
    /// JSON
    Json,
}

impl OutputMode {
    pub fn is_json(self) -> bool {
        self == OutputMode::Json
    }

    fn use_color(self) -> bool {
        match self {
            OutputMode::Auto => console::colors_enabled(),
            OutputMode::Term => true,
            OutputMode::Text | OutputMode::Json => false,
        }
    }
}

/// Styles for listing output, resolved once per mode.
pub struct Palette {
    marker: Style,
    name: Style,
    dim: Style,
}

impl Palette {
    pub fn for_mode(mode: OutputMode) -> Self {
        let color = mode.use_color();
        Self {
            marker: Style::new().green().bold().force_styling(color),
            name: Style::new().bold().force_styling(color),
            dim: Style::new().dim().force_styling(color),
        }
    }

    pub fn dim(&self, text: &str) -> String {
        self.dim.apply_to(text).to_string()
    }
}

const DESCRIPTION_INDENT: &str = "     ";

/// The style listing, one folder per line with its description beneath.
///
/// `width` bounds the description line when known.
pub fn render_listing(
    folders: &[Folder],
    styles_dir: &Path,
    palette: &Palette,
    width: Option<usize>,
) -> String {
    let mut out = String::from("Available Interpretation Styles:\n");

    if folders.is_empty() {
        out.push_str(&format!(
            "  No style folders found in {}/\n",
            styles_dir.display()
        ));
        return out;
    }

    for folder in folders {
        if folder.active {
            out.push_str(&format!(" {} ", palette.marker.apply_to("*")));
        } else {
            out.push_str("   ");
        }
        out.push_str(&palette.name.apply_to(&folder.name).to_string());

        if folder.display_name != folder.name {
            out.push_str(&format!(" ({})", folder.display_name));
        }
        if let Some(byline) = byline(folder) {
            out.push_str(" - ");
            out.push_str(&byline);
        }
        out.push('\n');

        if let Some(description) = &folder.description {
            let description = match width {
                Some(width) => clip_after_indent(DESCRIPTION_INDENT, description, width),
                None => Cow::Borrowed(description.as_str()),
            };
            out.push_str(DESCRIPTION_INDENT);
            out.push_str(&palette.dim(&description));
            out.push('\n');
        }
    }

    out.push('\n');
    out.push_str("Use --style <name> to query a style, or --file <path> for a single style file.\n");
    out
}

/// `author vX`, either half optional.
fn byline(folder: &Folder) -> Option<String> {
    match (&folder.author, &folder.version) {
        (None, None) => None,
        (Some(author), None) => Some(author.clone()),
        (None, Some(version)) => Some(format!("v{version}")),
        (Some(author), Some(version)) => Some(format!("{author} v{version}")),
    }
}

/// Cuts `text` so that, printed after `indent`, the line fits in `width`
/// columns. A cut line ends in `…`.
fn clip_after_indent<'a>(indent: &str, text: &'a str, width: usize) -> Cow<'a, str> {
    let room = width.saturating_sub(indent.width());
    if text.width() <= room {
        return Cow::Borrowed(text);
    }

    let budget = room.saturating_sub(1);
    let mut used = 0;
    let end = text
        .char_indices()
        .find_map(|(i, c)| {
            used += c.width().unwrap_or(0);
            (used > budget).then_some(i)
        })
        .unwrap_or(text.len());
    Cow::Owned(format!("{}…", &text[..end]))
}

/// Terminal width of stdout, if it is a terminal.
pub fn terminal_width() -> Option<usize> {
    terminal_size::terminal_size().map(|(terminal_size::Width(w), _)| usize::from(w))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(name: &str) -> Folder {
        Folder::new(name, Path::new("/styles").join(name))
    }

    fn plain() -> Palette {
        Palette::for_mode(OutputMode::Text)
    }

    // =========================================================================
    // Listing
    // =========================================================================

    #[test]
    fn test_listing_empty() {
        let out = render_listing(&[], Path::new("/home/a/.astrolog/interpretations/styles"), &plain(), None);
        assert_eq!(
            out,
            "Available Interpretation Styles:\n  No style folders found in /home/a/.astrolog/interpretations/styles/\n"
        );
    }

    #[test]
    fn test_listing_lines() {
        let mut modern = folder("modern");
        modern.display_name = "Modern".into();
        modern.author = Some("Jane".into());
        modern.version = Some("2.0".into());
        modern.description = Some("Psychological readings".into());
        modern.active = true;

        let mut classic = folder("classic");
        classic.version = Some("1".into());

        let out = render_listing(&[classic, modern], Path::new("/styles"), &plain(), None);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "   classic - v1");
        assert_eq!(lines[2], " * modern (Modern) - Jane v2.0");
        assert_eq!(lines[3], "     Psychological readings");
        assert_eq!(lines[4], "");
    }

    #[test]
    fn test_listing_truncates_description() {
        let mut long = folder("long");
        long.description = Some("a description that runs on".into());
        let out = render_listing(&[long], Path::new("/styles"), &plain(), Some(15));
        assert!(out.contains("\n     a descrip…\n"));
    }

    // =========================================================================
    // Clipping
    // =========================================================================

    #[test]
    fn test_clip_counts_indent() {
        assert_eq!(clip_after_indent("     ", "Solar themes", 17), "Solar themes");
        assert_eq!(clip_after_indent("     ", "Solar themes", 12), "Solar …");
        assert_eq!(clip_after_indent("", "Solar themes", 12), "Solar themes");
    }

    #[test]
    fn test_clip_narrower_than_indent() {
        assert_eq!(clip_after_indent("     ", "Solar", 3), "…");
    }

    #[test]
    fn test_clip_wide_chars() {
        assert_eq!(clip_after_indent("  ", "日本語テキスト", 7), "日本…");
    }
}
