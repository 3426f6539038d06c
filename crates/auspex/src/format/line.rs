//! Single-line tokenizing.

/// A key/value pair found on one physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    /// Key text, trimmed.
    pub key: &'a str,
    /// Value text, trimmed, with any trailing continuation backslashes removed.
    pub value: &'a str,
    /// The value ended in a backslash and continues on the next line.
    pub continued: bool,
}

/// Sections recognized in style files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Metadata,
    PlanetMeanings,
    SignDescriptions,
    HouseAreas,
    Combinations,
    Aspects,
    AspectCombinations,
    Templates,
}

impl Section {
    const ALL: [Section; 8] = [
        Section::Metadata,
        Section::PlanetMeanings,
        Section::SignDescriptions,
        Section::HouseAreas,
        Section::Combinations,
        Section::Aspects,
        Section::AspectCombinations,
        Section::Templates,
    ];

    /// Looks up a section by its header name, ignoring ASCII case.
    ///
    /// Returns `None` for unrecognized sections.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|section| section.name().eq_ignore_ascii_case(name))
    }

    /// The header name, as written between brackets.
    pub fn name(self) -> &'static str {
        match self {
            Section::Metadata => "metadata",
            Section::PlanetMeanings => "planet_meanings",
            Section::SignDescriptions => "sign_descriptions",
            Section::HouseAreas => "house_areas",
            Section::Combinations => "combinations",
            Section::Aspects => "aspects",
            Section::AspectCombinations => "aspect_combinations",
            Section::Templates => "templates",
        }
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find(['#', ';']) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Returns the name inside a `[section]` header line.
///
/// The name is the trimmed text between `[` and the first `]` (or the end of
/// the line when the bracket is never closed).
///
/// ```rust
/// use auspex::format::section_header;
///
/// assert_eq!(section_header("  [Combinations] # main"), Some("Combinations"));
/// assert_eq!(section_header("sun: bright"), None);
/// ```
pub fn section_header(line: &str) -> Option<&str> {
    let rest = strip_comment(line).trim().strip_prefix('[')?;
    let name = match rest.find(']') {
        Some(end) => &rest[..end],
        None => rest,
    };
    Some(name.trim())
}

/// Tokenizes one physical line into a key/value [`Entry`].
///
/// Returns `None` ("no content") for blank lines, comment-only lines, section
/// headers, lines without a `:` separator and lines whose value is empty. A
/// value made only of a continuation backslash is not empty: the entry comes
/// back with an empty `value` and `continued` set.
///
/// ```rust
/// use auspex::format::parse_line;
///
/// let entry = parse_line("Sun+Aries+1: Bold start \\").unwrap();
/// assert_eq!(entry.key, "Sun+Aries+1");
/// assert_eq!(entry.value, "Bold start");
/// assert!(entry.continued);
///
/// assert!(parse_line("; just a comment").is_none());
/// assert!(parse_line("[metadata]").is_none());
/// ```
pub fn parse_line(line: &str) -> Option<Entry<'_>> {
    let content = strip_comment(line).trim_start();
    if content.is_empty() || content.starts_with('[') {
        return None;
    }

    let (key, value) = content.split_once(':')?;
    let key = key.trim();
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let stripped = value.trim_end_matches(|c: char| c == '\\' || c.is_whitespace());
    let continued = stripped.len() != value.len();

    Some(Entry {
        key,
        value: stripped,
        continued,
    })
}
