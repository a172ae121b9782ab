//! Fence-language classification for rendered notes.
//!
//! Maps a file extension to the label used on the opening code fence. When the
//! extension is unknown the editor-style content-type hint wins, then the raw
//! extension, then plain `text`.

use std::borrow::Cow;

/// Label used when neither the extension nor a hint says anything.
pub const FALLBACK_LANGUAGE: &str = "text";

/// Extension → fence label. Keys are lowercase and carry no leading dot.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("ts", "typescript"),
    ("py", "python"),
    ("cpp", "cpp"),
    ("c", "c"),
    ("cs", "csharp"),
    ("java", "java"),
    ("rb", "ruby"),
    ("go", "go"),
    ("rs", "rust"),
    ("php", "php"),
    ("swift", "swift"),
    ("kt", "kotlin"),
    ("scala", "scala"),
    ("r", "r"),
    ("jsx", "javascript"),
    ("tsx", "typescript"),
    ("vue", "vue"),
    ("html", "html"),
    ("css", "css"),
    ("scss", "scss"),
    ("sass", "sass"),
    ("less", "less"),
    ("json", "json"),
    ("xml", "xml"),
    ("yaml", "yaml"),
    ("yml", "yaml"),
    ("md", "markdown"),
    ("sql", "sql"),
    ("sh", "bash"),
    ("bash", "bash"),
    ("zsh", "bash"),
    ("fish", "bash"),
    ("ps1", "powershell"),
    ("dockerfile", "dockerfile"),
    ("makefile", "makefile"),
];

/// Look up an extension in [`LANGUAGES`]. Expects a lowercase extension.
pub fn lookup(extension: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, label)| *label)
}

/// Resolve the fence label for a file.
///
/// Order: table hit on the lowercased extension, then a non-empty `hint`
/// verbatim, then the lowercased extension itself, then [`FALLBACK_LANGUAGE`].
pub fn classify<'a>(extension: &str, hint: Option<&'a str>) -> Cow<'a, str> {
    let extension = extension.to_lowercase();

    if let Some(label) = lookup(&extension) {
        return Cow::Borrowed(label);
    }

    match hint {
        Some(hint) if !hint.is_empty() => Cow::Borrowed(hint),
        _ if !extension.is_empty() => Cow::Owned(extension),
        _ => Cow::Borrowed(FALLBACK_LANGUAGE),
    }
}
