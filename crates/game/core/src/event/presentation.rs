/// Builds the display name. Units prepend or append to `text` by priority.
#[derive(Debug, Default)]
pub struct GetScreenName {
    pub text: String,
}

/// Collects human-readable stat lines.
#[derive(Debug, Default)]
pub struct GetStatList {
    pub stats: Vec<String>,
}

#[derive(Debug, Default)]
pub struct SetGlyph {
    pub glyph: char,
}
