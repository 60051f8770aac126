use log::debug;

/// The section a line belongs to while walking a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    /// Before any header, lines here are dropped
    #[default]
    None,
    Ingredients,
    Instructions,
}

impl Section {
    /// The section a header line switches to, if `line` is a header.
    ///
    /// Headers match regardless of ASCII case, so `INGREDIENTS:` and
    /// `ingredients:` are the same header.
    pub fn from_header(line: &str) -> Option<Section> {
        if line.eq_ignore_ascii_case("ingredients:") {
            Some(Section::Ingredients)
        } else if line.eq_ignore_ascii_case("instructions:") {
            Some(Section::Instructions)
        } else {
            None
        }
    }

    /// State after reading `line`; header lines are the only transitions
    pub fn next(self, line: &str) -> Section {
        Section::from_header(line).unwrap_or(self)
    }
}

/// Fields pulled out of one recipe block, before normalization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedFields {
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

/// Classify the lines of one trimmed block.
///
/// Line 0 is always the name, even when it reads like a header.
pub fn extract(block: &str) -> ExtractedFields {
    let mut lines = block.split('\n');
    let mut fields = ExtractedFields {
        name: lines.next().unwrap_or_default().to_string(),
        ..Default::default()
    };

    let mut section = Section::None;
    for line in lines.map(str::trim) {
        if Section::from_header(line).is_some() {
            section = section.next(line);
            continue;
        }
        if line.is_empty() {
            continue;
        }

        match section {
            Section::Ingredients => fields.ingredients.push(line.to_string()),
            Section::Instructions => fields.instructions.push(line.to_string()),
            Section::None => debug!("Dropping line before any section header: {}", line),
        }
    }

    fields
}
