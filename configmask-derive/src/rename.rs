//! Case conversion for `#[masked(rename_all = "...")]`.
//!
//! Field identifiers are assumed to be `snake_case`, as Rust style requires.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RenameRule {
    Lower,
    Camel,
    Pascal,
    Snake,
    ScreamingSnake,
    Kebab,
}

pub(crate) const RENAME_RULES: &str = "\"lowercase\", \"camelCase\", \"PascalCase\", \
     \"snake_case\", \"SCREAMING_SNAKE_CASE\" or \"kebab-case\"";

impl RenameRule {
    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value {
            "lowercase" => Some(Self::Lower),
            "camelCase" => Some(Self::Camel),
            "PascalCase" => Some(Self::Pascal),
            "snake_case" => Some(Self::Snake),
            "SCREAMING_SNAKE_CASE" => Some(Self::ScreamingSnake),
            "kebab-case" => Some(Self::Kebab),
            _ => None,
        }
    }

    pub(crate) fn apply(self, field: &str) -> String {
        match self {
            Self::Lower => field.to_ascii_lowercase(),
            Self::Snake => field.to_owned(),
            Self::ScreamingSnake => field.to_ascii_uppercase(),
            Self::Kebab => field.replace('_', "-"),
            Self::Pascal => pascal_case(field),
            Self::Camel => {
                let pascal = pascal_case(field);
                let mut chars = pascal.chars();
                match chars.next() {
                    Some(first) => first.to_lowercase().chain(chars).collect(),
                    None => pascal,
                }
            }
        }
    }
}

fn pascal_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut capitalize = true;
    for ch in field.chars() {
        if ch == '_' {
            capitalize = true;
        } else if capitalize {
            out.extend(ch.to_uppercase());
            capitalize = false;
        } else {
            out.push(ch);
        }
    }
    out
}
