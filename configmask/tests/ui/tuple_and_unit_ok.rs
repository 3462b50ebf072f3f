use configmask::{MaskedConfig, mask};

#[derive(MaskedConfig)]
struct Token(#[field_doc(sensitive)] String);

#[derive(MaskedConfig)]
struct Empty {}

#[derive(MaskedConfig)]
struct Unit;

fn main() {
    let _ = mask(&Token("t".into()));
    let _ = mask(&Empty {});
    let _ = mask(&Unit);
}
