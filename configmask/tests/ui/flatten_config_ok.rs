use configmask::{MaskedConfig, resolve_attributes};

#[derive(MaskedConfig)]
struct Base {
    #[field_doc(sensitive)]
    password: String,
}

#[derive(MaskedConfig)]
#[masked(rename_all = "kebab-case", skip_debug)]
struct Derived<B> {
    max_retries: u32,
    #[masked(flatten)]
    base: B,
}

impl<B> std::fmt::Debug for Derived<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Derived")
    }
}

fn main() {
    let _ = resolve_attributes::<Derived<Base>>();
}
