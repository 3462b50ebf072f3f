use std::marker::PhantomData;

use configmask::{MaskedConfig, text::to_masked_string};
use serde::Serialize;

struct NotSerializable;

#[derive(MaskedConfig, Serialize)]
struct Typed<K, M> {
    #[field_doc(sensitive)]
    key: Option<K>,
    name: String,
    #[serde(skip)]
    _marker: PhantomData<M>,
}

fn main() {
    let config: Typed<String, NotSerializable> = Typed {
        key: Some("k".into()),
        name: "n".into(),
        _marker: PhantomData,
    };
    let _ = to_masked_string(&config);
}
