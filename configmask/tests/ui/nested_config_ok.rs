use std::{cell::RefCell, rc::Rc, sync::Arc};

use configmask::{MaskedConfig, mask};

#[derive(MaskedConfig)]
struct Tls {
    #[field_doc(sensitive, help = "Keystore password")]
    keystore_password: String,
}

#[derive(MaskedConfig)]
struct Client<N> {
    #[masked(nested)]
    tls: Option<Arc<Tls>>,
    #[masked(nested)]
    extra: Vec<N>,
    #[masked(nested, rename = "self")]
    this: Option<Rc<RefCell<Client<N>>>>,
}

fn main() {
    let client: Client<Tls> = Client {
        tls: None,
        extra: Vec::new(),
        this: None,
    };
    let _ = mask(&client);
}
