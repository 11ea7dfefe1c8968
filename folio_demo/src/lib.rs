use std::sync::LazyLock;

use folio_models::contact::{ContactFormFields, ContactSubmission};

pub static JANE_FIELDS: LazyLock<ContactFormFields> = LazyLock::new(|| ContactFormFields {
    name: "Jane Doe".into(),
    email: "jane@example.com".into(),
    message: "Hello there".into(),
});

pub static JANE: LazyLock<ContactSubmission> = LazyLock::new(|| ContactSubmission {
    name: "Jane Doe".try_into().unwrap(),
    email: "jane@example.com".try_into().unwrap(),
    message: "Hello there".try_into().unwrap(),
});

/// Same as [`JANE_FIELDS`], surrounded by the whitespace of a sloppy visitor.
pub static JANE_PADDED_FIELDS: LazyLock<ContactFormFields> =
    LazyLock::new(|| ContactFormFields {
        name: "  Jane Doe ".into(),
        email: " jane@example.com\n".into(),
        message: "\tHello there  ".into(),
    });

pub static MAX_FIELDS: LazyLock<ContactFormFields> = LazyLock::new(|| ContactFormFields {
    name: "Max Mustermann".into(),
    email: "max.mustermann@example.de".into(),
    message: "Hallo Welt! Ich hätte Interesse an einer Zusammenarbeit.".into(),
});

pub static MAX: LazyLock<ContactSubmission> = LazyLock::new(|| ContactSubmission {
    name: "Max Mustermann".try_into().unwrap(),
    email: "max.mustermann@example.de".try_into().unwrap(),
    message: "Hallo Welt! Ich hätte Interesse an einer Zusammenarbeit."
        .try_into()
        .unwrap(),
});

pub static INVALID_FIELDS: LazyLock<ContactFormFields> = LazyLock::new(|| ContactFormFields {
    name: " ".into(),
    email: "notanemail".into(),
    message: String::new(),
});
