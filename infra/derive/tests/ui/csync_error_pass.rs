use csync_derive::csync_error;
use std::borrow::Cow;

#[csync_error]
pub enum PageError {
    #[error("Decode failure{}: {source}", format_context(.context))]
    Decode {
        #[source]
        source: std::num::ParseIntError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Missing page{}: {message}", format_context(.context))]
    Missing { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal page error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse(raw: &str) -> Result<u32, PageError> {
    raw.parse::<u32>().context("Parsing page number")
}

fn main() {
    let err = parse("x").unwrap_err();
    assert!(err.to_string().contains("(Parsing page number)"));

    let missing: Result<(), PageError> =
        Err(PageError::Missing { message: "page 3".into(), context: None });
    let err = missing.context("Fetching contacts").unwrap_err();
    assert_eq!(err.to_string(), "Missing page (Fetching contacts): page 3");

    let internal: PageError = "boom".into();
    assert!(matches!(internal, PageError::Internal { .. }));
}
