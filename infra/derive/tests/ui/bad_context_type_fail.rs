use csync_derive::csync_error;

#[csync_error]
pub enum ParseError {
    #[error("bad number{}: {source}", format_context(.context))]
    Number { source: std::num::ParseIntError, context: Option<String> },
}

fn main() {}
