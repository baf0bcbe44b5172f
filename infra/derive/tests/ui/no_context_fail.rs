use csync_derive::csync_error;

#[csync_error]
pub enum ParseError {
    #[error("bad number: {source}")]
    Number { source: std::num::ParseIntError },
}

fn main() {}
