use csync_derive::csync_error;

#[csync_error]
pub enum SyncError {
    Timeout(std::time::Duration),
}

fn main() {}
