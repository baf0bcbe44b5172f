use csync_domain::{Record, RecordId};
use fxhash::FxHashSet;

/// Records whose id is in `ids`, in collection order. Unknown ids are ignored.
#[must_use]
pub fn select_records(records: &[Record], ids: &[RecordId]) -> Vec<Record> {
    let wanted: FxHashSet<&RecordId> = ids.iter().collect();
    records.iter().filter(|r| wanted.contains(r.id())).cloned().collect()
}
