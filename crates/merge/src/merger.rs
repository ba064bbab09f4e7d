//! Merge of secondary monthly entries into an existing dataset.

use histdata_core::config::MergePolicy;
use histdata_core::MonthlyDataset;

/// Counts from one merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Months the dataset didn't have.
    pub added: usize,
    /// Existing months replaced by secondary entries.
    pub replaced: usize,
    /// Secondary entries ignored because the month already existed.
    pub kept: usize,
}

/// Merge `entries` into `target` under `policy`.
///
/// With [`MergePolicy::Override`] every entry wins over the existing month;
/// with [`MergePolicy::FillMissing`] only absent months are inserted. The
/// dataset stays sorted by month either way.
pub fn merge_monthly(
    target: &mut MonthlyDataset,
    entries: MonthlyDataset,
    policy: MergePolicy,
) -> MergeSummary {
    let mut summary = MergeSummary::default();

    for entry in entries.into_records() {
        let exists = target.contains(&entry.month);
        match (policy, exists) {
            (MergePolicy::FillMissing, true) => summary.kept += 1,
            (_, true) => {
                target.upsert(entry);
                summary.replaced += 1;
            }
            (_, false) => {
                target.upsert(entry);
                summary.added += 1;
            }
        }
    }

    summary
}
