//! Transaction status derived from block heights and a confirmation threshold.

use serde::Serialize;

use crate::types::{BlockHeight, Threshold};

/// Display status of a transaction. `Completed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    /// Included in a block but short of the threshold. `progress` lies in
    /// `[0, 1)`.
    Processing { progress: f64 },
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    pub fn progress(&self) -> Option<f64> {
        match self {
            Self::Processing { progress } => Some(*progress),
            _ => None,
        }
    }
}

/// Resolve the status of a transaction.
///
/// Precedence: a failed transaction is always `Failed`. Otherwise, when both
/// heights are known, `confirmations = last_block_height - block_height + 1`
/// decides between `Completed` and `Processing`. Everything else, including
/// a chain tip that lags behind the transaction's block, is `Pending`.
#[must_use]
pub fn resolve(
    failed: bool,
    block_height: Option<BlockHeight>,
    last_block_height: Option<BlockHeight>,
    threshold: Threshold,
) -> TransactionStatus {
    if failed {
        return TransactionStatus::Failed;
    }

    let (Some(block_height), Some(last_block_height)) = (block_height, last_block_height) else {
        return TransactionStatus::Pending;
    };

    let confirmations = i64::from(*last_block_height) - i64::from(*block_height) + 1;
    if confirmations < 0 {
        tracing::debug!(
            block_height = %block_height,
            last_block_height = %last_block_height,
            "chain tip is behind transaction block, reporting pending"
        );
        return TransactionStatus::Pending;
    }

    let required = i64::from(threshold.get());
    if confirmations >= required {
        TransactionStatus::Completed
    } else {
        TransactionStatus::Processing {
            progress: confirmations as f64 / required as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(n: u32) -> Threshold {
        Threshold::new(n).unwrap()
    }

    fn h(n: u32) -> Option<BlockHeight> {
        Some(BlockHeight(n))
    }

    #[test]
    fn failed_overrides_everything() {
        assert_eq!(resolve(true, h(100), h(200), t(3)), TransactionStatus::Failed);
        assert_eq!(resolve(true, None, None, t(3)), TransactionStatus::Failed);
        assert_eq!(resolve(true, h(200), h(100), t(3)), TransactionStatus::Failed);
    }

    #[test]
    fn unknown_heights_are_pending() {
        assert_eq!(resolve(false, None, h(100), t(3)), TransactionStatus::Pending);
        assert_eq!(resolve(false, h(100), None, t(3)), TransactionStatus::Pending);
        assert_eq!(resolve(false, None, None, t(3)), TransactionStatus::Pending);
    }

    #[test]
    fn same_block_is_one_confirmation() {
        let status = resolve(false, h(100), h(100), t(3));
        assert_eq!(status, TransactionStatus::Processing { progress: 1.0 / 3.0 });
    }

    #[test]
    fn threshold_reached_is_completed() {
        assert_eq!(resolve(false, h(100), h(102), t(3)), TransactionStatus::Completed);
        assert_eq!(resolve(false, h(100), h(500), t(3)), TransactionStatus::Completed);
    }

    #[test]
    fn zero_confirmations_is_processing_not_pending() {
        // Tip one block behind the transaction's block.
        let status = resolve(false, h(101), h(100), t(6));
        assert_eq!(status, TransactionStatus::Processing { progress: 0.0 });
    }

    #[test]
    fn negative_confirmations_fall_back_to_pending() {
        assert_eq!(resolve(false, h(105), h(100), t(3)), TransactionStatus::Pending);
    }

    #[test]
    fn threshold_of_one_completes_on_first_block() {
        assert_eq!(resolve(false, h(7), h(7), t(1)), TransactionStatus::Completed);
    }

    #[test]
    fn progress_stays_below_one_across_range() {
        let threshold = t(6);
        for last in 90..=110u32 {
            let status = resolve(false, h(100), h(last), threshold);
            let confirmations = i64::from(last) - 100 + 1;
            match status {
                TransactionStatus::Pending => assert!(confirmations < 0),
                TransactionStatus::Processing { progress } => {
                    assert!((0..6).contains(&confirmations));
                    assert!((0.0..1.0).contains(&progress));
                    assert_eq!(progress, confirmations as f64 / 6.0);
                }
                TransactionStatus::Completed => assert!(confirmations >= 6),
                TransactionStatus::Failed => panic!("unexpected failed status"),
            }
        }
    }

    #[test]
    fn heights_at_u32_extremes_do_not_wrap() {
        assert_eq!(
            resolve(false, h(u32::MAX), h(0), t(3)),
            TransactionStatus::Pending
        );
        assert_eq!(
            resolve(false, h(0), h(u32::MAX), t(3)),
            TransactionStatus::Completed
        );
    }

    #[test]
    fn terminal_states() {
        assert!(TransactionStatus::Completed.is_terminal());
        assert!(TransactionStatus::Failed.is_terminal());
        assert!(!TransactionStatus::Pending.is_terminal());
        assert!(!TransactionStatus::Processing { progress: 0.5 }.is_terminal());
        assert_eq!(
            TransactionStatus::Processing { progress: 0.5 }.progress(),
            Some(0.5)
        );
        assert_eq!(TransactionStatus::Completed.progress(), None);
    }
}
