//! Surrogate ids for fact rows.
//!
//! Rows are processed in fixed-size partitions; a row's id is its partition
//! index in the upper bits and its offset within the partition in the lower
//! 33 bits. Ids are unique within a run but jump between partitions, and
//! nothing about them is stable across runs.

/// Bits reserved for the row offset within a partition.
pub const PARTITION_SHIFT: u32 = 33;

/// Rows per partition when none is configured.
pub const DEFAULT_PARTITION_ROWS: usize = 1 << 16;

/// Largest partition size whose offsets still fit below [`PARTITION_SHIFT`].
pub fn max_partition_rows() -> usize {
    usize::try_from(1u64 << PARTITION_SHIFT).unwrap_or(usize::MAX)
}

/// Id of the row at `offset` within partition `partition`.
///
/// Returns `None` when the offset spills into the partition bits or the id
/// does not fit in an `i64`.
pub fn partition_offset_id(partition: usize, offset: usize) -> Option<i64> {
    let offset = i64::try_from(offset).ok()?;
    if offset >= 1i64 << PARTITION_SHIFT {
        return None;
    }
    i64::try_from(partition)
        .ok()?
        .checked_mul(1i64 << PARTITION_SHIFT)?
        .checked_add(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_partition_is_contiguous() {
        assert_eq!(partition_offset_id(0, 0), Some(0));
        assert_eq!(partition_offset_id(0, 41), Some(41));
    }

    #[test]
    fn later_partitions_jump() {
        assert_eq!(partition_offset_id(1, 0), Some(8_589_934_592));
        assert_eq!(partition_offset_id(2, 3), Some(2 * 8_589_934_592 + 3));
    }

    #[test]
    fn ids_past_i64_are_rejected() {
        let last_partition = (1usize << (63 - PARTITION_SHIFT)) - 1;
        let last_offset = max_partition_rows() - 1;

        assert_eq!(
            partition_offset_id(last_partition, last_offset),
            Some(i64::MAX)
        );
        assert_eq!(partition_offset_id(last_partition + 1, 0), None);
        assert_eq!(partition_offset_id(usize::MAX, 0), None);
        assert_eq!(partition_offset_id(0, max_partition_rows()), None);
    }
}
