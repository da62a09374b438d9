//! Sequencing functions: row_number, rank, dense_rank, ntile.

use quarry_types::Value;

use super::partition::{Partition, Partitioned};

pub(super) fn row_number(partition: &Partition) -> Vec<Value> {
    (1..=partition.len() as i64).map(Value::Integer).collect()
}

/// Rank with gaps: a row starting a new peer group takes its 1-based
/// position.
pub(super) fn rank(partitioned: &Partitioned, partition: &Partition) -> Vec<Value> {
    let mut out = Vec::with_capacity(partition.len());
    let mut current = 1i64;
    for (pos, &row) in partition.rows.iter().enumerate() {
        if pos > 0 && !partitioned.peers(partition.rows[pos - 1], row) {
            current = pos as i64 + 1;
        }
        out.push(Value::Integer(current));
    }
    out
}

pub(super) fn dense_rank(partitioned: &Partitioned, partition: &Partition) -> Vec<Value> {
    let mut out = Vec::with_capacity(partition.len());
    let mut current = 1i64;
    for (pos, &row) in partition.rows.iter().enumerate() {
        if pos > 0 && !partitioned.peers(partition.rows[pos - 1], row) {
            current += 1;
        }
        out.push(Value::Integer(current));
    }
    out
}

/// Split the partition into `buckets` groups whose sizes differ by at most
/// one, larger groups first.
pub(super) fn ntile(partition: &Partition, buckets: usize) -> Vec<Value> {
    let len = partition.len();
    let size = len / buckets;
    let larger = len % buckets;

    let mut out = Vec::with_capacity(len);
    let mut bucket = 1i64;
    let mut filled = 0;
    for _ in 0..len {
        out.push(Value::Integer(bucket));
        filled += 1;
        let capacity = if (bucket as usize) <= larger { size + 1 } else { size };
        if filled == capacity {
            bucket += 1;
            filled = 0;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partition(len: usize) -> Partition {
        Partition {
            key: Vec::new(),
            rows: (0..len).collect(),
        }
    }

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().copied().map(Value::Integer).collect()
    }

    #[test]
    fn row_numbers_are_sequential() {
        assert_eq!(row_number(&partition(3)), ints(&[1, 2, 3]));
        assert!(row_number(&partition(0)).is_empty());
    }

    #[test]
    fn ntile_front_loads_remainder() {
        assert_eq!(ntile(&partition(7), 3), ints(&[1, 1, 1, 2, 2, 3, 3]));
        assert_eq!(ntile(&partition(4), 2), ints(&[1, 1, 2, 2]));
    }

    #[test]
    fn ntile_with_more_buckets_than_rows() {
        assert_eq!(ntile(&partition(2), 5), ints(&[1, 2]));
        assert!(ntile(&partition(0), 3).is_empty());
    }
}
