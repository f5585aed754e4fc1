//! # Batch Processor
//!
//! Splits scan results into batches and decides where their items drop.

use cgmath::Point3;

use crate::error::MassBreakError;

/// Height above the player's feet at which dropped items appear.
pub const DROP_Y_OFFSET: f32 = 0.5;

/// Splits `items` into consecutive batches of `batch_size`, preserving order.
///
/// Every batch but the last holds exactly `batch_size` items; the last holds the
/// remainder. Concatenating the batches gives back `items`.
///
/// # Errors
/// `MassBreakError::InvalidBatchSize` if `batch_size` is 0, whatever `items` holds.
pub fn create_batches<T: Clone>(items: &[T], batch_size: usize) -> Result<Vec<Vec<T>>, MassBreakError> {
    if batch_size == 0 {
        return Err(MassBreakError::InvalidBatchSize);
    }

    Ok(items.chunks(batch_size).map(<[T]>::to_vec).collect())
}

/// Where the items of a mass break are dropped: at the player, slightly raised.
pub fn calculate_drop_location(player_location: Point3<f32>, y_offset: f32) -> Point3<f32> {
    Point3::new(player_location.x, player_location.y + y_offset, player_location.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, 16)]
    #[test_case(1, 16)]
    #[test_case(16, 16)]
    #[test_case(17, 16)]
    #[test_case(20, 16)]
    #[test_case(64, 16)]
    #[test_case(7, 3)]
    #[test_case(5, 1)]
    fn batches_rebuild_the_input(len: usize, batch_size: usize) {
        let items: Vec<usize> = (0..len).collect();
        let batches = create_batches(&items, batch_size).unwrap();

        assert_eq!(batches.len(), len.div_ceil(batch_size));
        if let Some((last, full)) = batches.split_last() {
            assert!(full.iter().all(|batch| batch.len() == batch_size));
            assert!(!last.is_empty() && last.len() <= batch_size);
        }
        assert_eq!(batches.concat(), items);
    }

    #[test]
    fn zero_batch_size_fails_even_when_empty() {
        assert!(matches!(create_batches(&[1, 2, 3], 0), Err(MassBreakError::InvalidBatchSize)));
        assert!(matches!(create_batches::<u8>(&[], 0), Err(MassBreakError::InvalidBatchSize)));
    }

    #[test]
    fn drop_location_is_raised() {
        let drop = calculate_drop_location(Point3::new(10.5, 64.0, -3.25), DROP_Y_OFFSET);
        assert_eq!(drop, Point3::new(10.5, 64.5, -3.25));
    }
}
