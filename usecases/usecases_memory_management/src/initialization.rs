//! Table Initialization
//!
//! Builds the starting partition layout for each [`InitMode`] and checks
//! that a layout covers the address space exactly.
//!
//! The fragmented layout reserves the gaps between its free segments with
//! partitions owned by [`EXTERNAL_OWNER`](entities_memory_partition::EXTERNAL_OWNER),
//! so the coverage invariant holds from the first operation on.

use entities_memory_partition::Partition;
use rand::Rng;
use thiserror::Error;

use crate::allocator::AllocationError;
use crate::config::InitMode;

/// Default number of jittered segments in a fragmented layout
pub const DEFAULT_SEGMENTS: usize = 8;

/// Smallest slot a fragmented segment may occupy
pub const MIN_SLOT_SIZE: usize = 8;

/// Ways a partition layout can break the coverage invariant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout has no partitions")]
    Empty,
    #[error("partition {index} has zero size")]
    ZeroSize { index: usize },
    #[error("partition {index} starts at {found}, expected {expected}")]
    Discontiguous { index: usize, expected: usize, found: usize },
    #[error("layout covers {covered} units, address space has {total}")]
    Coverage { covered: usize, total: usize },
}

/// Build the initial layout for `mode`
pub fn build_layout<R: Rng + ?Sized>(
    mode: InitMode,
    total_size: usize,
    rng: &mut R,
) -> Result<Vec<Partition>, AllocationError> {
    if total_size == 0 {
        return Err(AllocationError::InvalidRequest(
            "total size must be positive".to_string(),
        ));
    }
    let partitions = match mode {
        InitMode::Single => vec![Partition::free(0, total_size)],
        InitMode::Fragmented { segments } => fragmented_layout(total_size, segments, rng)?,
    };
    verify_layout(&partitions, total_size)?;
    Ok(partitions)
}

/// Split three quarters of the space into `segments` slots.
///
/// Each slot holds a free segment of three quarters of the slot, perturbed by
/// up to one eighth of the slot, followed by an external reservation for the
/// rest of the slot. The remainder of the space becomes the trailing free
/// segment.
fn fragmented_layout<R: Rng + ?Sized>(
    total_size: usize,
    segments: usize,
    rng: &mut R,
) -> Result<Vec<Partition>, AllocationError> {
    if segments == 0 {
        return Err(AllocationError::InvalidRequest(
            "fragmented layout needs at least one segment".to_string(),
        ));
    }

    let span = total_size - total_size / 4;
    let slot = span / segments;
    if slot < MIN_SLOT_SIZE {
        return Err(AllocationError::InvalidRequest(format!(
            "address space of {} is too small for {} segments",
            total_size, segments
        )));
    }

    let base = slot * 3 / 4;
    let jitter = (slot / 8) as isize;

    let mut partitions = Vec::with_capacity(segments * 2 + 1);
    let mut cursor = 0;
    for _ in 0..segments {
        let size = perturb(base, rng.gen_range(-jitter..=jitter));
        partitions.push(Partition::free(cursor, size));
        partitions.push(Partition::external(cursor + size, slot - size));
        cursor += slot;
    }
    partitions.push(Partition::free(cursor, total_size - cursor));

    log::debug!(
        "fragmented layout: {} segments of slot {} (base {}, jitter {}), trailing {}",
        segments,
        slot,
        base,
        jitter,
        total_size - cursor
    );
    Ok(partitions)
}

/// Apply a signed offset to a segment size, falling back to the unperturbed
/// size when the result is not positive.
pub(crate) fn perturb(base: usize, offset: isize) -> usize {
    match base.checked_add_signed(offset) {
        Some(size) if size > 0 => size,
        _ => base,
    }
}

/// Check that `partitions` tile `[0, total_size)` in address order
pub fn verify_layout(partitions: &[Partition], total_size: usize) -> Result<(), LayoutError> {
    if partitions.is_empty() {
        return Err(LayoutError::Empty);
    }
    let mut expected = 0;
    for (index, p) in partitions.iter().enumerate() {
        if p.size() == 0 {
            return Err(LayoutError::ZeroSize { index });
        }
        if p.start() != expected {
            return Err(LayoutError::Discontiguous {
                index,
                expected,
                found: p.start(),
            });
        }
        expected = p.end();
    }
    if expected != total_size {
        return Err(LayoutError::Coverage {
            covered: expected,
            total: total_size,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_single_layout() {
        let mut rng = SmallRng::seed_from_u64(1);
        let layout = build_layout(InitMode::Single, 1024, &mut rng).unwrap();
        assert_eq!(layout, vec![Partition::free(0, 1024)]);
    }

    #[test]
    fn test_zero_total_size() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(matches!(
            build_layout(InitMode::Single, 0, &mut rng),
            Err(AllocationError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_fragmented_layout_shape() {
        let mut rng = SmallRng::seed_from_u64(42);
        let layout = build_layout(InitMode::fragmented(), 1024, &mut rng).unwrap();

        // 8 free segments, 8 reservations, 1 trailing segment
        assert_eq!(layout.len(), 17);
        assert!(layout.last().unwrap().is_free());
        assert!(layout.last().unwrap().size() >= 1024 / 4);

        // slot = 768 / 8 = 96, base = 72, jitter = 12
        for pair in layout[..16].chunks(2) {
            assert!(pair[0].is_free());
            assert!((60..=84).contains(&pair[0].size()));
            assert!(pair[1].is_external());
            assert_eq!(pair[0].size() + pair[1].size(), 96);
        }
    }

    #[test]
    fn test_fragmented_too_small() {
        let mut rng = SmallRng::seed_from_u64(3);
        assert!(matches!(
            build_layout(InitMode::Fragmented { segments: 8 }, 64, &mut rng),
            Err(AllocationError::InvalidRequest(_))
        ));
        assert!(matches!(
            build_layout(InitMode::Fragmented { segments: 0 }, 1024, &mut rng),
            Err(AllocationError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_perturb() {
        assert_eq!(perturb(10, 3), 13);
        assert_eq!(perturb(10, -3), 7);
        assert_eq!(perturb(10, -10), 10);
        assert_eq!(perturb(10, -25), 10);
    }

    #[test]
    fn test_verify_layout_errors() {
        assert_eq!(verify_layout(&[], 10), Err(LayoutError::Empty));
        assert_eq!(
            verify_layout(&[Partition::free(0, 5), Partition::free(6, 4)], 10),
            Err(LayoutError::Discontiguous { index: 1, expected: 5, found: 6 })
        );
        assert_eq!(
            verify_layout(&[Partition::free(0, 5)], 10),
            Err(LayoutError::Coverage { covered: 5, total: 10 })
        );
        assert_eq!(
            verify_layout(&[Partition::free(0, 0)], 0),
            Err(LayoutError::ZeroSize { index: 0 })
        );
    }
}
