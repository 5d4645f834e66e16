use crate::gesture::Step;
use crate::EngineError;

/// Apply `step` to `current`, saturating at `0` and `count - 1`.
///
/// Out-of-range requests are not errors, they simply stop at the boundary.
/// A `count` of zero pins the result to `0`.
pub fn select(current: usize, step: Step, count: usize) -> usize {
    let last = count.saturating_sub(1) as i64;
    let requested = (current as i64).saturating_add(step.value() as i64);
    requested.clamp(0, last) as usize
}

/// The focused panel, always within `[0, count - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveIndex {
    index: usize,
    count: usize,
}

impl ActiveIndex {
    /// Start at the first panel of a gallery with `count` panels.
    pub fn new(count: usize) -> Result<Self, EngineError> {
        if count == 0 {
            return Err(EngineError::EmptyGallery);
        }
        Ok(Self { index: 0, count })
    }

    pub fn get(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.count
    }

    /// Move by `step` and return the new index.
    pub fn apply(&mut self, step: Step) -> usize {
        self.index = select(self.index, step, self.count);
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_forward_from_middle() {
        let mut active = ActiveIndex::new(5).unwrap();
        active.apply(Step(2));
        assert_eq!(active.apply(Step(1)), 3);
    }

    #[test]
    fn clamps_at_start() {
        let mut active = ActiveIndex::new(5).unwrap();
        assert_eq!(active.apply(Step(-1)), 0);
        assert_eq!(active.apply(Step(0)), 0);
        assert_eq!(active.apply(Step(i32::MIN)), 0);
        assert!(active.is_first());
    }

    #[test]
    fn clamps_at_end() {
        let mut active = ActiveIndex::new(5).unwrap();
        assert_eq!(active.apply(Step(3)), 3);
        assert_eq!(active.apply(Step(3)), 4);
        assert_eq!(active.apply(Step(i32::MAX)), 4);
        assert!(active.is_last());
    }

    #[test]
    fn single_panel_never_moves() {
        let mut active = ActiveIndex::new(1).unwrap();
        for step in [-3, -1, 0, 1, 3] {
            assert_eq!(active.apply(Step(step)), 0);
        }
    }

    #[test]
    fn stays_in_range_for_any_sequence() {
        for count in 1..8 {
            let mut active = ActiveIndex::new(count).unwrap();
            for step in [3, 3, -1, 2, -3, -3, 1, 0, 3, -2, 3, 3] {
                let index = active.apply(Step(step));
                assert!(index < count);
            }
        }
    }

    #[test]
    fn empty_gallery_is_rejected() {
        assert!(matches!(ActiveIndex::new(0), Err(EngineError::EmptyGallery)));
        assert_eq!(select(0, Step(2), 0), 0);
    }
}
