/// The linear probe sequence for a key's home index.
///
/// Yields exactly `capacity` indices, starting at `home` and advancing by one
/// with wraparound, so every slot is visited once per cycle.
#[derive(Clone, Debug)]
pub(crate) struct ProbeSequence {
    index: usize,
    capacity: usize,
    remaining: usize,
}

impl ProbeSequence {
    /// Starts a probe at `hash mod capacity`.
    ///
    /// `capacity` must be non-zero.
    #[inline]
    pub(crate) fn new(hash: u64, capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        ProbeSequence {
            index: home_index(hash, capacity),
            capacity,
            remaining: capacity,
        }
    }
}

/// Maps a hash onto a slot index in `0..capacity`.
#[inline(always)]
pub(crate) fn home_index(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

impl Iterator for ProbeSequence {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let index = self.index;
        self.index += 1;
        if self.index == self.capacity {
            self.index = 0;
        }
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProbeSequence {}
