/// Load generation counter. Each new request takes a fresh number; only the
/// newest one is allowed to write its response into state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Generation(u64);

impl Generation {
    pub fn bump(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn is_current(&self, stamp: u64) -> bool {
        self.0 == stamp
    }

    pub fn current(&self) -> u64 {
        self.0
    }
}
