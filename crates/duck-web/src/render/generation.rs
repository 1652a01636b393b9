/// Current set of a regenerated GPU resource group.
///
/// `replace` hands the outgoing set to `retire` before returning, so at most
/// one set is ever live once the call completes.
pub struct Generational<T> {
    current: T,
    generation: u64,
}

impl<T> Generational<T> {
    pub fn new(initial: T) -> Self {
        Self {
            current: initial,
            generation: 1,
        }
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    /// Number of sets created so far, including the current one.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn replace(&mut self, next: T, retire: impl FnOnce(T)) {
        let old = std::mem::replace(&mut self.current, next);
        retire(old);
        self.generation += 1;
    }
}
