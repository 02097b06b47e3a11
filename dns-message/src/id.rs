/// Source of transaction identifiers for outgoing queries.
///
/// Any `FnMut() -> u16` closure is a generator, which keeps tests
/// deterministic.
pub trait IdGenerator {
    fn next_id(&mut self) -> u16;
}

impl<F> IdGenerator for F
where
    F: FnMut() -> u16,
{
    fn next_id(&mut self) -> u16 {
        self()
    }
}

/// Draws each identifier from the thread local random number generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomId;

impl IdGenerator for RandomId {
    fn next_id(&mut self) -> u16 {
        rand::random()
    }
}
