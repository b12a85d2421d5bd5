pub mod sibling_array;

/// Anything that can be ordered among its siblings by a small residue.
pub trait Remainder {
    fn remainder(&self) -> u8;
}
