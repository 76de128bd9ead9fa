use crate::config::errors::ConfigErrors;

/// Two-phase lifecycle shared by every config block.
///
/// The owner calls [`defaults`](ConfigBlock::defaults) once at construction,
/// overlays operator input, then calls [`verify`](ConfigBlock::verify) once
/// with a collector shared by all sibling blocks.
pub trait ConfigBlock {
    /// Overwrite every field with its baseline value without reading the
    /// current state.
    fn defaults(&mut self);

    /// Append every violation found to `errs`. Never stops at the first
    /// failure and never mutates the block.
    fn verify(&self, errs: &mut ConfigErrors);
}
