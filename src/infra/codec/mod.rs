//! Codec infrastructure: bit cursors over payload buffers and the
//! descriptor-driven field engine built on top of them.
pub mod bits;
pub mod engine;
