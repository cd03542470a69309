//! Infrastructure layer: bit-level codec primitives and the field engine.
pub mod codec;
