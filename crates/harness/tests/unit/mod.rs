//! Unit tests, one module per harness stage.

/// Bit-pattern classification and construction.
pub mod bits;




/// Reference multiplier scenarios and properties.
pub mod reference;


/// Operand generation.
pub mod stimulus;
