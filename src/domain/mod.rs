// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits that define what a
// molecule IS in this program, independent of how it is read
// from disk or how it is batched into tensors.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain data, the error taxonomy, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Parsed and padded molecule types
pub mod molecule;

// Error taxonomy shared by the data layer
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
