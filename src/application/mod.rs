// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one goal:
// build the dataset and data loader, then walk batches.
//
// Rules for this layer:
//   - No printing here (that's Layer 1)
//   - No file parsing here (that's Layer 4)
//   - Only workflow coordination
//
// Reference: Rust Book §7 (Module System)

// Dataset → DataLoader → batch cycling
pub mod iterate_use_case;
