//! # VA-Relay Test Suite
//!
//! Cross-subsystem flows. Per-subsystem tests live next to their code.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── publish_flow.rs   # CA record → VA publisher → in-memory VA store
//!     └── import_flow.rs    # signed drop files → reader → in-memory CA store
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p vr-tests
//! cargo test -p vr-tests integration::import_flow
//! ```

pub mod integration;
