//! Data layer: core types, loading, normalization and filtering.
//!
//! Architecture:
//! ```text
//!        .csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → RawTable, detect Schema
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ normalize │  typed Records, bad cells → None
//!   └───────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  Table    │  main rows + trailing reference record
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  category / price predicates → filtered indices
//!   └──────────┘
//! ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
