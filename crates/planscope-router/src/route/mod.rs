//! Route module for client-side routing
//!
//! Contains the pure components for pattern compilation and matching:
//! - Pure functions (same input → same output)
//! - Immutable compiled patterns
//! - Pattern matching for control flow

pub mod pattern;

pub use pattern::{classify_segment, match_route, split_segments, RoutePattern, SegmentKind};
