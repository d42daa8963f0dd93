//! # PlanScope Router
//!
//! Client-side route resolution for the PlanScope municipal-planning
//! dashboard:
//! - Static routes (`/pricing`)
//! - Placeholder segments (`/dashboard/meetings/[id]`)
//! - Ordered route tables where the first match wins
//! - URL generation for named routes
//!
//! Everything in this crate is a pure function of its inputs. Navigation
//! state, history integration and change notification live in the
//! `planscope` crate, which consumes these types.
//!
//! ## Matching rules
//!
//! - Pattern and path are split on `/`; empty segments are discarded, so
//!   leading, trailing and doubled slashes never matter.
//! - Segment counts must be equal.
//! - `[name]` binds the path segment at that position, verbatim.
//! - Any other segment must be byte-equal to the path segment.
//! - "No match" is `None`; a literal-only match is `Some` of empty params.
//!
//! ## Example
//!
//! ```
//! use planscope_router::{match_route, RouteTable};
//!
//! let params = match_route("/dashboard/meetings/[id]", "/dashboard/meetings/xyz").unwrap();
//! assert_eq!(params.get("id"), Some("xyz"));
//!
//! let table = RouteTable::new()
//!     .route("/dashboard/meetings/[id]", "meeting")
//!     .route("/dashboard/permits/[id]", "permit");
//! assert_eq!(table.resolve_params("/dashboard/permits/77").get("id"), Some("77"));
//! assert!(table.resolve_params("/pricing").is_empty());
//! ```

mod params;
pub mod path;
pub mod route;
mod table;

pub use params::Params;
pub use path::{is_valid_path, normalize_path};
pub use route::pattern::{classify_segment, match_route, split_segments, RoutePattern, SegmentKind};
pub use table::{Route, RouteMatch, RouteTable};
