//! Arvak Binary Quadratic Models
//!
//! This crate provides the in-memory representation of Binary Quadratic
//! Models (BQMs), the objective functions of QUBO and Ising problems solved
//! by quantum annealers and classical heuristics.
//!
//! # Overview
//!
//! A BQM is a set of variables, each with a linear bias, and pairwise
//! interactions between distinct variables, each with a quadratic bias. The
//! interaction graph is typically sparse (bounded by hardware connectivity),
//! so [`AdjMapBqm`] stores one sorted neighbor map per variable and writes
//! every interaction into both endpoints' maps.
//!
//! # Core Components
//!
//! - **Adjacency map**: [`AdjMapBqm`], the mutable sparse store, with
//!   [`Neighborhood`] and [`NeighborhoodMut`] views
//! - **Adjacency array**: [`AdjArrayBqm`], a fixed-structure compressed
//!   layout for read-heavy use
//! - **Views**: [`BqmView`], the capability any representation exposes for
//!   conversion and energy evaluation
//! - **Numeric types**: [`Variable`] and [`Bias`] select index and bias width
//! - **Serde**: [`BqmRecord`] is the exchange form of an [`AdjMapBqm`]
//!
//! # Example: Building a QUBO
//!
//! ```rust
//! use arvak_bqm::{AdjMapBqm, BqmView};
//!
//! let mut bqm: AdjMapBqm = AdjMapBqm::new();
//! for _ in 0..3 {
//!     bqm.add_variable();
//! }
//! bqm.set_linear(0, 1.5);
//! bqm.set_quadratic(0, 1, -2.0);
//! bqm.set_quadratic(1, 2, 3.0);
//!
//! assert_eq!(bqm.num_interactions(), 2);
//! assert_eq!(bqm.degree(1), 2);
//! assert_eq!(bqm.get_quadratic(2, 1), Some(3.0));
//! assert_eq!(bqm.get_quadratic(0, 2), None);
//!
//! // x = (1, 1, 0)
//! assert_eq!(bqm.energy(&[1.0, 1.0, 0.0]).unwrap(), -0.5);
//! ```
//!
//! # Preconditions
//!
//! Store operations trust their caller. Variable arguments must lie in
//! `0..num_variables()`, pairwise operations need distinct variables, and
//! [`AdjMapBqm::pop_variable`] needs a non-empty model. Violations are
//! caught by `debug_assert!` in debug builds. Release builds skip those
//! checks and the result of a bad index is unspecified (usually a panic from
//! slice indexing). Memory stays safe either way, and the symmetric writes
//! check both endpoints before touching either, so a model is never left
//! half-updated.
//!
//! Data from outside the program goes through checked paths instead
//! ([`AdjMapBqm::try_from_view`], deserialization), which report a
//! [`BqmError`].
//!
//! # Concurrency
//!
//! Models are plain owned data with no interior mutability. Share them
//! across threads behind a lock such as `RwLock<AdjMapBqm>`: reads
//! (`get_*`, `neighborhood`) take the shared side, every mutation the
//! exclusive side.

pub mod adjarray;
pub mod adjmap;
pub mod error;
pub mod graph;
pub mod record;
pub mod variable;
pub mod view;

pub use adjarray::AdjArrayBqm;
pub use adjmap::{AdjMapBqm, Neighborhood, NeighborhoodMut};
pub use error::{BqmError, BqmResult};
pub use graph::interaction_graph;
pub use record::BqmRecord;
pub use variable::{Bias, Variable};
pub use view::BqmView;
