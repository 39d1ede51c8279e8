//! Query-and-filter core for a geotagged battery-value dashboard.
//!
//! Three pure engines over an in-memory point collection, plus the mutable
//! snapshot a UI layer drives:
//!
//! * [`query::parse`] – free-text query → a single [`query::Predicate`]
//! * [`data::filter`] – structured selections or a predicate → surviving points
//! * [`analysis::analyze`] – surviving points → summary statistics
//! * [`state::ExplorerState`] – dataset + selections + cached visible set
//!
//! Rendering, transport, and export live in the embedding application; this
//! crate only ever sees points already resident in memory.

pub mod analysis;
pub mod data;
pub mod query;
pub mod state;

pub use analysis::{analyze, AnalysisResult};
pub use data::filter::{apply, apply_predicate, FilterError, FilterMode, FilterState};
pub use data::model::{DataPoint, Dimension, GeoDataset};
pub use query::{parse, Predicate, ThresholdOp};
pub use state::{ExplorerState, QueryTrace};
