//! Criteria for identifying coordinate axes and role variables in
//! CF-convention datasets (NetCDF, Zarr).
//!
//! The crate supplies reference data only: which `standard_name`, `units`,
//! `axis` (and similar) attribute values mark a variable as latitude,
//! longitude, vertical, X, Y, Z or time, which name patterns suggest an axis,
//! and which attributes tag discrete sampling geometry, grid topology and
//! grid mapping variables. Reading datasets and deciding a variable's role
//! is left to the caller.
//!
//! # Usage
//!
//! ```
//! use cf_criteria::{CriteriaTable, STANDARD_NAME};
//!
//! let table = CriteriaTable::global();
//! assert!(table.coordinate_criteria("latitude").unwrap().accepts(STANDARD_NAME, "latitude"));
//! assert!(table.regex("longitude").unwrap().is_match("nav_lon"));
//! ```

pub mod axis;
pub mod criteria;
pub mod error;
pub mod overlay;
pub mod patterns;
pub mod roles;
pub mod table;

pub use axis::{Axis, TIME_ALIAS};
pub use criteria::{
    AttributeCriteria, AXIS, CARTESIAN_AXIS, COORDINATE_AXIS_TYPE, GRADS_DIM, LONG_NAME,
    POSITIVE, STANDARD_NAME, UNITS, X_INDEX_LONG_NAME, Y_INDEX_LONG_NAME,
};
pub use error::{CriteriaError, CriteriaResult};
pub use overlay::{Overlay, OVERLAY_ENV};
pub use patterns::{NamePattern, PatternEngine};
pub use roles::{
    GridMappingCriterion, RoleCriterion, CF_ROLE, DSG_ROLES, GRID_MAPPING, GRID_MAPPING_NAME,
    TOPOLOGY_ROLES,
};
pub use table::CriteriaTable;
