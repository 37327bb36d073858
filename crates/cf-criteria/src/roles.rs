//! Criteria for role-tagged variables: `cf_role` features and grid mappings.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::CriteriaResult;
use crate::patterns::{NamePattern, ANY_VALUE_PATTERN};

pub const CF_ROLE: &str = "cf_role";
pub const GRID_MAPPING_NAME: &str = "grid_mapping_name";

/// Key of the single grid-mapping criterion.
pub const GRID_MAPPING: &str = "grid_mapping";

/// CF discrete sampling geometry feature identifiers.
pub const DSG_ROLES: [&str; 3] = ["timeseries_id", "profile_id", "trajectory_id"];

/// SGRID and UGRID topology variables.
pub const TOPOLOGY_ROLES: [&str; 2] = ["grid_topology", "mesh_topology"];

/// Equality constraint `{attribute: value}` identifying a role variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleCriterion {
    pub attribute: String,
    pub value: String,
}

impl RoleCriterion {
    /// `{"cf_role": role}`
    pub fn cf_role(role: &str) -> Self {
        Self {
            attribute: CF_ROLE.to_string(),
            value: role.to_string(),
        }
    }

    pub fn matches(&self, attribute: &str, value: &str) -> bool {
        self.attribute == attribute && self.value == value
    }
}

/// Presence constraint: the attribute exists with any non-empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMappingCriterion {
    pub attribute: String,
    pub pattern: NamePattern,
}

impl GridMappingCriterion {
    pub(crate) fn new() -> CriteriaResult<Self> {
        Ok(Self {
            attribute: GRID_MAPPING_NAME.to_string(),
            pattern: NamePattern::new(GRID_MAPPING_NAME, ANY_VALUE_PATTERN)?,
        })
    }

    pub fn matches(&self, attribute: &str, value: &str) -> bool {
        self.attribute == attribute && self.pattern.is_match(value)
    }
}

impl Serialize for RoleCriterion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.attribute, &self.value)?;
        map.end()
    }
}

impl Serialize for GridMappingCriterion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.attribute, &self.pattern)?;
        map.end()
    }
}
