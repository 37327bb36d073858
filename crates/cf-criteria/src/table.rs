//! The assembled criteria table.
//!
//! A [`CriteriaTable`] is built once and read-only afterward. The built-in
//! table is shared process-wide through [`CriteriaTable::global`]; tables
//! extended by an [`Overlay`] are built with [`CriteriaTable::with_overlay`]
//! and usually wrapped in an `Arc` by the caller.
//!
//! # Aliases
//!
//! The `time` key is the same entry as `T`, in both the coordinate criteria
//! and the name patterns. Both keys hold one `Arc`, so they cannot diverge.

use once_cell::sync::Lazy;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::axis::{Axis, TIME_ALIAS};
use crate::criteria::{
    builtin_criteria, AttributeCriteria, LONG_NAME, X_INDEX_LONG_NAME, Y_INDEX_LONG_NAME,
};
use crate::error::{CriteriaError, CriteriaResult};
use crate::overlay::Overlay;
use crate::patterns::{NamePattern, PatternEngine, BUILTIN_PATTERNS};
use crate::roles::{GridMappingCriterion, RoleCriterion, DSG_ROLES, GRID_MAPPING, TOPOLOGY_ROLES};

static BUILTIN: Lazy<CriteriaTable> =
    Lazy::new(|| CriteriaTable::build(None).expect("built-in criteria must compile"));

/// Lookup tables for identifying axes and role variables.
#[derive(Debug, Clone)]
pub struct CriteriaTable {
    cf_role_criteria: BTreeMap<String, RoleCriterion>,
    grid_mapping_var_criteria: BTreeMap<String, GridMappingCriterion>,
    coordinate_criteria: BTreeMap<String, Arc<AttributeCriteria>>,
    regex: BTreeMap<String, Arc<NamePattern>>,
}

impl CriteriaTable {
    /// The built-in table, constructed on first access.
    pub fn global() -> &'static CriteriaTable {
        &BUILTIN
    }

    /// An owned copy of the built-in table.
    pub fn builtin() -> CriteriaTable {
        BUILTIN.clone()
    }

    /// Build the built-in table extended by `overlay`.
    pub fn with_overlay(overlay: &Overlay) -> CriteriaResult<CriteriaTable> {
        Self::build(Some(overlay))
    }

    fn build(overlay: Option<&Overlay>) -> CriteriaResult<CriteriaTable> {
        let cf_role_criteria = build_roles(overlay);

        let mut grid_mapping_var_criteria = BTreeMap::new();
        grid_mapping_var_criteria.insert(GRID_MAPPING.to_string(), GridMappingCriterion::new()?);

        let coordinate_criteria = build_coordinates(overlay)?;
        let regex = build_patterns(overlay)?;

        let table = CriteriaTable {
            cf_role_criteria,
            grid_mapping_var_criteria,
            coordinate_criteria,
            regex,
        };

        debug!(
            roles = table.cf_role_criteria.len(),
            coordinates = table.coordinate_criteria.len(),
            patterns = table.regex.len(),
            engine = PatternEngine::ACTIVE.name(),
            "Built criteria table"
        );

        Ok(table)
    }

    // ------------------------------------------------------------------
    // Coordinate criteria
    // ------------------------------------------------------------------

    /// Criteria for an axis key (`"latitude"`, `"X"`, `"time"`, ...).
    pub fn coordinate_criteria(&self, key: &str) -> Option<&Arc<AttributeCriteria>> {
        self.coordinate_criteria.get(key)
    }

    pub fn coordinate_criteria_for(&self, axis: Axis) -> &Arc<AttributeCriteria> {
        &self.coordinate_criteria[axis.key()]
    }

    /// All coordinate keys, including the `time` alias.
    pub fn coordinate_keys(&self) -> impl Iterator<Item = &str> {
        self.coordinate_criteria.keys().map(String::as_str)
    }

    /// Coordinate keys whose criteria accept `value` for `attribute`.
    pub fn accepting_keys(&self, attribute: &str, value: &str) -> Vec<&str> {
        self.coordinate_criteria
            .iter()
            .filter(|(_, criteria)| criteria.accepts(attribute, value))
            .map(|(key, _)| key.as_str())
            .collect()
    }

    // ------------------------------------------------------------------
    // Name patterns
    // ------------------------------------------------------------------

    /// Name pattern for an axis key. `vertical` has none unless an overlay adds it.
    pub fn regex(&self, key: &str) -> Option<&Arc<NamePattern>> {
        self.regex.get(key)
    }

    pub fn regex_for(&self, axis: Axis) -> Option<&Arc<NamePattern>> {
        self.regex.get(axis.key())
    }

    pub fn regex_keys(&self) -> impl Iterator<Item = &str> {
        self.regex.keys().map(String::as_str)
    }

    /// Pattern keys matching `name`. The name should already be lowercase.
    pub fn matching_pattern_keys(&self, name: &str) -> Vec<&str> {
        self.regex
            .iter()
            .filter(|(_, pattern)| pattern.is_match(name))
            .map(|(key, _)| key.as_str())
            .collect()
    }

    // ------------------------------------------------------------------
    // Role criteria
    // ------------------------------------------------------------------

    pub fn cf_role_criteria(&self, role: &str) -> Option<&RoleCriterion> {
        self.cf_role_criteria.get(role)
    }

    pub fn cf_roles(&self) -> impl Iterator<Item = (&str, &RoleCriterion)> {
        self.cf_role_criteria.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn grid_mapping_var_criteria(&self, role: &str) -> Option<&GridMappingCriterion> {
        self.grid_mapping_var_criteria.get(role)
    }
}

impl Serialize for CriteriaTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let coordinates: BTreeMap<&str, &AttributeCriteria> = self
            .coordinate_criteria
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_ref()))
            .collect();
        let patterns: BTreeMap<&str, &NamePattern> = self
            .regex
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_ref()))
            .collect();

        let mut state = serializer.serialize_struct("CriteriaTable", 4)?;
        state.serialize_field("cf_role_criteria", &self.cf_role_criteria)?;
        state.serialize_field("grid_mapping_var_criteria", &self.grid_mapping_var_criteria)?;
        state.serialize_field("coordinate_criteria", &coordinates)?;
        state.serialize_field("regex", &patterns)?;
        state.end()
    }
}

fn build_roles(overlay: Option<&Overlay>) -> BTreeMap<String, RoleCriterion> {
    let mut roles: BTreeMap<String, RoleCriterion> = DSG_ROLES
        .iter()
        .chain(TOPOLOGY_ROLES.iter())
        .map(|role| (role.to_string(), RoleCriterion::cf_role(role)))
        .collect();

    if let Some(overlay) = overlay.filter(|o| !o.roles.is_empty()) {
        let added = insert_roles(&mut roles, &overlay.roles);
        info!(added, "Applied overlay roles");
    }

    roles
}

/// Insert extra roles, returning how many were new.
fn insert_roles(roles: &mut BTreeMap<String, RoleCriterion>, extra: &[String]) -> usize {
    let mut added = 0usize;
    for role in extra {
        if roles.insert(role.clone(), RoleCriterion::cf_role(role)).is_some() {
            warn!(role = %role, "Overlay role already defined");
        } else {
            added += 1;
        }
    }
    added
}

fn build_coordinates(
    overlay: Option<&Overlay>,
) -> CriteriaResult<BTreeMap<String, Arc<AttributeCriteria>>> {
    let mut entries: BTreeMap<Axis, AttributeCriteria> = Axis::ALL
        .iter()
        .map(|&axis| (axis, builtin_criteria(axis)))
        .collect();

    if let Some(overlay) = overlay {
        let mut added = 0usize;
        for (key, attributes) in &overlay.coordinates {
            let axis = Axis::from_key(key)?;
            let criteria = entries
                .get_mut(&axis)
                .expect("every axis has built-in criteria");
            for (attribute, values) in attributes {
                if attribute == LONG_NAME {
                    return Err(CriteriaError::ReservedAttribute {
                        axis: key.clone(),
                        attribute: attribute.clone(),
                    });
                }
                let skipped = criteria.extend(attribute, values.iter().cloned());
                if !skipped.is_empty() {
                    warn!(axis = %axis, attribute = %attribute, ?skipped, "Overlay values already present");
                }
                added += values.len() - skipped.len();
            }
        }
        if !overlay.coordinates.is_empty() {
            info!(added, "Applied overlay coordinate criteria");
        }
    }

    for criteria in entries.values_mut() {
        criteria.mirror_long_name();
    }
    if let Some(x) = entries.get_mut(&Axis::X) {
        x.extend(LONG_NAME, [X_INDEX_LONG_NAME]);
    }
    if let Some(y) = entries.get_mut(&Axis::Y) {
        y.extend(LONG_NAME, [Y_INDEX_LONG_NAME]);
    }

    let mut coordinates = BTreeMap::new();
    for (axis, criteria) in entries {
        let shared = Arc::new(criteria);
        if axis == Axis::T {
            coordinates.insert(TIME_ALIAS.to_string(), Arc::clone(&shared));
        }
        coordinates.insert(axis.key().to_string(), shared);
    }
    Ok(coordinates)
}

fn build_patterns(overlay: Option<&Overlay>) -> CriteriaResult<BTreeMap<String, Arc<NamePattern>>> {
    let mut sources: BTreeMap<String, String> = BUILTIN_PATTERNS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    if let Some(overlay) = overlay {
        let t_key = Axis::T.key();
        if overlay.patterns.contains_key(t_key) && overlay.patterns.contains_key(TIME_ALIAS) {
            return Err(CriteriaError::DuplicateAxis {
                section: "patterns".to_string(),
                key: t_key.to_string(),
                alias: TIME_ALIAS.to_string(),
            });
        }
        for (key, source) in &overlay.patterns {
            let key = match Axis::from_key(key)? {
                Axis::T => TIME_ALIAS,
                axis => axis.key(),
            };
            sources.insert(key.to_string(), source.clone());
        }
        if !overlay.patterns.is_empty() {
            info!(replaced = overlay.patterns.len(), "Applied overlay name patterns");
        }
    }

    let mut patterns = BTreeMap::new();
    for (key, source) in sources {
        let pattern = Arc::new(NamePattern::new(&key, &source)?);
        if key == TIME_ALIAS {
            patterns.insert(Axis::T.key().to_string(), Arc::clone(&pattern));
        }
        patterns.insert(key, pattern);
    }
    Ok(patterns)
}
