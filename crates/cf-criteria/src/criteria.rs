//! Attribute criteria for coordinate axes.
//!
//! Each axis maps attribute names to the literal values that mark a variable
//! as belonging to that axis. Values follow the CF conventions plus a few
//! netCDF-Java (`_CoordinateAxisType`), COARDS (`cartesian_axis`) and GrADS
//! (`grads_dim`) spellings seen in the wild.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::axis::Axis;

pub const STANDARD_NAME: &str = "standard_name";
pub const LONG_NAME: &str = "long_name";
pub const UNITS: &str = "units";
pub const AXIS: &str = "axis";
pub const POSITIVE: &str = "positive";
pub const COORDINATE_AXIS_TYPE: &str = "_CoordinateAxisType";
pub const CARTESIAN_AXIS: &str = "cartesian_axis";
pub const GRADS_DIM: &str = "grads_dim";

/// Extra `long_name` phrase for X, appended after the standard names.
pub const X_INDEX_LONG_NAME: &str = "cell index along first dimension";
/// Extra `long_name` phrase for Y, appended after the standard names.
pub const Y_INDEX_LONG_NAME: &str = "cell index along second dimension";

/// Attribute name → acceptable values for one axis.
///
/// Value order is insertion order and carries no meaning for matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttributeCriteria {
    attributes: BTreeMap<String, Vec<String>>,
}

impl AttributeCriteria {
    fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`AttributeCriteria::extend`].
    fn with(mut self, attribute: &str, values: &[&str]) -> Self {
        self.extend(attribute, values.iter().copied());
        self
    }

    /// Append values to an attribute, creating it if absent.
    ///
    /// Returns the values that were already present and therefore skipped.
    pub(crate) fn extend<I, S>(&mut self, attribute: &str, values: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = self.attributes.entry(attribute.to_string()).or_default();
        let mut skipped = Vec::new();
        for value in values {
            let value = value.into();
            if list.contains(&value) {
                skipped.push(value);
            } else {
                list.push(value);
            }
        }
        skipped
    }

    /// Copy the current `standard_name` list into `long_name`.
    pub(crate) fn mirror_long_name(&mut self) {
        if let Some(standard) = self.attributes.get(STANDARD_NAME).cloned() {
            self.attributes.insert(LONG_NAME.to_string(), standard);
        }
    }

    /// Acceptable values for an attribute, if the axis uses it.
    pub fn values(&self, attribute: &str) -> Option<&[String]> {
        self.attributes.get(attribute).map(Vec::as_slice)
    }

    /// Check whether `value` is an acceptable value of `attribute`.
    pub fn accepts(&self, attribute: &str, value: &str) -> bool {
        self.values(attribute)
            .is_some_and(|values| values.iter().any(|v| v == value))
    }

    /// Attribute names used by this axis, sorted.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }
}

/// Literal criteria for one axis, before `long_name` is derived.
pub(crate) fn builtin_criteria(axis: Axis) -> AttributeCriteria {
    match axis {
        Axis::Latitude => AttributeCriteria::new()
            .with(STANDARD_NAME, &["latitude"])
            .with(
                UNITS,
                &[
                    "degree_north",
                    "degree_N",
                    "degreeN",
                    "degrees_north",
                    "degrees_N",
                    "degreesN",
                ],
            )
            .with(COORDINATE_AXIS_TYPE, &["Lat"]),
        Axis::Longitude => AttributeCriteria::new()
            .with(STANDARD_NAME, &["longitude"])
            .with(
                UNITS,
                &[
                    "degree_east",
                    "degree_E",
                    "degreeE",
                    "degrees_east",
                    "degrees_E",
                    "degreesE",
                ],
            )
            .with(COORDINATE_AXIS_TYPE, &["Lon"]),
        Axis::Z => AttributeCriteria::new()
            .with(
                STANDARD_NAME,
                &[
                    "model_level_number",
                    "atmosphere_ln_pressure_coordinate",
                    "atmosphere_sigma_coordinate",
                    "atmosphere_hybrid_sigma_pressure_coordinate",
                    "atmosphere_hybrid_height_coordinate",
                    "atmosphere_sleve_coordinate",
                    "ocean_sigma_coordinate",
                    "ocean_s_coordinate",
                    "ocean_s_coordinate_g1",
                    "ocean_s_coordinate_g2",
                    "ocean_sigma_z_coordinate",
                    "ocean_double_sigma_coordinate",
                ],
            )
            .with(COORDINATE_AXIS_TYPE, &["GeoZ", "Height", "Pressure"])
            .with(AXIS, &["Z"])
            .with(CARTESIAN_AXIS, &["Z"])
            .with(GRADS_DIM, &["z"]),
        Axis::Vertical => AttributeCriteria::new()
            .with(
                STANDARD_NAME,
                &[
                    "air_pressure",
                    "height",
                    "depth",
                    "geopotential_height",
                    // computed dimensional coordinate name
                    "altitude",
                    "height_above_geopotential_datum",
                    "height_above_reference_ellipsoid",
                    "height_above_mean_sea_level",
                ],
            )
            .with(POSITIVE, &["up", "down"]),
        Axis::X => AttributeCriteria::new()
            .with(
                STANDARD_NAME,
                &[
                    "projection_x_coordinate",
                    "grid_longitude",
                    "projection_x_angular_coordinate",
                ],
            )
            .with(COORDINATE_AXIS_TYPE, &["GeoX"])
            .with(AXIS, &["X"])
            .with(CARTESIAN_AXIS, &["X"])
            .with(GRADS_DIM, &["x"]),
        Axis::Y => AttributeCriteria::new()
            .with(
                STANDARD_NAME,
                &[
                    "projection_y_coordinate",
                    "grid_latitude",
                    "projection_y_angular_coordinate",
                ],
            )
            .with(COORDINATE_AXIS_TYPE, &["GeoY"])
            .with(AXIS, &["Y"])
            .with(CARTESIAN_AXIS, &["Y"])
            .with(GRADS_DIM, &["y"]),
        Axis::T => AttributeCriteria::new()
            .with(STANDARD_NAME, &["time"])
            .with(COORDINATE_AXIS_TYPE, &["Time"])
            .with(AXIS, &["T"])
            .with(CARTESIAN_AXIS, &["T"])
            .with(GRADS_DIM, &["t"]),
    }
}
