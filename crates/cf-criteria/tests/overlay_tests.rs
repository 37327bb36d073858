//! Tests for building criteria tables with a YAML overlay.

use std::io::Write;
use std::sync::Arc;

use cf_criteria::{CriteriaError, CriteriaTable, Overlay, LONG_NAME, STANDARD_NAME, UNITS};
use tempfile::NamedTempFile;

fn overlay(yaml: &str) -> Overlay {
    Overlay::from_yaml_str(yaml).unwrap()
}

// ============================================================================
// Coordinate overlays
// ============================================================================

#[test]
fn test_overlay_appends_units() {
    let table = CriteriaTable::with_overlay(&overlay(
        r#"
coordinates:
  latitude:
    units: [degrees_north_true, degrees_north]
"#,
    ))
    .unwrap();

    let units = table.coordinate_criteria("latitude").unwrap().values(UNITS).unwrap();
    assert_eq!(units.len(), 7);
    assert_eq!(units.last().unwrap(), "degrees_north_true");

    // Built-in table is untouched
    let builtin = CriteriaTable::global().coordinate_criteria("latitude").unwrap();
    assert!(!builtin.accepts(UNITS, "degrees_north_true"));
}

#[test]
fn test_overlay_standard_name_mirrors_into_long_name() {
    let table = CriteriaTable::with_overlay(&overlay(
        r#"
coordinates:
  X:
    standard_name: [x_index]
"#,
    ))
    .unwrap();

    let x = table.coordinate_criteria("X").unwrap();
    assert_eq!(x.values(STANDARD_NAME).unwrap().len(), 4);
    let long = x.values(LONG_NAME).unwrap();
    assert_eq!(long.len(), 5);
    assert_eq!(long[3], "x_index");
    assert_eq!(long[4], "cell index along first dimension");
}

#[test]
fn test_overlay_time_key_updates_shared_entry() {
    let table = CriteriaTable::with_overlay(&overlay(
        r#"
coordinates:
  time:
    standard_name: [forecast_reference_time]
"#,
    ))
    .unwrap();

    let time = table.coordinate_criteria("time").unwrap();
    let t = table.coordinate_criteria("T").unwrap();
    assert!(Arc::ptr_eq(time, t));
    assert!(t.accepts(STANDARD_NAME, "forecast_reference_time"));
    assert!(t.accepts(LONG_NAME, "forecast_reference_time"));
}

#[test]
fn test_overlay_new_attribute() {
    let table = CriteriaTable::with_overlay(&overlay(
        r#"
coordinates:
  vertical:
    units: [hPa, m]
"#,
    ))
    .unwrap();
    assert!(table.coordinate_criteria("vertical").unwrap().accepts(UNITS, "hPa"));
}

#[test]
fn test_overlay_rejects_long_name() {
    let result = CriteriaTable::with_overlay(&overlay(
        r#"
coordinates:
  Y:
    long_name: [row]
"#,
    ));
    assert!(matches!(
        result,
        Err(CriteriaError::ReservedAttribute { axis, attribute }) if axis == "Y" && attribute == "long_name"
    ));
}

#[test]
fn test_overlay_rejects_unknown_axis() {
    let result = CriteriaTable::with_overlay(&overlay(
        r#"
coordinates:
  depth:
    units: [m]
"#,
    ));
    assert!(matches!(result, Err(CriteriaError::UnknownAxis(key)) if key == "depth"));
}

// ============================================================================
// Role overlays
// ============================================================================

#[test]
fn test_overlay_adds_roles() {
    let table = CriteriaTable::with_overlay(&overlay("roles: [station_id, profile_id]")).unwrap();
    assert_eq!(table.cf_roles().count(), 6);
    let station = table.cf_role_criteria("station_id").unwrap();
    assert!(station.matches("cf_role", "station_id"));
}

// ============================================================================
// Pattern overlays
// ============================================================================

#[test]
fn test_overlay_replaces_pattern() {
    let table = CriteriaTable::with_overlay(&overlay(
        r#"
patterns:
  X: "x|i|col"
"#,
    ))
    .unwrap();
    let x = table.regex("X").unwrap();
    assert!(x.is_match("col"));
    assert!(!x.is_match("nlon"));
}

#[test]
fn test_overlay_t_pattern_keeps_alias() {
    let table = CriteriaTable::with_overlay(&overlay(
        r#"
patterns:
  T: "time|valid_time"
"#,
    ))
    .unwrap();
    let time = table.regex("time").unwrap();
    let t = table.regex("T").unwrap();
    assert!(Arc::ptr_eq(time, t));
    assert!(t.is_match("valid_time"));
    assert!(!t.is_match("t"));
}

#[test]
fn test_overlay_rejects_t_and_time_patterns() {
    let result = CriteriaTable::with_overlay(&overlay(
        r#"
patterns:
  T: "aaa"
  time: "bbb"
"#,
    ));
    assert!(matches!(
        result,
        Err(CriteriaError::DuplicateAxis { section, key, alias })
            if section == "patterns" && key == "T" && alias == "time"
    ));
}

#[test]
fn test_overlay_adds_vertical_pattern() {
    let table = CriteriaTable::with_overlay(&overlay(
        r#"
patterns:
  vertical: "plev|alt"
"#,
    ))
    .unwrap();
    assert!(table.regex("vertical").unwrap().is_match("plev"));
    assert_eq!(table.regex_keys().count(), 8);
}

#[test]
fn test_overlay_invalid_pattern() {
    let result = CriteriaTable::with_overlay(&overlay(
        r#"
patterns:
  latitude: "(lat"
"#,
    ));
    assert!(matches!(result, Err(CriteriaError::InvalidPattern { key, .. }) if key == "latitude"));
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_overlay_from_path() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "roles: [station_id]").unwrap();

    let loaded = Overlay::from_path(file.path()).unwrap();
    assert_eq!(loaded.roles, vec!["station_id".to_string()]);
}

#[test]
fn test_overlay_missing_file() {
    let result = Overlay::from_path("/nonexistent/criteria.yaml");
    assert!(matches!(result, Err(CriteriaError::Io(_))));
}

#[test]
fn test_overlay_invalid_yaml() {
    let result = Overlay::from_yaml_str("coordinates: [not, a, map]");
    assert!(matches!(result, Err(CriteriaError::Yaml(_))));
}

#[test]
fn test_empty_overlay_matches_builtin() {
    let table = CriteriaTable::with_overlay(&Overlay::default()).unwrap();
    assert_eq!(
        serde_json::to_value(&table).unwrap(),
        serde_json::to_value(CriteriaTable::global()).unwrap()
    );
}
