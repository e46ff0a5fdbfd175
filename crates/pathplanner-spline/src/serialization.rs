//! Serialization and deserialization of path files.
//!
//! A path is stored as a JSON document with the title, the description and
//! a flat record per control point in path order. Loading rebuilds the
//! linked sequence in array order and restores the stored derivatives
//! verbatim, including hand-edited tangents.

use pathplanner_core::{Error, PersistenceError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::spline::{Spline, DEFAULT_TITLE};

/// Complete path file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathFile {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub control_points: Vec<ControlPointRecord>,
}

/// Serialized control point
///
/// Position and time are required. Heading defaults to 0.0. The three
/// derivatives are either all present (restored as stored) or all absent
/// (recomputed from the neighbors after loading).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlPointRecord {
    #[serde(rename = "fieldX", default, skip_serializing_if = "Option::is_none")]
    pub field_x: Option<f64>,
    #[serde(rename = "fieldY", default, skip_serializing_if = "Option::is_none")]
    pub field_y: Option<f64>,
    #[serde(rename = "fieldHeading", default, skip_serializing_if = "Option::is_none")]
    pub field_heading: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    #[serde(rename = "derivativesEdited", default)]
    pub derivatives_edited: bool,
    #[serde(rename = "field_dX", default, skip_serializing_if = "Option::is_none")]
    pub field_dx: Option<f64>,
    #[serde(rename = "field_dY", default, skip_serializing_if = "Option::is_none")]
    pub field_dy: Option<f64>,
    #[serde(rename = "field_dHeading", default, skip_serializing_if = "Option::is_none")]
    pub field_dheading: Option<f64>,
}

/// Document shape used while parsing, so a bad record can be reported by
/// its index.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPathFile {
    #[serde(default = "default_title")]
    title: String,
    #[serde(default)]
    description: String,
    control_points: Vec<serde_json::Value>,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl PathFile {
    /// Capture the state of a spline.
    pub fn from_spline(spline: &Spline) -> Self {
        let control_points = spline
            .control_points()
            .map(|cp| ControlPointRecord {
                field_x: Some(cp.field_x()),
                field_y: Some(cp.field_y()),
                field_heading: Some(cp.field_heading()),
                time: Some(cp.time()),
                derivatives_edited: cp.location_derivatives_edited(),
                field_dx: Some(cp.d_x()),
                field_dy: Some(cp.d_y()),
                field_dheading: Some(cp.d_heading()),
            })
            .collect();
        Self {
            title: spline.title().to_string(),
            description: spline.description().to_string(),
            control_points,
        }
    }

    /// Rebuild a spline from this document.
    pub fn to_spline(&self) -> Result<Spline> {
        let mut spline = Spline::new();
        spline.set_title(self.title.clone());
        spline.set_description(self.description.clone());

        let mut previous_time: Option<f64> = None;
        let mut needs_defaults = Vec::new();
        for (index, record) in self.control_points.iter().enumerate() {
            let restored = record.validate(index)?;
            if let Some(previous) = previous_time {
                if restored.time <= previous {
                    return Err(malformed(
                        index,
                        format!(
                            "time {} does not follow previous time {}",
                            restored.time, previous
                        ),
                    ));
                }
            }
            previous_time = Some(restored.time);

            let idx = spline.append_restored(restored.time, |cp| {
                cp.field_x = restored.field_x;
                cp.field_y = restored.field_y;
                cp.field_heading = restored.field_heading;
                cp.location_derivatives_edited = restored.edited;
                if let Some((d_x, d_y, d_heading)) = restored.derivatives {
                    cp.d_x = d_x;
                    cp.d_y = d_y;
                    cp.d_heading = d_heading;
                }
            });
            if restored.derivatives.is_none() {
                needs_defaults.push(idx);
            }
        }

        // neighbors are all linked now, so default derivatives can be derived
        for idx in needs_defaults {
            spline.update_location_derivatives(idx);
            spline.update_heading_derivative(idx);
        }
        Ok(spline)
    }

    /// Parse a path document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawPathFile = serde_json::from_str(json).map_err(|e| {
            warn!("Rejected path document: {}", e);
            Error::from(PersistenceError::document(e.to_string()))
        })?;
        let control_points = raw
            .control_points
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                serde_json::from_value::<ControlPointRecord>(value)
                    .map_err(|e| malformed(index, e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            title: raw.title,
            description: raw.description,
            control_points,
        })
    }

    /// Encode this document. Non-finite numbers would be written as `null`,
    /// so they are rejected here.
    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        self.check_finite()?;
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    fn check_finite(&self) -> Result<()> {
        for (index, record) in self.control_points.iter().enumerate() {
            for (key, value) in [
                ("fieldX", record.field_x),
                ("fieldY", record.field_y),
                ("fieldHeading", record.field_heading),
                ("time", record.time),
                ("field_dX", record.field_dx),
                ("field_dY", record.field_dy),
                ("field_dHeading", record.field_dheading),
            ] {
                if let Some(v) = value {
                    finite(index, key, v)?;
                }
            }
        }
        Ok(())
    }

    /// Save path to file
    pub fn save_to_file(&self, path: impl AsRef<Path>, pretty: bool) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json_string(pretty)?)?;
        info!(
            "Saved path '{}' ({} control points) to {}",
            self.title,
            self.control_points.len(),
            path.display()
        );
        Ok(())
    }

    /// Load path from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let file = Self::from_json_str(&content)?;
        info!(
            "Loaded path '{}' ({} control points) from {}",
            file.title,
            file.control_points.len(),
            path.display()
        );
        Ok(file)
    }
}

impl Spline {
    /// Save this path as a JSON path file.
    pub fn save_to_file(&self, path: impl AsRef<Path>, pretty: bool) -> Result<()> {
        PathFile::from_spline(self).save_to_file(path, pretty)
    }

    /// Load a path from a JSON path file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Spline> {
        PathFile::load_from_file(path)?.to_spline()
    }
}

/// A record that has passed validation.
struct RestoredPoint {
    field_x: f64,
    field_y: f64,
    field_heading: f64,
    time: f64,
    edited: bool,
    derivatives: Option<(f64, f64, f64)>,
}

impl ControlPointRecord {
    fn validate(&self, index: usize) -> Result<RestoredPoint> {
        let field_x = required(index, "fieldX", self.field_x)?;
        let field_y = required(index, "fieldY", self.field_y)?;
        let time = required(index, "time", self.time)?;
        let field_heading = finite(index, "fieldHeading", self.field_heading.unwrap_or(0.0))?;

        let derivatives = match (self.field_dx, self.field_dy, self.field_dheading) {
            (Some(d_x), Some(d_y), Some(d_heading)) => Some((
                finite(index, "field_dX", d_x)?,
                finite(index, "field_dY", d_y)?,
                finite(index, "field_dHeading", d_heading)?,
            )),
            (None, None, None) => None,
            _ => {
                return Err(malformed(
                    index,
                    "derivatives must be given together (field_dX, field_dY, field_dHeading)",
                ))
            }
        };
        if self.derivatives_edited && derivatives.is_none() {
            return Err(malformed(index, "edited tangent has no stored derivatives"));
        }

        Ok(RestoredPoint {
            field_x,
            field_y,
            field_heading,
            time,
            edited: self.derivatives_edited,
            derivatives,
        })
    }
}

fn required(index: usize, key: &str, value: Option<f64>) -> Result<f64> {
    match value {
        Some(v) => finite(index, key, v),
        None => Err(malformed(index, format!("missing '{}'", key))),
    }
}

fn finite(index: usize, key: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(malformed(index, format!("'{}' is not a finite number", key)))
    }
}

fn malformed(index: usize, reason: impl Into<String>) -> Error {
    let err = PersistenceError::record(index, reason);
    warn!("{}", err);
    err.into()
}
