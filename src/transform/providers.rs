//! Built-in transform providers
//!
//! Three capabilities cover the usual deployments: a transform utility
//! supplied by the host viewer, the EPSG definitions compiled into the
//! projection library, and proj-strings registered through configuration.

use crate::core::crs::CrsRegistry;
use crate::core::geo::CoordinatePair;
use crate::transform::TransformProvider;
use crate::{FinderError, Result};
use proj4rs::proj::Proj;
use proj4rs::transform::transform;
use std::sync::Arc;

/// Signature of a host-supplied transform utility
pub type HostTransformFn =
    Arc<dyn Fn(CoordinatePair, &str, &str) -> Option<CoordinatePair> + Send + Sync>;

/// Delegates to the transform utility exposed by the host viewer
pub struct HostTransform {
    func: HostTransformFn,
}

impl HostTransform {
    pub fn new(func: HostTransformFn) -> Self {
        Self { func }
    }
}

impl TransformProvider for HostTransform {
    fn name(&self) -> &str {
        "host utility"
    }

    fn transform(&self, pair: CoordinatePair, from: &str, to: &str) -> Result<CoordinatePair> {
        (self.func)(pair, from, to).ok_or_else(|| {
            FinderError::Transform(format!("host utility could not convert {from} to {to}")).into()
        })
    }
}

/// Runs a pair through two resolved projections.
///
/// proj4rs works in radians on geographic systems, so degrees are converted
/// on the way in and back on the way out.
fn project_between(src: &Proj, dst: &Proj, pair: CoordinatePair) -> Result<CoordinatePair> {
    let mut point = (pair.x, pair.y, 0.0);
    if src.is_latlong() {
        point.0 = point.0.to_radians();
        point.1 = point.1.to_radians();
    }
    transform(src, dst, &mut point).map_err(|e| FinderError::Transform(e.to_string()))?;
    let (mut x, mut y) = (point.0, point.1);
    if dst.is_latlong() {
        x = x.to_degrees();
        y = y.to_degrees();
    }
    Ok(CoordinatePair::new(x, y))
}

/// Resolves codes against the EPSG definitions compiled into proj4rs
pub struct EpsgTransform;

impl EpsgTransform {
    fn projection(code: &str) -> Result<Proj> {
        let number = code
            .trim()
            .to_ascii_uppercase()
            .strip_prefix("EPSG:")
            .and_then(|digits| digits.parse::<u16>().ok())
            .ok_or_else(|| FinderError::Transform(format!("{code} is not an EPSG code")))?;
        Proj::from_epsg_code(number).map_err(|e| {
            FinderError::Transform(format!("no built-in definition for {code}: {e}")).into()
        })
    }
}

impl TransformProvider for EpsgTransform {
    fn name(&self) -> &str {
        "built-in EPSG definitions"
    }

    fn transform(&self, pair: CoordinatePair, from: &str, to: &str) -> Result<CoordinatePair> {
        let src = Self::projection(from)?;
        let dst = Self::projection(to)?;
        project_between(&src, &dst, pair)
    }
}

/// Resolves codes against proj-strings registered in the widget's registry
pub struct RegisteredDefs {
    registry: Arc<CrsRegistry>,
}

impl RegisteredDefs {
    pub fn new(registry: Arc<CrsRegistry>) -> Self {
        Self { registry }
    }

    fn projection(&self, code: &str) -> Result<Proj> {
        let def = self.registry.definition(code).ok_or_else(|| {
            FinderError::Transform(format!("no registered definition for {code}"))
        })?;
        Proj::from_proj_string(def)
            .map_err(|e| FinderError::Transform(format!("definition for {code} rejected: {e}")).into())
    }
}

impl TransformProvider for RegisteredDefs {
    fn name(&self) -> &str {
        "registered definitions"
    }

    fn transform(&self, pair: CoordinatePair, from: &str, to: &str) -> Result<CoordinatePair> {
        let src = self.projection(from)?;
        let dst = self.projection(to)?;
        project_between(&src, &dst, pair)
    }
}
