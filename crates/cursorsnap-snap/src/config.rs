use cursorsnap_base::{Error, Result, ensure_non_negative, ensure_positive};
use serde::{Deserialize, Serialize};

pub const VERTEX_RADIUS: f32 = 20.0;
pub const EDGE_RADIUS: f32 = 25.0;
pub const FACE_RADIUS: f32 = 20.0;

pub const OCCLUSION_EPSILON: f64 = 0.003;
pub const COINCIDENCE_EPSILON: f64 = 0.01;
pub const RETRY_OFFSET: f64 = 0.02;

pub const EDGE_SAMPLE_FACTORS: [f64; 3] = [0.25, 0.5, 0.75];
pub const FREE_SPACE_DISTANCE: f64 = 50.0;

/// How the curve tier chooses among points inside the radius.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveMatch {
    /// First point in collection order; earlier curves win.
    #[default]
    First,
    Nearest,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Pixels; a vertex must be strictly closer than this.
    pub vertex_radius: f32,
    pub edge_radius: f32,
    pub face_radius: f32,
    pub occlusion_epsilon: f64,
    pub coincidence_epsilon: f64,
    pub retry_offset: f64,
    pub edge_sample_factors: Vec<f64>,
    pub free_space_distance: f64,
    pub curve_match: CurveMatch,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            vertex_radius: VERTEX_RADIUS,
            edge_radius: EDGE_RADIUS,
            face_radius: FACE_RADIUS,
            occlusion_epsilon: OCCLUSION_EPSILON,
            coincidence_epsilon: COINCIDENCE_EPSILON,
            retry_offset: RETRY_OFFSET,
            edge_sample_factors: EDGE_SAMPLE_FACTORS.to_vec(),
            free_space_distance: FREE_SPACE_DISTANCE,
            curve_match: CurveMatch::First,
        }
    }
}

impl SnapConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("vertex_radius", f64::from(self.vertex_radius))?;
        ensure_non_negative("edge_radius", f64::from(self.edge_radius))?;
        ensure_non_negative("face_radius", f64::from(self.face_radius))?;
        ensure_non_negative("occlusion_epsilon", self.occlusion_epsilon)?;
        ensure_non_negative("coincidence_epsilon", self.coincidence_epsilon)?;
        ensure_non_negative("retry_offset", self.retry_offset)?;
        ensure_positive("free_space_distance", self.free_space_distance)?;

        if self.edge_sample_factors.is_empty() {
            return Err(Error::InvalidParameter(
                "edge_sample_factors must not be empty".to_string(),
            ));
        }
        if let Some(bad) = self
            .edge_sample_factors
            .iter()
            .find(|f| !(0.0..=1.0).contains(*f))
        {
            return Err(Error::InvalidParameter(format!(
                "edge sample factor {bad} is outside [0, 1]"
            )));
        }
        Ok(())
    }
}
