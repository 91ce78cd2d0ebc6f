use cursorsnap_base::{Transform, Vec3};
use serde::{Deserialize, Serialize};

use crate::curve::CurveData;
use crate::mesh::MeshData;
use crate::modifier::Modifier;
use crate::{Error, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectMode {
    #[default]
    Object,
    Edit,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectTransform {
    pub location: Vec3,
    /// XYZ euler angles in degrees.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self {
            location: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl ObjectTransform {
    pub fn at(location: Vec3) -> Self {
        Self {
            location,
            ..Self::default()
        }
    }

    pub fn matrix(&self) -> Transform {
        Transform::from_location_rotation_scale(self.location, self.rotation, self.scale)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectData {
    Mesh(MeshData),
    Curve(CurveData),
}

fn default_visible() -> bool {
    true
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub mode: ObjectMode,
    #[serde(default)]
    pub transform: ObjectTransform,
    pub data: ObjectData,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, data: ObjectData) -> Self {
        Self {
            name: name.into(),
            visible: true,
            mode: ObjectMode::Object,
            transform: ObjectTransform::default(),
            data,
            modifiers: Vec::new(),
        }
    }

    pub fn mesh(name: impl Into<String>, mesh: MeshData) -> Self {
        Self::new(name, ObjectData::Mesh(mesh))
    }

    pub fn curve(name: impl Into<String>, curve: CurveData) -> Self {
        Self::new(name, ObjectData::Curve(curve))
    }

    pub fn with_transform(mut self, transform: ObjectTransform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn with_mode(mut self, mode: ObjectMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn is_editing(&self) -> bool {
        self.mode == ObjectMode::Edit
    }

    pub fn validate(&self) -> Result<()> {
        match &self.data {
            ObjectData::Mesh(mesh) => mesh.validate()?,
            ObjectData::Curve(curve) => {
                curve.validate()?;
                if !self.modifiers.is_empty() {
                    return Err(Error::InvalidModifier(format!(
                        "curve object '{}' cannot carry mesh modifiers",
                        self.name
                    )));
                }
            }
        }
        for modifier in &self.modifiers {
            modifier.validate()?;
        }
        Ok(())
    }
}
