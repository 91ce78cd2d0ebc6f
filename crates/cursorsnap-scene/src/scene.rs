use std::path::Path;

use cursorsnap_base::Vec3;
use cursorsnap_snap::ObjectId;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::object::SceneObject;
use crate::snapshot::SceneSnapshot;
use crate::view::View;
use crate::Result;

/// Objects in registration order, the active view and the 3D cursor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub objects: Vec<SceneObject>,
    pub view: View,
    #[serde(default)]
    pub cursor: Vec3,
}

impl Scene {
    pub fn new(view: View) -> Self {
        Self {
            objects: Vec::new(),
            view,
            cursor: Vec3::ZERO,
        }
    }

    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    pub fn cursor(&self) -> Vec3 {
        self.cursor
    }

    pub fn set_cursor(&mut self, position: Vec3) {
        self.cursor = position;
    }

    pub fn validate(&self) -> Result<()> {
        self.view.validate()?;
        for object in &self.objects {
            object.validate()?;
        }
        Ok(())
    }

    pub fn snapshot(&self) -> SceneSnapshot<'_> {
        SceneSnapshot::evaluate(self)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let scene: Scene = serde_json::from_str(text)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let scene = Self::from_json(&std::fs::read_to_string(path)?)?;
        debug!(path = %path.display(), objects = scene.objects.len(), "scene loaded");
        Ok(scene)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
