use crate::{rendering::context::RenderContext, traits::PathProjection, Result};

// LayerTrait is the overlay capability set from the shared traits
pub use crate::traits::LayerOperations as LayerTrait;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerType {
    Vector,
    Custom,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerType::Vector => write!(f, "vector"),
            LayerType::Custom => write!(f, "custom"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LayerProperties {
    pub id: String,
    pub name: String,
    pub layer_type: LayerType,
    pub z_index: i32,
    pub opacity: f32,
    pub visible: bool,
    pub options: serde_json::Value,
    /// Set between `on_add` and `on_remove`
    pub attached: bool,
    /// A redraw was requested and the host has not picked it up yet
    pub redraw_requested: bool,
}

impl LayerProperties {
    pub fn new(id: String, name: String, layer_type: LayerType) -> Self {
        Self {
            id,
            name,
            layer_type,
            z_index: 0,
            opacity: 1.0,
            visible: true,
            options: serde_json::Value::Null,
            attached: false,
            redraw_requested: false,
        }
    }
}

impl Default for LayerProperties {
    fn default() -> Self {
        Self::new(
            "default".to_string(),
            "Default Layer".to_string(),
            LayerType::Custom,
        )
    }
}

/// A layer that draws nothing; useful as a placeholder in a map's stack
pub struct BaseLayer {
    pub properties: LayerProperties,
}

impl BaseLayer {
    pub fn new(properties: LayerProperties) -> Self {
        Self { properties }
    }
}

impl LayerTrait for BaseLayer {
    crate::impl_layer_trait!(BaseLayer, properties);
    crate::impl_basic_options!(properties);

    fn on_add(&mut self, _projection: &dyn PathProjection) -> Result<()> {
        self.properties.attached = true;
        Ok(())
    }

    fn on_remove(&mut self, _projection: &dyn PathProjection) -> Result<()> {
        self.properties.attached = false;
        Ok(())
    }

    fn render(
        &mut self,
        _context: &mut RenderContext,
        _projection: &dyn PathProjection,
    ) -> Result<()> {
        Ok(())
    }
}
