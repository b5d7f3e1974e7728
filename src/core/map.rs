use crate::{
    core::{
        geo::{LatLng, LatLngBounds, Point},
        viewport::Viewport,
    },
    layers::base::LayerTrait,
    prelude::HashMap,
    rendering::{
        context::{RenderContext, RenderedPath},
        path::RendererKind,
    },
    spatial::index::{SpatialIndex, SpatialItem},
    Error, Result,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    /// Backend that consumes the emitted paths
    pub renderer: RendererKind,
    /// Overrides the backend's default clip padding
    pub clip_padding: Option<f64>,
    pub min_zoom: Option<f64>,
    pub max_zoom: Option<f64>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            renderer: RendererKind::Svg,
            clip_padding: None,
            min_zoom: None,
            max_zoom: None,
        }
    }
}

/// Minimal host for overlays: owns the view, the overlays and the render
/// context, and runs render passes.
pub struct Map {
    pub viewport: Viewport,
    layers: HashMap<String, Box<dyn LayerTrait>>,
    /// Layer ids sorted by z-index
    render_order: Vec<String>,
    /// Geographic bounds of every overlay, refreshed when it redraws
    index: SpatialIndex<()>,
    context: RenderContext,
    /// Set by view changes; every layer is re-rendered on the next pass
    view_changed: bool,
    options: MapOptions,
}

impl Map {
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self::with_options(Viewport::new(center, zoom, size), MapOptions::default())
    }

    pub fn with_options(mut viewport: Viewport, options: MapOptions) -> Self {
        if let Some(min) = options.min_zoom {
            viewport.min_zoom = min;
        }
        if let Some(max) = options.max_zoom {
            viewport.max_zoom = max;
        }
        viewport.set_zoom(viewport.zoom);
        viewport.set_clip_padding(
            options
                .clip_padding
                .unwrap_or_else(|| options.renderer.clip_padding()),
        );

        Self {
            viewport,
            layers: HashMap::default(),
            render_order: Vec::new(),
            index: SpatialIndex::new(),
            context: RenderContext::new(options.renderer),
            view_changed: true,
            options,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn renderer(&self) -> RendererKind {
        self.context.renderer_kind()
    }

    /// Adds a layer and runs its `on_add`
    pub fn add_layer(&mut self, mut layer: Box<dyn LayerTrait>) -> Result<()> {
        let layer_id = layer.id().to_string();
        if self.layers.contains_key(&layer_id) {
            return Err(Error::Layer(format!("layer {layer_id} is already on the map")).into());
        }

        let bounds = layer.bounds();
        if let Some(bounds) = bounds.as_ref().filter(|b| !b.is_finite()) {
            return Err(Error::InvalidCoordinates(format!(
                "layer {layer_id} has non-finite bounds {bounds:?}"
            ))
            .into());
        }

        layer.on_add(&self.viewport)?;
        if let Some(bounds) = bounds {
            self.index
                .insert(SpatialItem::new(layer_id.clone(), bounds, ()));
        }

        let z_index = layer.z_index();
        self.layers.insert(layer_id.clone(), layer);

        let insert_pos = self
            .render_order
            .iter()
            .position(|id| {
                self.layers
                    .get(id)
                    .map(|l| l.z_index() > z_index)
                    .unwrap_or(false)
            })
            .unwrap_or(self.render_order.len());
        self.render_order.insert(insert_pos, layer_id.clone());

        log::info!("added layer {layer_id}");
        Ok(())
    }

    /// Removes a layer after running its `on_remove`.
    /// If `on_remove` fails the layer stays on the map.
    pub fn remove_layer(&mut self, layer_id: &str) -> Result<Option<Box<dyn LayerTrait>>> {
        let Some(layer) = self.layers.get_mut(layer_id) else {
            return Ok(None);
        };
        layer.on_remove(&self.viewport)?;

        let removed = self.layers.remove(layer_id);
        self.render_order.retain(|id| id != layer_id);
        self.index.remove(layer_id);

        log::info!("removed layer {layer_id}");
        Ok(removed)
    }

    /// Gets a reference to a layer by ID
    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layers.get(layer_id).map(|l| l.as_ref())
    }

    /// Applies a function to a specific layer mutably
    pub fn with_layer_mut<F, R>(&mut self, layer_id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut dyn LayerTrait) -> R,
    {
        self.layers.get_mut(layer_id).map(|layer| f(layer.as_mut()))
    }

    /// Downcasts a layer to its concrete type
    pub fn layer_as<T: 'static>(&self, layer_id: &str) -> Option<&T> {
        self.layers
            .get(layer_id)
            .and_then(|l| l.as_any().downcast_ref::<T>())
    }

    /// Mutable downcast of a layer to its concrete type
    pub fn layer_as_mut<T: 'static>(&mut self, layer_id: &str) -> Option<&mut T> {
        self.layers
            .get_mut(layer_id)
            .and_then(|l| l.as_any_mut().downcast_mut::<T>())
    }

    /// Layer ids in render order
    pub fn list_layers(&self) -> Vec<String> {
        self.render_order.clone()
    }

    pub fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<()> {
        if !center.lat.is_finite() || !center.lng.is_finite() || !zoom.is_finite() {
            return Err(Error::InvalidCoordinates(format!(
                "cannot set view to ({}, {}) at zoom {}",
                center.lat, center.lng, zoom
            ))
            .into());
        }

        let old_center = self.viewport.center;
        let old_zoom = self.viewport.zoom;
        self.viewport.set_center(center);
        self.viewport.set_zoom(zoom);

        if self.viewport.center != old_center || self.viewport.zoom != old_zoom {
            self.view_changed = true;
        }
        Ok(())
    }

    pub fn set_size(&mut self, size: Point) {
        if self.viewport.size != size {
            self.viewport.set_size(size);
            self.view_changed = true;
        }
    }

    /// Whether the next `render` has anything to do
    pub fn needs_render(&self) -> bool {
        self.view_changed
    }

    /// Runs a render pass.
    ///
    /// After a view change every layer is projected again; otherwise only
    /// layers that asked for a redraw are. Returns the paths produced this
    /// pass, in render order.
    pub fn render(&mut self) -> Result<&[RenderedPath]> {
        self.context.clear();
        let full_pass = std::mem::take(&mut self.view_changed);

        for layer_id in &self.render_order {
            let Some(layer) = self.layers.get_mut(layer_id) else {
                continue;
            };

            let requested = layer.take_redraw();
            if !(full_pass || requested) {
                continue;
            }

            if requested {
                match layer.bounds() {
                    Some(bounds) if bounds.is_finite() => self
                        .index
                        .insert(SpatialItem::new(layer_id.clone(), bounds, ())),
                    Some(bounds) => {
                        log::warn!("dropping layer {layer_id} from the index: bounds {bounds:?}");
                        self.index.remove(layer_id);
                    }
                    None => {
                        self.index.remove(layer_id);
                    }
                }
            }

            if layer.is_visible() {
                layer.render(&mut self.context, &self.viewport)?;
            }
        }

        log::debug!(
            "render pass ({}): {} paths",
            if full_pass { "full" } else { "partial" },
            self.context.drawing_queue.len()
        );
        Ok(&self.context.drawing_queue)
    }

    /// Ids of layers whose geographic bounds intersect `bounds`
    pub fn layers_in_bounds(&self, bounds: &LatLngBounds) -> Vec<String> {
        let mut ids: Vec<String> = self
            .index
            .query(bounds)
            .into_iter()
            .map(|item| item.id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Union of the bounds of every layer that has bounds
    pub fn layers_bounds(&self) -> Option<LatLngBounds> {
        self.index.bounds()
    }
}
