use mapcircle::{
    core::{geo::LatLng, geo::Point, map::MapOptions},
    layers::circle::CircleOverlay,
    CircleOptions, Map, RendererKind, Viewport,
};

/// Headless run: place a few circles, render them for both backends and
/// print the resulting path data.
fn main() -> mapcircle::Result<()> {
    env_logger::init();

    println!("Mapcircle Headless Example");
    println!("==========================");

    let center = LatLng::new(51.5074, -0.1278); // London
    let size = Point::new(1024.0, 768.0);

    for renderer in [RendererKind::Svg, RendererKind::Vml] {
        let options = MapOptions {
            renderer,
            ..MapOptions::default()
        };
        let mut map = Map::with_options(Viewport::new(center, 12.0, size), options);

        let limits = CircleOptions::default().with_limits(50.0, 5_000.0);
        map.add_layer(Box::new(CircleOverlay::new(
            "city",
            center,
            1_500.0,
            limits.clone(),
        )))?;
        map.add_layer(Box::new(CircleOverlay::new(
            "greenwich",
            (51.4769, -0.0005),
            20_000.0,
            limits,
        )))?;
        map.add_layer(Box::new(CircleOverlay::new(
            "paris",
            (48.8566, 2.3522),
            800.0,
            CircleOptions::default(),
        )))?;

        println!("\n{} renderer, clip padding {}", renderer, map.viewport().clip_padding);
        if let Some(bounds) = map.layers_bounds() {
            println!(
                "   overlays span ({:.4}, {:.4}) to ({:.4}, {:.4})",
                bounds.south_west.lat,
                bounds.south_west.lng,
                bounds.north_east.lat,
                bounds.north_east.lng
            );
        }
        for path in map.render()? {
            if path.is_empty() {
                println!("   {:<10} culled", path.layer_id);
            } else {
                println!("   {:<10} {}", path.layer_id, path.data);
            }
        }

        if let Some(greenwich) = map.layer_as::<CircleOverlay>("greenwich") {
            println!(
                "   greenwich circle covers the city center: {}",
                greenwich.contains(&center)
            );
        }

        // Move the city circle; only it is re-projected on the next pass
        if let Some(circle) = map.layer_as_mut::<CircleOverlay>("city") {
            circle.set_lat_lng((51.52, -0.10)).set_radius(10_000.0);
        }
        for path in map.render()? {
            println!("   {:<10} {} (radius clamped)", path.layer_id, path.data);
        }
    }

    Ok(())
}
