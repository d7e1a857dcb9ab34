use seamap::core::geo::format_f11;
use seamap::prelude::*;

/// Example of driving the full viewport pipeline without any UI: gestures
/// in, tile sink mutations and extent notifications out.
fn main() -> seamap::Result<()> {
    env_logger::init();

    println!("🗺️ Seamap Headless Example");
    println!("==========================");

    let config = MapConfig::default();
    let canvas = Point::new(1024.0, 768.0);
    let mut map = Map::new(config, canvas)?;
    let mut sink = RecordingSink::default();

    map.render(&mut sink)?;
    println!("✅ Map created:");
    println!("   Canvas: {}x{}", canvas.x, canvas.y);
    println!("   Fit scale: {}", map.viewport().scale());
    println!("   Tiles attached: {}", sink.tiles.len());

    // Zoom towards a harbour with the wheel
    println!("\n🔍 Wheel-zooming towards the upper-left quadrant:");
    for _ in 0..3 {
        map.handle_gesture(
            &GestureEvent::Wheel {
                delta_y: -1.0,
                position: Point::new(300.0, 200.0),
            },
            &mut sink,
        )?;
        println!(
            "   k={:<6} tiles={} (inserts so far {})",
            map.viewport().scale(),
            sink.tiles.len(),
            sink.total_inserts
        );
    }

    // Drag the view around
    println!("\n🚀 Dragging east-southeast:");
    map.handle_gesture(
        &GestureEvent::DragStart {
            position: Point::new(500.0, 400.0),
        },
        &mut sink,
    )?;
    for _ in 0..5 {
        map.handle_gesture(
            &GestureEvent::DragMove {
                dx: -120.0,
                dy: -60.0,
            },
            &mut sink,
        )?;
    }
    map.handle_gesture(&GestureEvent::DragEnd, &mut sink)?;

    let extent = map.viewport().extent();
    println!(
        "   Visible world rect: ({:.0}, {:.0}) - ({:.0}, {:.0})",
        extent.min.x, extent.min.y, extent.max.x, extent.max.y
    );

    // Jump to an F11 position the way the "go to" dialog does
    let f11 = GamePoint::new(-65_000.0, 12_000.0);
    println!(
        "\n📍 Jumping to F11 ({}, {}):",
        format_f11(f11.x),
        format_f11(f11.y)
    );
    let world = game_to_world(f11);
    map.zoom_and_pan_to(world, None, &mut sink)?;
    println!("   World point: ({:.1}, {:.1})", world.x, world.y);
    println!("   Scale: {}", map.viewport().scale());
    println!("   Tiles attached: {}", sink.tiles.len());

    println!("\n📊 Final sink state:");
    if let Some((translate, scale)) = sink.group_transform {
        println!(
            "   Group transform: translate({:.1}, {:.1}) scale({})",
            translate.x, translate.y, scale
        );
    }
    println!(
        "   Lifetime mutations: +{} -{}",
        sink.total_inserts, sink.total_removes
    );

    println!("\n✅ Headless example completed successfully!");
    Ok(())
}
