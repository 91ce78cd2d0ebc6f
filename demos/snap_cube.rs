//! Sweeps a row of pointer positions across the demo scene and prints which
//! tier each one snaps to.

use cursorsnap_base::pos2;
use cursorsnap_scene::demo_scene;
use cursorsnap_snap::SnapConfig;

fn main() {
    let scene = demo_scene();
    let snapshot = scene.snapshot();
    let config = SnapConfig::default();
    let snapper = snapshot.snapper(&config);

    let viewport = scene.view.viewport;
    let y = viewport.center().y;
    for step in 0..=16 {
        let x = viewport.min.x + viewport.width() * step as f32 / 16.0;
        let hit = snapper.resolve(pos2(x, y));
        println!(
            "({x:7.1}, {y:5.1}) -> {:<12} [{:8.3} {:8.3} {:8.3}]",
            format!("{:?}", hit.kind),
            hit.position.x,
            hit.position.y,
            hit.position.z
        );
    }
}
