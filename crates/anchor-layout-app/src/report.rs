//! Terminal summary of the scene after a demo run

use std::fmt::Write;

use anchor_layout::scene::EntityState;
use anchor_layout::{EntityId, Geometry, PlacementSession};
use crossterm::style::Stylize;

use crate::DemoRun;

/// Role of an entity within the session
fn role(session: &PlacementSession, id: EntityId) -> &'static str {
    if session.auxiliary() == Some(id) {
        return "auxiliary";
    }
    for slot in session.slots() {
        if slot.marker == id {
            return "marker";
        }
        if slot.connector == Some(id) {
            return "connector";
        }
    }
    "unowned"
}

fn describe_geometry(geometry: Option<Geometry>) -> String {
    match geometry {
        Some(Geometry::Sphere { radius }) => format!("sphere r={radius:.3}"),
        Some(Geometry::Cylinder { radius, height }) => {
            format!("cylinder r={radius:.3} h={height:.3}")
        }
        Some(Geometry::Plane { width, height }) => format!("plane {width:.2}x{height:.2}"),
        None => "no geometry".to_string(),
    }
}

fn entity_line(out: &mut String, session: &PlacementSession, id: EntityId, state: &EntityState) {
    let swatch = match &state.material {
        Some(material) => format!("{}", "■".with(material.color.to_crossterm())),
        None => " ".to_string(),
    };
    let visibility = if state.visible {
        "visible".green()
    } else {
        "hidden".dark_grey()
    };
    let p = state.position;
    let _ = writeln!(
        out,
        "  {swatch} {:>5} {:<10} ({:>7.3}, {:>7.3}, {:>7.3})  {:<28} {}",
        id.to_string(),
        role(session, id),
        p.x,
        p.y,
        p.z,
        describe_geometry(state.geometry),
        visibility
    );
}

/// Render the final session state and every scene entity
pub fn render(run: &DemoRun) -> String {
    let mut out = String::new();
    let stats = run.stats;

    let _ = writeln!(out, "{}", "Anchor layout".bold());
    let _ = writeln!(
        out,
        "  state: {:?}  markers: {}  entities: {}",
        run.session.state(),
        run.session.slots().len(),
        run.scene.len()
    );
    let _ = writeln!(
        out,
        "  signals: {} spawned, {} repositioned, {} lost, {} rejected",
        stats.spawned, stats.repositioned, stats.lost, stats.rejected
    );

    if run.scene.is_empty() {
        let _ = writeln!(out, "  {}", "(scene is empty)".dark_grey());
        return out;
    }

    let _ = writeln!(out);
    for (id, state) in run.scene.entities() {
        entity_line(&mut out, &run.session, id, state);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{run, Feed};
    use anchor_layout::{LayoutConfig, Preset};
    use std::time::Duration;

    #[tokio::test]
    async fn test_report_lists_every_entity() {
        let demo = run(LayoutConfig::preset(Preset::Hemisphere), &Feed::Scripted, Duration::ZERO)
            .await
            .unwrap();
        let report = render(&demo);

        assert!(report.contains("state: Active"));
        assert!(report.contains("1 rejected"));
        assert_eq!(report.matches("marker ").count(), 10);
        assert_eq!(report.matches("connector").count(), 10);
        assert_eq!(report.matches("auxiliary").count(), 1);
        assert!(report.contains("plane 0.60x0.90"));
    }

    #[test]
    fn test_describe_geometry() {
        assert_eq!(describe_geometry(None), "no geometry");
        assert_eq!(
            describe_geometry(Some(Geometry::Sphere { radius: 0.5 })),
            "sphere r=0.500"
        );
    }
}
