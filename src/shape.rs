use kurbo::Shape as _;

use crate::{
    content::SectionId,
    core::{Affine, BezPath, Point, Viewport},
    error::{SceneError, SceneResult},
};

/// Closed vocabulary of decorative wireframe shapes. Serialized identifiers
/// are the kebab-case names used in shape table documents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    NetworkNode,
    Chart,
    Rocket,
    Grid,
    Scatter,
    Ring,
    Wave,
    Spiral,
    Orbit,
    Crystal,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 10] = [
        Self::NetworkNode,
        Self::Chart,
        Self::Rocket,
        Self::Grid,
        Self::Scatter,
        Self::Ring,
        Self::Wave,
        Self::Spiral,
        Self::Orbit,
        Self::Crystal,
    ];

    /// Wireframe outline in local space, centered on the origin and roughly
    /// unit-sized. Each kind maps to a pure generator; the renderer never
    /// needs to know shape-specific logic.
    pub fn wireframe(self) -> BezPath {
        match self {
            Self::NetworkNode => network_node_path(),
            Self::Chart => chart_path(),
            Self::Rocket => rocket_path(),
            Self::Grid => grid_path(),
            Self::Scatter => scatter_path(),
            Self::Ring => ring_path(),
            Self::Wave => wave_path(),
            Self::Spiral => spiral_path(),
            Self::Orbit => orbit_path(),
            Self::Crystal => crystal_path(),
        }
    }
}

/// One of the 4 fixed decorative-shape positions, each animated
/// independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CornerSlot {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl CornerSlot {
    pub const ALL: [CornerSlot; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn index(self) -> usize {
        match self {
            Self::TopLeft => 0,
            Self::TopRight => 1,
            Self::BottomLeft => 2,
            Self::BottomRight => 3,
        }
    }

    /// Anchor point of this slot within the viewport, inset by `margin`.
    pub fn anchor(self, viewport: Viewport, margin: f64) -> Point {
        let (x, y) = match self {
            Self::TopLeft => (margin, margin),
            Self::TopRight => (viewport.width - margin, margin),
            Self::BottomLeft => (margin, viewport.height - margin),
            Self::BottomRight => (viewport.width - margin, viewport.height - margin),
        };
        Point::new(x, y)
    }
}

/// A shape kind bound to its corner slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ShapeDescriptor {
    pub kind: ShapeKind,
    pub slot: CornerSlot,
}

/// Static mapping from section index to the 4 shapes shown while that
/// section is active, one per corner slot.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ShapeTable {
    pub sections: Vec<[ShapeKind; 4]>,
}

impl ShapeTable {
    /// Built-in table for the 7 portfolio sections.
    pub fn portfolio() -> Self {
        use ShapeKind::*;
        Self {
            sections: vec![
                // Hero
                [NetworkNode, Orbit, Grid, Ring],
                // About
                [Scatter, Crystal, Wave, NetworkNode],
                // Services
                [Chart, Grid, Orbit, Spiral],
                // Skills
                [Grid, Scatter, Crystal, Chart],
                // Experience
                [Spiral, Wave, Ring, Orbit],
                // Experiments
                [Rocket, Scatter, NetworkNode, Crystal],
                // Contact
                [Ring, Rocket, Wave, Grid],
            ],
        }
    }

    pub fn validate(&self) -> SceneResult<()> {
        if self.sections.len() != SectionId::COUNT {
            return Err(SceneError::validation(format!(
                "shape table must cover exactly {} sections, got {}",
                SectionId::COUNT,
                self.sections.len()
            )));
        }
        Ok(())
    }

    pub fn shapes_for(&self, section: usize) -> Option<[ShapeKind; 4]> {
        self.sections.get(section).copied()
    }

    /// The section's shapes bound to their corner slots.
    pub fn descriptors_for(&self, section: usize) -> Option<[ShapeDescriptor; 4]> {
        let kinds = self.shapes_for(section)?;
        let mut slots = CornerSlot::ALL.into_iter();
        Some(kinds.map(|kind| ShapeDescriptor {
            kind,
            // ALL has exactly as many entries as the kinds array.
            slot: slots.next().unwrap_or(CornerSlot::TopLeft),
        }))
    }
}

fn append(path: &mut BezPath, other: &BezPath) {
    for el in other.elements() {
        path.push(*el);
    }
}

fn polyline(points: &[(f64, f64)], close: bool) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(&(x, y)) = iter.next() {
        path.move_to(Point::new(x, y));
        for &(x, y) in iter {
            path.line_to(Point::new(x, y));
        }
        if close {
            path.close_path();
        }
    }
    path
}

fn network_node_path() -> BezPath {
    // Five satellite nodes on a ring, each linked to the hub and its
    // neighbors.
    let mut path = BezPath::new();
    let nodes: Vec<Point> = (0..5)
        .map(|i| {
            let angle = std::f64::consts::TAU * (i as f64) / 5.0 - std::f64::consts::FRAC_PI_2;
            Point::new(0.5 * angle.cos(), 0.5 * angle.sin())
        })
        .collect();
    for (i, node) in nodes.iter().enumerate() {
        path.move_to(Point::ORIGIN);
        path.line_to(*node);
        path.move_to(*node);
        path.line_to(nodes[(i + 1) % nodes.len()]);
    }
    path
}

fn chart_path() -> BezPath {
    let mut path = polyline(&[(-0.5, -0.5), (-0.5, 0.5), (0.5, 0.5)], false);
    for (i, height) in [0.35, 0.6, 0.25, 0.8].iter().enumerate() {
        let x = -0.35 + 0.22 * i as f64;
        let bar = polyline(
            &[
                (x, 0.5),
                (x, 0.5 - height),
                (x + 0.12, 0.5 - height),
                (x + 0.12, 0.5),
            ],
            false,
        );
        append(&mut path, &bar);
    }
    path
}

fn rocket_path() -> BezPath {
    let mut path = polyline(
        &[
            (0.0, -0.5),
            (0.18, -0.1),
            (0.18, 0.3),
            (-0.18, 0.3),
            (-0.18, -0.1),
        ],
        true,
    );
    // Fins and exhaust.
    append(&mut path, &polyline(&[(0.18, 0.1), (0.4, 0.4), (0.18, 0.3)], false));
    append(&mut path, &polyline(&[(-0.18, 0.1), (-0.4, 0.4), (-0.18, 0.3)], false));
    append(&mut path, &polyline(&[(-0.08, 0.3), (0.0, 0.5), (0.08, 0.3)], false));
    path
}

fn grid_path() -> BezPath {
    let mut path = BezPath::new();
    for i in 0..=4 {
        let t = -0.5 + 0.25 * i as f64;
        path.move_to(Point::new(-0.5, t));
        path.line_to(Point::new(0.5, t));
        path.move_to(Point::new(t, -0.5));
        path.line_to(Point::new(t, 0.5));
    }
    path
}

fn scatter_path() -> BezPath {
    // Fixed pseudo-random point cloud drawn as small crosses.
    const POINTS: [(f64, f64); 7] = [
        (-0.4, -0.3),
        (-0.1, -0.45),
        (0.3, -0.2),
        (0.45, 0.15),
        (0.1, 0.3),
        (-0.25, 0.4),
        (-0.45, 0.05),
    ];
    let mut path = BezPath::new();
    for (x, y) in POINTS {
        path.move_to(Point::new(x - 0.04, y));
        path.line_to(Point::new(x + 0.04, y));
        path.move_to(Point::new(x, y - 0.04));
        path.line_to(Point::new(x, y + 0.04));
    }
    path
}

fn ring_path() -> BezPath {
    kurbo::Circle::new(Point::ORIGIN, 0.5).to_path(1e-3)
}

fn wave_path() -> BezPath {
    let points: Vec<(f64, f64)> = (0..=32)
        .map(|i| {
            let x = -0.5 + i as f64 / 32.0;
            (x, 0.3 * (x * std::f64::consts::TAU).sin())
        })
        .collect();
    polyline(&points, false)
}

fn spiral_path() -> BezPath {
    let points: Vec<(f64, f64)> = (0..=64)
        .map(|i| {
            let t = i as f64 / 64.0;
            let angle = 3.0 * std::f64::consts::TAU * t;
            let radius = 0.5 * t;
            (radius * angle.cos(), radius * angle.sin())
        })
        .collect();
    polyline(&points, false)
}

fn orbit_path() -> BezPath {
    let mut path = kurbo::Circle::new(Point::ORIGIN, 0.2).to_path(1e-3);
    let ring = kurbo::Circle::new(Point::ORIGIN, 0.5).to_path(1e-3);
    append(&mut path, &(Affine::scale_non_uniform(1.0, 0.35) * ring));
    path
}

fn crystal_path() -> BezPath {
    let hex: Vec<(f64, f64)> = (0..6)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / 6.0 + std::f64::consts::FRAC_PI_6;
            (0.5 * angle.cos(), 0.5 * angle.sin())
        })
        .collect();
    let mut path = polyline(&hex, true);
    for &(x, y) in &hex {
        path.move_to(Point::ORIGIN);
        path.line_to(Point::new(x, y));
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portfolio_table_covers_all_sections() {
        let table = ShapeTable::portfolio();
        table.validate().unwrap();
        assert_eq!(table.sections.len(), SectionId::COUNT);
    }

    #[test]
    fn table_roundtrips_through_json() {
        let table = ShapeTable::portfolio();
        let s = serde_json::to_string(&table).unwrap();
        let de: ShapeTable = serde_json::from_str(&s).unwrap();
        assert_eq!(de, table);
        de.validate().unwrap();
        for section in 0..SectionId::COUNT {
            let shapes = de.shapes_for(section).unwrap();
            assert_eq!(shapes.len(), CornerSlot::COUNT);
        }
    }

    #[test]
    fn kind_identifiers_are_kebab_case() {
        assert_eq!(
            serde_json::to_string(&ShapeKind::NetworkNode).unwrap(),
            "\"network-node\""
        );
        assert_eq!(
            serde_json::from_str::<ShapeKind>("\"network-node\"").unwrap(),
            ShapeKind::NetworkNode
        );
        // Identifiers outside the vocabulary are rejected.
        assert!(serde_json::from_str::<ShapeKind>("\"torus\"").is_err());
    }

    #[test]
    fn descriptors_pair_kinds_with_slots_in_order() {
        let table = ShapeTable::portfolio();
        let descriptors = table.descriptors_for(0).unwrap();
        assert_eq!(descriptors[0].slot, CornerSlot::TopLeft);
        assert_eq!(descriptors[3].slot, CornerSlot::BottomRight);
        assert_eq!(descriptors[0].kind, ShapeKind::NetworkNode);
        assert!(table.descriptors_for(99).is_none());
    }

    #[test]
    fn validate_rejects_wrong_section_count() {
        let mut table = ShapeTable::portfolio();
        table.sections.pop();
        assert!(table.validate().is_err());
    }

    #[test]
    fn every_kind_has_nonempty_wireframe() {
        for kind in ShapeKind::ALL {
            assert!(!kind.wireframe().elements().is_empty(), "{kind:?}");
        }
    }

    #[test]
    fn corner_anchors_are_inset_by_margin() {
        let vp = Viewport::new(1000.0, 600.0).unwrap();
        assert_eq!(CornerSlot::TopLeft.anchor(vp, 80.0), Point::new(80.0, 80.0));
        assert_eq!(
            CornerSlot::BottomRight.anchor(vp, 80.0),
            Point::new(920.0, 520.0)
        );
    }
}
