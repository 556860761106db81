use super::layout::Layout;
use crate::motion::lerp;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    /// Degrees, clockwise.
    pub rotation: f64,
}

impl Transform {
    pub fn new(x: f64, y: f64, rotation: f64) -> Self {
        Self { x, y, rotation }
    }

    pub fn interpolate(&self, to: &Self, t: f64) -> Self {
        Self::new(
            lerp(self.x, to.x, t),
            lerp(self.y, to.y, t),
            lerp(self.rotation, to.rotation, t),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotGeometry {
    pub transform: Transform,
    /// Position along the visible band; below 0 or above 1 for off-screen slots.
    pub t: f64,
    pub top_percent: f64,
    pub is_center: bool,
}

impl SlotGeometry {
    pub fn parametric(slot_index: usize, buffer: usize, visible: usize) -> f64 {
        if visible <= 1 {
            return 0.5;
        }
        (slot_index as f64 - buffer as f64) / (visible - 1) as f64
    }

    /// Places a slot on the curve. The same formulas run past both ends of the
    /// visible band so cards enter and leave along the curve instead of popping.
    pub fn calculate(slot_index: usize, layout: &Layout, base_left: f64) -> Self {
        let t = Self::parametric(slot_index, layout.buffer(), layout.visible);

        // parabola: zero at both ends of the band, peak in the middle
        let offset_x = 4.0 * layout.amplitude * t * (1.0 - t);
        let rotation = -layout.tilt_max + 2.0 * layout.tilt_max * t;
        let top_percent = layout.top_pad + t * (100.0 - layout.top_pad - layout.bottom_pad);
        let center_y = top_percent / 100.0 * layout.container_height;

        Self {
            transform: Transform::new(
                base_left + offset_x,
                center_y - layout.card_height / 2.0,
                rotation,
            ),
            t,
            top_percent,
            is_center: slot_index == layout.center(),
        }
    }
}

/// Every slot transform for one layout and container width. Rebuilt on resize,
/// never mutated otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotTable {
    slots: Vec<SlotGeometry>,
    center: usize,
    base_left: f64,
}

impl SlotTable {
    pub fn build(layout: &Layout, container_width: f64) -> Self {
        let base_left = layout.base_left(container_width);
        let slots = (0..layout.total_slots())
            .map(|i| SlotGeometry::calculate(i, layout, base_left))
            .collect();

        Self {
            slots,
            center: layout.center(),
            base_left,
        }
    }

    pub fn get(&self, slot: usize) -> Option<&SlotGeometry> {
        self.slots.get(slot)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn center(&self) -> usize {
        self.center
    }

    pub fn base_left(&self) -> f64 {
        self.base_left
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlotGeometry> {
        self.slots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::layout::Anchor;

    fn fixed_layout() -> Layout {
        Layout {
            anchor: Anchor::Fixed(0.0),
            ..Layout::vertical()
        }
    }

    #[test]
    fn test_visible_band_end_points() {
        let layout = fixed_layout();
        let table = SlotTable::build(&layout, 0.0);

        let first = table.get(layout.buffer()).unwrap();
        assert!(first.t.abs() < f64::EPSILON);
        assert!(first.transform.x.abs() < 1e-9);
        assert!((first.transform.rotation + 10.0).abs() < 1e-9);
        assert!((first.top_percent - 8.0).abs() < 1e-9);

        let last = table.get(layout.buffer() + layout.visible - 1).unwrap();
        assert!((last.t - 1.0).abs() < f64::EPSILON);
        assert!(last.transform.x.abs() < 1e-9);
        assert!((last.transform.rotation - 10.0).abs() < 1e-9);
        assert!((last.top_percent - 92.0).abs() < 1e-9);
    }

    #[test]
    fn test_center_slot_bulges_most() {
        let layout = fixed_layout();
        let table = SlotTable::build(&layout, 0.0);
        let center = table.get(table.center()).unwrap();

        assert!(center.is_center);
        assert!((center.t - 0.5).abs() < f64::EPSILON);
        assert!((center.transform.x - layout.amplitude).abs() < 1e-9);
        assert!(center.transform.rotation.abs() < 1e-9);
        // card centered on the middle of the container
        assert!((center.transform.y - (350.0 - 60.0)).abs() < 1e-9);
        assert_eq!(table.iter().filter(|s| s.is_center).count(), 1);
    }

    #[test]
    fn test_off_screen_slots_extrapolate_continuously() {
        let layout = fixed_layout();
        let table = SlotTable::build(&layout, 0.0);
        let step = 1.0 / (layout.visible - 1) as f64;

        // constant second difference for the parabola, constant first difference
        // for rotation, across t = 0 and t = 1 alike
        let slots: Vec<_> = table.iter().collect();
        for w in slots.windows(3) {
            let dt = w[1].t - w[0].t;
            assert!((dt - step).abs() < 1e-9);

            let second = w[2].transform.x - 2.0 * w[1].transform.x + w[0].transform.x;
            assert!((second + 8.0 * layout.amplitude * step * step).abs() < 1e-6);

            let r1 = w[1].transform.rotation - w[0].transform.rotation;
            let r2 = w[2].transform.rotation - w[1].transform.rotation;
            assert!((r1 - r2).abs() < 1e-9);
        }

        assert!(table.get(0).unwrap().t < 0.0);
        assert!(table.get(table.len() - 1).unwrap().t > 1.0);
    }

    #[test]
    fn test_single_visible_slot() {
        let layout = Layout {
            visible: 1,
            repeats: 3,
            ..fixed_layout()
        };
        let table = SlotTable::build(&layout, 0.0);

        assert_eq!(table.len(), 3);
        for slot in table.iter() {
            assert!((slot.t - 0.5).abs() < f64::EPSILON);
            assert!(slot.transform.x.is_finite());
        }
        assert!(table.get(1).unwrap().is_center);
    }

    #[test]
    fn test_centered_anchor_moves_with_width() {
        let layout = Layout::vertical();
        let narrow = SlotTable::build(&layout, 400.0);
        let wide = SlotTable::build(&layout, 800.0);
        assert!((wide.base_left() - narrow.base_left() - 200.0).abs() < f64::EPSILON);
        let dx = wide.get(3).unwrap().transform.x - narrow.get(3).unwrap().transform.x;
        assert!((dx - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_transform_interpolate() {
        let a = Transform::new(0.0, 0.0, -10.0);
        let b = Transform::new(100.0, 50.0, 10.0);
        let mid = a.interpolate(&b, 0.5);
        assert_eq!(mid, Transform::new(50.0, 25.0, 0.0));
    }
}
