// systems/avoidance.rs
//
// The running gift: an item that flees the pointer but never leaves the viewport.
//
// Dormant until a pointer comes within the trigger radius of its centre (or it
// is clicked), then floats free and is pushed away on every move. Repulsion is
// linear in how deep the pointer sits inside the radius:
//
//   displacement = speed * (radius - distance) / radius
//
// No velocity is kept between events; each displacement is computed from the
// current pointer and item position only.

use glam::Vec2;
use crate::api::config::{AvoidanceConfig, EdgeMode};
use crate::api::surface::Surface;
use crate::api::types::Element;
use super::rng::Rng;

/// Below this distance the pointer counts as sitting on the centre.
const CENTER_EPSILON: f32 = 1e-3;

pub struct Avoidance {
    target: Element,
    /// Top-left corner while floating; `None` while dormant.
    pos: Option<Vec2>,
    rng: Rng,
}

impl Avoidance {
    pub fn new(target: Element, seed: u64) -> Self {
        Self {
            target,
            pos: None,
            rng: Rng::new(seed),
        }
    }

    pub fn target(&self) -> Element {
        self.target
    }

    pub fn is_active(&self) -> bool {
        self.pos.is_some()
    }

    /// Current floating position, if active.
    pub fn position(&self) -> Option<Vec2> {
        self.pos
    }

    /// Pointer moved. Returns true if the item moved.
    pub fn on_pointer_move(&mut self, pointer: Vec2, surface: &mut dyn Surface, cfg: &AvoidanceConfig) -> bool {
        let pos = match self.pos {
            Some(pos) => pos,
            None => {
                if !self.in_reach(pointer, surface, cfg) {
                    return false;
                }
                match self.activate(surface) {
                    Some(pos) => pos,
                    None => return false,
                }
            }
        };

        let away = center_of(pos, cfg) - pointer;
        let distance = away.length();
        if distance > cfg.trigger_radius {
            return false;
        }
        let magnitude = repulsion(distance, cfg);
        let dir = self.direction(away);
        self.move_to(pos + dir * magnitude, surface, cfg)
    }

    /// Touch began at `point`. A touch on the item itself always counts.
    pub fn on_touch(&mut self, point: Vec2, on_item: bool, surface: &mut dyn Surface, cfg: &AvoidanceConfig) -> bool {
        let pos = match self.pos {
            Some(pos) => pos,
            None => {
                if !on_item && !self.in_reach(point, surface, cfg) {
                    return false;
                }
                match self.activate(surface) {
                    Some(pos) => pos,
                    None => return false,
                }
            }
        };

        let away = center_of(pos, cfg) - point;
        if !on_item && away.length() > cfg.trigger_radius {
            return false;
        }
        let dir = self.direction(away);
        self.move_to(pos + dir * cfg.speed, surface, cfg)
    }

    /// Clicked or activated from the keyboard: jump somewhere random.
    pub fn on_direct(&mut self, surface: &mut dyn Surface, cfg: &AvoidanceConfig) -> bool {
        let pos = match self.pos {
            Some(pos) => pos,
            None => match self.activate(surface) {
                Some(pos) => pos,
                None => return false,
            },
        };
        let dir = self.rng.unit_vec2();
        self.move_to(pos + dir * cfg.speed, surface, cfg)
    }

    fn in_reach(&self, point: Vec2, surface: &dyn Surface, cfg: &AvoidanceConfig) -> bool {
        surface
            .rect(self.target)
            .is_some_and(|r| r.center().distance(point) <= cfg.trigger_radius)
    }

    /// Switch to free-floating, anchored where the item currently sits.
    fn activate(&mut self, surface: &mut dyn Surface) -> Option<Vec2> {
        let Some(rect) = surface.rect(self.target) else {
            log::debug!("{} has no layout box, staying dormant", self.target);
            return None;
        };
        surface.set_floating(self.target);
        surface.set_position(self.target, rect.min);
        self.pos = Some(rect.min);
        log::debug!("{} starts running from {:?}", self.target, rect.min);
        Some(rect.min)
    }

    fn direction(&mut self, away: Vec2) -> Vec2 {
        if away.length() < CENTER_EPSILON {
            self.rng.unit_vec2()
        } else {
            away.normalize()
        }
    }

    fn move_to(&mut self, wanted: Vec2, surface: &mut dyn Surface, cfg: &AvoidanceConfig) -> bool {
        let next = keep_in_viewport(wanted, surface.viewport(), cfg);
        let moved = self.pos != Some(next);
        self.pos = Some(next);
        if moved {
            surface.set_position(self.target, next);
        }
        moved
    }
}

fn center_of(pos: Vec2, cfg: &AvoidanceConfig) -> Vec2 {
    pos + Vec2::splat(cfg.item_size * 0.5)
}

/// Displacement for a pointer `distance` px from the centre. Zero at or beyond the radius.
pub fn repulsion(distance: f32, cfg: &AvoidanceConfig) -> f32 {
    if distance >= cfg.trigger_radius {
        return 0.0;
    }
    cfg.speed * (cfg.trigger_radius - distance) / cfg.trigger_radius
}

/// Padded bounds for the item's top-left corner. The upper bound collapses onto
/// the lower one when the viewport is smaller than the footprint.
pub fn bounds(viewport: Vec2, cfg: &AvoidanceConfig) -> (Vec2, Vec2) {
    let lo = Vec2::splat(cfg.edge_padding);
    let hi = (viewport - Vec2::splat(cfg.item_size + cfg.edge_padding)).max(lo);
    (lo, hi)
}

/// Apply the configured edge mode, then hard-clamp.
pub fn keep_in_viewport(pos: Vec2, viewport: Vec2, cfg: &AvoidanceConfig) -> Vec2 {
    let (lo, hi) = bounds(viewport, cfg);
    let pos = match cfg.edge_mode {
        EdgeMode::Clamp => pos,
        EdgeMode::Reflect => Vec2::new(reflect(pos.x, lo.x, hi.x), reflect(pos.y, lo.y, hi.y)),
    };
    pos.clamp(lo, hi)
}

fn reflect(v: f32, lo: f32, hi: f32) -> f32 {
    if v < lo {
        lo + (lo - v)
    } else if v > hi {
        hi - (v - hi)
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::surface::Rect;
    use crate::testing::{Op, RecordingSurface, VIEWPORT};

    const ITEM: Element = Element::Gift(crate::GiftKind::Tickets);

    fn setup(item_min: Vec2) -> (Avoidance, RecordingSurface, crate::testing::SurfaceHandle) {
        let (surface, page) = RecordingSurface::new(VIEWPORT);
        page.set_rect(ITEM, Rect::new(item_min, Vec2::splat(100.0)));
        (Avoidance::new(ITEM, 42), surface, page)
    }

    #[test]
    fn repulsion_example() {
        let cfg = AvoidanceConfig::default();
        assert!((repulsion(50.0, &cfg) - 80.0).abs() < 1e-4);
        assert_eq!(repulsion(150.0, &cfg), 0.0);
        assert_eq!(repulsion(400.0, &cfg), 0.0);
    }

    #[test]
    fn displaces_along_outward_vector() {
        let cfg = AvoidanceConfig::default();
        let (mut av, mut surface, page) = setup(Vec2::new(500.0, 300.0));
        // Centre is (550, 350); pointer 50 px to the left.
        assert!(av.on_pointer_move(Vec2::new(500.0, 350.0), &mut surface, &cfg));
        let pos = av.position().unwrap();
        assert!((pos.x - 580.0).abs() < 1e-3, "x = {}", pos.x);
        assert!((pos.y - 300.0).abs() < 1e-3, "y = {}", pos.y);
        assert!(page.log().has(Op::Floating(ITEM)));
    }

    #[test]
    fn dormant_outside_radius() {
        let cfg = AvoidanceConfig::default();
        let (mut av, mut surface, page) = setup(Vec2::new(500.0, 300.0));
        assert!(!av.on_pointer_move(Vec2::new(100.0, 100.0), &mut surface, &cfg));
        assert!(!av.is_active());
        assert!(page.log().ops.is_empty());
    }

    #[test]
    fn active_item_ignores_far_pointer() {
        let cfg = AvoidanceConfig::default();
        let (mut av, mut surface, _page) = setup(Vec2::new(500.0, 300.0));
        av.on_pointer_move(Vec2::new(520.0, 350.0), &mut surface, &cfg);
        let before = av.position().unwrap();
        for p in [Vec2::new(0.0, 0.0), Vec2::new(1200.0, 700.0), before + Vec2::new(50.0 + 151.0, 50.0)] {
            assert!(!av.on_pointer_move(p, &mut surface, &cfg));
            assert_eq!(av.position(), Some(before));
        }
    }

    #[test]
    fn clamps_for_every_pointer_position() {
        let cfg = AvoidanceConfig::default();
        let (lo, hi) = bounds(VIEWPORT, &cfg);
        for start in [Vec2::new(20.0, 20.0), Vec2::new(1160.0, 680.0), Vec2::new(600.0, 20.0)] {
            let (mut av, mut surface, _page) = setup(start);
            for gx in 0..=32 {
                for gy in 0..=20 {
                    let pointer = Vec2::new(gx as f32 * 40.0, gy as f32 * 40.0);
                    av.on_pointer_move(pointer, &mut surface, &cfg);
                    if let Some(pos) = av.position() {
                        assert!(pos.cmpge(lo).all() && pos.cmple(hi).all(), "{pos:?} escaped for {pointer:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn clamp_survives_tiny_viewport() {
        let cfg = AvoidanceConfig::default();
        let pos = keep_in_viewport(Vec2::new(500.0, -40.0), Vec2::new(90.0, 90.0), &cfg);
        assert_eq!(pos, Vec2::splat(20.0));
    }

    #[test]
    fn reflect_mirrors_then_clamps() {
        let cfg = AvoidanceConfig {
            edge_mode: EdgeMode::Reflect,
            ..AvoidanceConfig::default()
        };
        let (lo, hi) = bounds(VIEWPORT, &cfg);
        let pos = keep_in_viewport(Vec2::new(lo.x - 30.0, hi.y + 10.0), VIEWPORT, &cfg);
        assert_eq!(pos, Vec2::new(lo.x + 30.0, hi.y - 10.0));
        let far = keep_in_viewport(Vec2::new(-5000.0, 5000.0), VIEWPORT, &cfg);
        assert!(far.cmpge(lo).all() && far.cmple(hi).all());
    }

    #[test]
    fn touch_on_center_jumps_full_speed() {
        let cfg = AvoidanceConfig::default();
        let (mut av, mut surface, _page) = setup(Vec2::new(500.0, 300.0));
        assert!(av.on_touch(Vec2::new(550.0, 350.0), true, &mut surface, &cfg));
        let moved = av.position().unwrap().distance(Vec2::new(500.0, 300.0));
        assert!((moved - cfg.speed).abs() < 1e-2, "moved {moved}");
    }

    #[test]
    fn touch_pushes_away_from_point() {
        let cfg = AvoidanceConfig::default();
        let (mut av, mut surface, _page) = setup(Vec2::new(500.0, 300.0));
        assert!(av.on_touch(Vec2::new(550.0, 400.0), false, &mut surface, &cfg));
        let pos = av.position().unwrap();
        assert!((pos.y - (300.0 - cfg.speed)).abs() < 1e-3);
        assert!((pos.x - 500.0).abs() < 1e-3);
    }

    #[test]
    fn far_touch_is_ignored() {
        let cfg = AvoidanceConfig::default();
        let (mut av, mut surface, _page) = setup(Vec2::new(500.0, 300.0));
        assert!(!av.on_touch(Vec2::new(10.0, 10.0), false, &mut surface, &cfg));
        assert!(!av.is_active());
    }

    #[test]
    fn missing_layout_box_stays_dormant() {
        let cfg = AvoidanceConfig::default();
        let (mut surface, _page) = RecordingSurface::new(VIEWPORT);
        let mut av = Avoidance::new(ITEM, 1);
        assert!(!av.on_direct(&mut surface, &cfg));
        assert!(!av.is_active());
    }
}
