//! Falling trash particles and the "last sorted item" badge state.

use crate::surface::{Baseline, FontKind, Surface, TextAlign, TextStyle};
use crate::vertex::ScreenPoint;
use druid::kurbo::{Affine, Point, Vec2};
use druid::Color;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;
use tracing::{debug, trace};

const FIRST_DROP: u32 = 120;
const MIN_DROP_INTERVAL: u32 = 130;
const MAX_DROP_INTERVAL: u32 = 200;
/// Badge lifetime in ticks after a spawn
pub const BADGE_TICKS: u32 = 95;
/// Ticks over which the badge fades out at the end of its lifetime
pub const BADGE_FADE_TICKS: f64 = 35.0;

/// Items appear this far above the slot
const DROP_HEIGHT: f64 = 70.0;
const DROP_JITTER: f64 = 18.0;
const GRAVITY: f64 = 1.10;
const DISSOLVE_STEP: f64 = 0.045;
const SINK_SPEED: f64 = 2.5;
const SHRINK: f64 = 0.95;
/// Items at or below this opacity are dropped from the active set
pub const SPENT_ALPHA: f64 = 0.02;

const ORGANIC: Color = Color::rgb8(0x4c, 0xaf, 0x50);
const RECYCLE: Color = Color::rgb8(0x30, 0xd5, 0xff);
const GENERAL: Color = Color::rgb8(0xff, 0xb8, 0x30);

/// A kind of trash the bin knows how to sort
#[derive(Debug, PartialEq)]
pub struct TrashKind {
    pub glyph: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    pub color: Color,
}

pub static TRASH_CATALOG: [TrashKind; 6] = [
    TrashKind {
        glyph: "🍌",
        label: "เปลือกกล้วย",
        category: "อินทรีย์",
        color: ORGANIC,
    },
    TrashKind {
        glyph: "🥤",
        label: "ขวดน้ำ",
        category: "รีไซเคิล",
        color: RECYCLE,
    },
    TrashKind {
        glyph: "🍱",
        label: "กล่องข้าว",
        category: "ทั่วไป",
        color: GENERAL,
    },
    TrashKind {
        glyph: "📄",
        label: "กระดาษ",
        category: "รีไซเคิล",
        color: RECYCLE,
    },
    TrashKind {
        glyph: "🥛",
        label: "กล่องนม",
        category: "รีไซเคิล",
        color: RECYCLE,
    },
    TrashKind {
        glyph: "🌿",
        label: "ใบไม้",
        category: "อินทรีย์",
        color: ORGANIC,
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Falling,
    Dissolving,
}

/// One animated piece of trash, in screen space
#[derive(Clone, Debug)]
pub struct TrashItem {
    pub kind: &'static TrashKind,
    pub position: Point,
    pub velocity: Vec2,
    pub rotation: f64,
    pub spin: f64,
    pub size: f64,
    pub phase: Phase,
    pub alpha: f64,
    /// Screen Y of the slot; reaching it ends the fall
    pub target_y: f64,
}

impl TrashItem {
    /// Advances one tick
    pub fn step(&mut self) {
        match self.phase {
            Phase::Falling => {
                self.position += self.velocity;
                self.velocity.y *= GRAVITY;
                self.rotation += self.spin;
                if self.position.y >= self.target_y {
                    trace!(label = self.kind.label, "trash reached the slot");
                    self.phase = Phase::Dissolving;
                }
            }
            Phase::Dissolving => {
                self.alpha -= DISSOLVE_STEP;
                self.position.y += SINK_SPEED;
                self.size *= SHRINK;
            }
        }
    }

    pub fn is_spent(&self) -> bool {
        self.alpha <= SPENT_ALPHA
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.save();
        surface.set_alpha(self.alpha);
        surface.transform(Affine::translate(self.position.to_vec2()) * Affine::rotate(self.rotation));
        surface.fill_text(
            self.kind.glyph,
            Point::ORIGIN,
            &TextStyle {
                size: self.size,
                bold: false,
                font: FontKind::Serif,
                align: TextAlign::Center,
                baseline: Baseline::Middle,
                color: Color::WHITE,
            },
        );
        surface.restore();
    }
}

/// The most recent spawn, shown as a badge on the bin's screen
#[derive(Clone, Debug)]
pub struct LastSorted {
    pub kind: &'static TrashKind,
    /// Ticks left before the badge disappears
    pub fade: u32,
}

impl LastSorted {
    /// Badge opacity, or `None` once the timer has run out
    pub fn badge_alpha(&self) -> Option<f64> {
        (self.fade > 0).then(|| (self.fade as f64 / BADGE_FADE_TICKS).min(1.0))
    }
}

/// Spawns, animates and prunes trash items
pub struct TrashSystem {
    items: Vec<TrashItem>,
    next_drop: u32,
    last_sorted: Option<LastSorted>,
    rng: StdRng,
}

impl TrashSystem {
    /// A fixed `seed` makes the spawn sequence reproducible
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        TrashSystem {
            items: Vec::new(),
            next_drop: FIRST_DROP,
            last_sorted: None,
            rng,
        }
    }

    pub fn items(&self) -> &[TrashItem] {
        &self.items
    }

    pub fn last_sorted(&self) -> Option<&LastSorted> {
        self.last_sorted.as_ref()
    }

    /// Runs one tick: spawn countdown, badge timer, item motion and pruning.
    /// `slot` is the current projection of the slot mouth.
    pub fn update(&mut self, slot: ScreenPoint) {
        self.next_drop = self.next_drop.saturating_sub(1);
        if self.next_drop == 0 {
            self.spawn(slot);
            self.next_drop = self.rng.gen_range(MIN_DROP_INTERVAL..MAX_DROP_INTERVAL);
            debug!(next_drop = self.next_drop, "scheduled next drop");
        }
        if let Some(last) = self.last_sorted.as_mut() {
            last.fade = last.fade.saturating_sub(1);
        }

        for item in self.items.iter_mut() {
            item.step();
        }
        let before = self.items.len();
        self.items.retain(|item| !item.is_spent());
        if self.items.len() < before {
            trace!(pruned = before - self.items.len(), live = self.items.len(), "pruned dissolved trash");
        }
    }

    fn spawn(&mut self, slot: ScreenPoint) {
        let kind = &TRASH_CATALOG[self.rng.gen_range(0..TRASH_CATALOG.len())];
        let rng = &mut self.rng;
        let item = TrashItem {
            kind,
            position: Point::new(
                slot.x + (rng.gen::<f64>() - 0.5) * DROP_JITTER,
                slot.y - DROP_HEIGHT,
            ),
            velocity: Vec2::new((rng.gen::<f64>() - 0.5) * 1.0, 1.6 + rng.gen::<f64>() * 0.8),
            rotation: rng.gen::<f64>() * TAU,
            spin: (rng.gen::<f64>() - 0.5) * 0.16,
            size: 20.0 + rng.gen::<f64>() * 8.0,
            phase: Phase::Falling,
            alpha: 1.0,
            target_y: slot.y,
        };
        debug!(label = kind.label, category = kind.category, "spawned trash");
        self.items.push(item);
        self.last_sorted = Some(LastSorted {
            kind,
            fade: BADGE_TICKS,
        });
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        for item in &self.items {
            item.draw(surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::Recorder;
    use approx::assert_relative_eq;

    fn slot() -> ScreenPoint {
        ScreenPoint {
            x: 230.0,
            y: 120.0,
            depth: 0.0,
        }
    }

    fn falling_item(y: f64, vy: f64, target_y: f64) -> TrashItem {
        TrashItem {
            kind: &TRASH_CATALOG[0],
            position: Point::new(100.0, y),
            velocity: Vec2::new(0.0, vy),
            rotation: 0.0,
            spin: 0.05,
            size: 24.0,
            phase: Phase::Falling,
            alpha: 1.0,
            target_y,
        }
    }

    #[test]
    fn dissolves_on_first_tick_at_or_past_target() {
        let mut item = falling_item(50.0, 1.6, 200.0);
        let (mut y, mut vy) = (50.0, 1.6);
        loop {
            y += vy;
            vy *= 1.10;
            item.step();
            assert_relative_eq!(item.position.y, y, epsilon = 1e-9);
            if y >= 200.0 {
                assert_eq!(item.phase, Phase::Dissolving);
                break;
            }
            assert_eq!(item.phase, Phase::Falling);
        }
    }

    #[test]
    fn dissolving_never_returns_to_falling() {
        let mut item = falling_item(190.0, 20.0, 200.0);
        item.step();
        assert_eq!(item.phase, Phase::Dissolving);
        // move the target far below; a dissolving item must not resume falling
        item.target_y = 10_000.0;
        for _ in 0..10 {
            item.step();
            assert_eq!(item.phase, Phase::Dissolving);
        }
    }

    #[test]
    fn dissolving_fades_linearly_and_is_spent_after_22_ticks() {
        let mut item = falling_item(199.0, 5.0, 200.0);
        item.step();
        let size = item.size;
        for tick in 1..=21 {
            let before = item.alpha;
            item.step();
            assert_relative_eq!(before - item.alpha, DISSOLVE_STEP, epsilon = 1e-9);
            assert!(!item.is_spent(), "spent too early at tick {tick}");
        }
        item.step();
        assert!(item.is_spent());
        assert!(item.size < size);
    }

    #[test]
    fn first_spawn_after_initial_countdown() {
        let mut system = TrashSystem::new(Some(7));
        for _ in 0..FIRST_DROP - 1 {
            system.update(slot());
        }
        assert!(system.items().is_empty());
        assert!(system.last_sorted().is_none());

        system.update(slot());
        assert_eq!(system.items().len(), 1);
        assert!((MIN_DROP_INTERVAL..MAX_DROP_INTERVAL).contains(&system.next_drop));
        let last = system.last_sorted().unwrap();
        assert_eq!(last.fade, BADGE_TICKS - 1);
        assert!(std::ptr::eq(last.kind, system.items()[0].kind));
    }

    #[test]
    fn spawn_starts_above_slot_within_jitter() {
        let mut system = TrashSystem::new(Some(11));
        system.spawn(slot());
        let item = &system.items()[0];
        assert_eq!(item.phase, Phase::Falling);
        assert_relative_eq!(item.position.y, slot().y - DROP_HEIGHT);
        assert!((item.position.x - slot().x).abs() <= DROP_JITTER / 2.0);
        assert!((1.6..2.4).contains(&item.velocity.y));
        assert!((20.0..28.0).contains(&item.size));
        assert_eq!(item.target_y, slot().y);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = TrashSystem::new(Some(99));
        let mut b = TrashSystem::new(Some(99));
        for _ in 0..600 {
            a.update(slot());
            b.update(slot());
        }
        let labels = |s: &TrashSystem| s.items().iter().map(|i| i.kind.label).collect::<Vec<_>>();
        assert_eq!(labels(&a), labels(&b));
        assert_eq!(a.next_drop, b.next_drop);
    }

    #[test]
    fn badge_expires_after_its_lifetime() {
        let mut system = TrashSystem::new(Some(1));
        system.next_drop = 10_000;
        system.last_sorted = Some(LastSorted {
            kind: &TRASH_CATALOG[2],
            fade: BADGE_TICKS,
        });
        for _ in 0..BADGE_TICKS - 1 {
            system.update(slot());
            assert!(system.last_sorted().unwrap().badge_alpha().is_some());
        }
        system.update(slot());
        assert_eq!(system.last_sorted().unwrap().badge_alpha(), None);
    }

    #[test]
    fn badge_alpha_ramps_down_in_final_ticks() {
        let last = LastSorted {
            kind: &TRASH_CATALOG[1],
            fade: 70,
        };
        assert_eq!(last.badge_alpha(), Some(1.0));
        let last = LastSorted { fade: 7, ..last };
        assert_relative_eq!(last.badge_alpha().unwrap(), 0.2);
    }

    #[test]
    fn new_spawn_overwrites_badge() {
        let mut system = TrashSystem::new(Some(3));
        system.last_sorted = Some(LastSorted {
            kind: &TRASH_CATALOG[0],
            fade: 12,
        });
        system.spawn(slot());
        assert_eq!(system.last_sorted().unwrap().fade, BADGE_TICKS);
    }

    #[test]
    fn active_set_stays_bounded() {
        let mut system = TrashSystem::new(Some(5));
        for _ in 0..20_000 {
            system.update(slot());
            assert!(system.items().len() <= 2);
            assert!(system.items().iter().all(|item| !item.is_spent()));
        }
    }

    #[test]
    fn draws_one_glyph_per_item() {
        let mut system = TrashSystem::new(Some(8));
        system.spawn(slot());
        system.spawn(slot());
        let mut recorder = Recorder::new(460.0, 460.0);
        system.draw(&mut recorder);
        assert_eq!(recorder.texts().len(), 2);
    }
}
