//! Starspots and prominences, driven by the activity cycle.

use std::collections::VecDeque;
use std::f64::consts::{FRAC_PI_3, PI, TAU};

use crate::core::constants::{MINUTE, WEEK};
use crate::core::rng::Rng;
use crate::systems::stellar::cycle_activity;

/// Spot spawn rate per second at full activity.
const SPOT_RATE: f64 = 0.05;
/// Prominence spawn rate per second at cycle phase 1.
const PROMINENCE_RATE: f64 = 0.01;
/// Peak prominence height as a fraction of the stellar radius.
const PROMINENCE_HEIGHT: f64 = 0.2;

/// Number of events in a step whose expected count is `expected`: the whole
/// part always, plus one more with probability equal to the fraction.
pub(crate) fn stochastic_count(expected: f64, rng: &mut Rng) -> u64 {
    if expected.is_nan() || expected <= 0.0 {
        return 0;
    }
    let whole = expected.floor();
    let extra = rng.chance(expected - whole) as u64;
    (whole.min(u64::MAX as f64) as u64).saturating_add(extra)
}

/// A cool, dark region on the photosphere.
#[derive(Debug, Clone, PartialEq)]
pub struct Spot {
    /// rad, within ±π/3
    pub latitude: f64,
    /// rad, in [0, 2π)
    pub longitude: f64,
    /// m
    pub radius: f64,
    /// K
    pub temperature: f64,
    /// s
    pub lifetime: f64,
    /// s
    pub age: f64,
}

impl Spot {
    fn spawn(ctx: &SurfaceContext, rng: &mut Rng) -> Self {
        Spot {
            latitude: rng.range(-FRAC_PI_3, FRAC_PI_3),
            longitude: rng.range(0.0, TAU),
            radius: ctx.stellar_radius * rng.range(0.005, 0.05),
            temperature: ctx.surface_temperature * rng.range(0.7, 0.8),
            lifetime: rng.range(1.0, 4.0) * WEEK,
            age: 0.0,
        }
    }

    /// Age by `dt`. Returns false once past its lifetime.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.age += dt;
        self.age <= self.lifetime
    }
}

/// A loop of plasma rising from the limb and falling back.
#[derive(Debug, Clone, PartialEq)]
pub struct Prominence {
    pub latitude: f64,
    pub longitude: f64,
    /// m above the surface
    pub height: f64,
    /// In [0, 1].
    pub intensity: f64,
    /// s
    pub duration: f64,
    /// s
    pub age: f64,
}

impl Prominence {
    fn spawn(rng: &mut Rng) -> Self {
        Prominence {
            latitude: rng.range(-FRAC_PI_3, FRAC_PI_3),
            longitude: rng.range(0.0, TAU),
            height: 0.0,
            intensity: 0.0,
            duration: rng.range(30.0, 90.0) * MINUTE,
            age: 0.0,
        }
    }

    /// Age by `dt` and reshape. Returns false once past its duration.
    pub fn tick(&mut self, dt: f64, stellar_radius: f64) -> bool {
        self.age += dt;
        if self.age > self.duration {
            return false;
        }
        let envelope = (PI * self.lifecycle()).sin();
        self.height = stellar_radius * PROMINENCE_HEIGHT * envelope;
        self.intensity = envelope;
        true
    }

    /// age / duration, in [0, 1] while live.
    pub fn lifecycle(&self) -> f64 {
        self.age / self.duration
    }
}

/// Star state the feature manager reads each update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceContext {
    /// In [0, 1).
    pub cycle_phase: f64,
    /// m
    pub stellar_radius: f64,
    /// K
    pub surface_temperature: f64,
}

/// What happened to the surface features during one update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceReport {
    pub spots_spawned: u64,
    pub spots_evicted: u64,
    pub spots_retired: u64,
    pub prominences_spawned: u64,
    pub prominences_dropped: u64,
    pub prominences_retired: u64,
}

impl SurfaceReport {
    pub fn merge(&mut self, other: &SurfaceReport) {
        self.spots_spawned = self.spots_spawned.saturating_add(other.spots_spawned);
        self.spots_evicted = self.spots_evicted.saturating_add(other.spots_evicted);
        self.spots_retired = self.spots_retired.saturating_add(other.spots_retired);
        self.prominences_spawned = self.prominences_spawned.saturating_add(other.prominences_spawned);
        self.prominences_dropped = self.prominences_dropped.saturating_add(other.prominences_dropped);
        self.prominences_retired = self.prominences_retired.saturating_add(other.prominences_retired);
    }

    pub fn is_quiet(&self) -> bool {
        *self == SurfaceReport::default()
    }
}

/// Bounded sets of live spots and prominences.
///
/// Spots are kept oldest first; on overflow the oldest is evicted.
/// Prominences beyond the cap are never spawned.
#[derive(Debug, Clone)]
pub struct SurfaceFeatureManager {
    spots: VecDeque<Spot>,
    prominences: Vec<Prominence>,
    max_spots: usize,
    max_prominences: usize,
}

impl SurfaceFeatureManager {
    pub fn new(max_spots: usize, max_prominences: usize) -> Self {
        Self {
            spots: VecDeque::with_capacity(max_spots.min(1024)),
            prominences: Vec::with_capacity(max_prominences.min(1024)),
            max_spots,
            max_prominences,
        }
    }

    pub fn set_limits(&mut self, max_spots: usize, max_prominences: usize) {
        self.max_spots = max_spots;
        self.max_prominences = max_prominences;
        while self.spots.len() > max_spots {
            self.spots.pop_front();
        }
        self.prominences.truncate(max_prominences);
    }

    /// Age, retire, then spawn.
    pub fn update(&mut self, dt: f64, ctx: &SurfaceContext, rng: &mut Rng) -> SurfaceReport {
        let mut report = SurfaceReport::default();
        self.update_spots(dt, ctx, rng, &mut report);
        self.update_prominences(dt, ctx, rng, &mut report);
        report
    }

    fn update_spots(&mut self, dt: f64, ctx: &SurfaceContext, rng: &mut Rng, report: &mut SurfaceReport) {
        let before = self.spots.len();
        self.spots.retain_mut(|s| s.tick(dt));
        report.spots_retired = (before - self.spots.len()) as u64;

        let expected = SPOT_RATE * cycle_activity(ctx.cycle_phase) * dt;
        let mut count = stochastic_count(expected, rng);
        report.spots_spawned = count;

        // Only the newest `max_spots` could survive; the rest are evicted unborn.
        let cap = self.max_spots as u64;
        if count > cap {
            report.spots_evicted = report.spots_evicted.saturating_add(count - cap);
            count = cap;
        }
        for _ in 0..count {
            self.spots.push_back(Spot::spawn(ctx, rng));
            if self.spots.len() > self.max_spots {
                self.spots.pop_front();
                report.spots_evicted = report.spots_evicted.saturating_add(1);
            }
        }
    }

    fn update_prominences(&mut self, dt: f64, ctx: &SurfaceContext, rng: &mut Rng, report: &mut SurfaceReport) {
        let before = self.prominences.len();
        self.prominences.retain_mut(|p| p.tick(dt, ctx.stellar_radius));
        report.prominences_retired = (before - self.prominences.len()) as u64;

        let expected = PROMINENCE_RATE * ctx.cycle_phase * dt;
        let count = stochastic_count(expected, rng);
        let room = self.max_prominences.saturating_sub(self.prominences.len()) as u64;
        let spawned = count.min(room);
        for _ in 0..spawned {
            self.prominences.push(Prominence::spawn(rng));
        }
        report.prominences_spawned = spawned;
        report.prominences_dropped = count - spawned;
    }

    pub fn spots(&self) -> impl Iterator<Item = &Spot> {
        self.spots.iter()
    }

    pub fn spot_count(&self) -> usize {
        self.spots.len()
    }

    pub fn prominences(&self) -> &[Prominence] {
        &self.prominences
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{DAY, HOUR, SOLAR_RADIUS, SOLAR_TEMPERATURE};

    fn ctx(phase: f64) -> SurfaceContext {
        SurfaceContext {
            cycle_phase: phase,
            stellar_radius: SOLAR_RADIUS,
            surface_temperature: SOLAR_TEMPERATURE,
        }
    }

    fn marked_spot(lifetime: f64) -> Spot {
        Spot { latitude: 0.0, longitude: 0.0, radius: 1.0, temperature: 4000.0, lifetime, age: 0.0 }
    }

    #[test]
    fn stochastic_count_keeps_whole_part() {
        let mut rng = Rng::new(1);
        assert_eq!(stochastic_count(0.0, &mut rng), 0);
        assert_eq!(stochastic_count(-3.0, &mut rng), 0);
        assert_eq!(stochastic_count(f64::NAN, &mut rng), 0);
        let n = stochastic_count(7.5, &mut rng);
        assert!(n == 7 || n == 8);
        let total: u64 = (0..10_000).map(|_| stochastic_count(0.25, &mut rng)).sum();
        assert!((2_000..3_000).contains(&total), "total = {total}");
    }

    #[test]
    fn spot_alive_at_lifetime_boundary() {
        let mut rng = Rng::new(3);
        let mut manager = SurfaceFeatureManager::new(100, 50);
        manager.spots.push_back(marked_spot(10.0));
        let is_present = |m: &SurfaceFeatureManager| m.spots().any(|s| s.lifetime == 10.0);

        manager.update(10.0, &ctx(0.75), &mut rng);
        assert!(is_present(&manager), "spot at age == lifetime must be live");

        let report = manager.update(0.001, &ctx(0.75), &mut rng);
        assert!(!is_present(&manager));
        assert_eq!(report.spots_retired, 1);
    }

    #[test]
    fn spots_follow_activity() {
        let mut rng = Rng::new(5);
        let mut manager = SurfaceFeatureManager::new(100, 50);
        // activity peaks at phase 0.25; 0.05/s for 60 s ~ 3 spots
        let report = manager.update(60.0, &ctx(0.25), &mut rng);
        assert!((3..=4).contains(&report.spots_spawned));
        for s in manager.spots() {
            assert!(s.latitude.abs() <= FRAC_PI_3);
            assert!((0.0..TAU).contains(&s.longitude));
            assert!(s.radius >= 0.005 * SOLAR_RADIUS && s.radius <= 0.05 * SOLAR_RADIUS);
            assert!(s.temperature >= 0.7 * SOLAR_TEMPERATURE && s.temperature <= 0.8 * SOLAR_TEMPERATURE);
            assert!(s.lifetime >= WEEK && s.lifetime <= 4.0 * WEEK);
        }
    }

    #[test]
    fn spot_cap_evicts_oldest() {
        let mut rng = Rng::new(7);
        let mut manager = SurfaceFeatureManager::new(100, 50);
        manager.spots.push_back(marked_spot(1e12));
        // ~ 0.05 * 3600 = 180 spawns in one hour at peak activity
        let report = manager.update(HOUR, &ctx(0.25), &mut rng);
        assert_eq!(manager.spot_count(), 100);
        assert!(!manager.spots().any(|s| s.lifetime == 1e12), "oldest spot must be evicted first");
        assert_eq!(report.spots_evicted, report.spots_spawned + 1 - 100);
    }

    #[test]
    fn zero_spot_cap_keeps_nothing() {
        let mut rng = Rng::new(8);
        let mut manager = SurfaceFeatureManager::new(0, 0);
        let report = manager.update(DAY, &ctx(0.5), &mut rng);
        assert_eq!(manager.spot_count(), 0);
        assert!(manager.prominences().is_empty());
        assert_eq!(report.spots_evicted, report.spots_spawned);
        assert_eq!(report.prominences_spawned, 0);
    }

    #[test]
    fn prominence_cap_drops_new() {
        let mut rng = Rng::new(9);
        let mut manager = SurfaceFeatureManager::new(100, 50);
        // 0.01 * 0.9 * 3 h ~ 97 spawns requested
        let report = manager.update(3.0 * HOUR, &ctx(0.9), &mut rng);
        assert_eq!(manager.prominences().len(), 50);
        assert_eq!(report.prominences_spawned, 50);
        assert!(report.prominences_dropped >= 40);
    }

    #[test]
    fn prominence_shape_follows_lifecycle() {
        let mut p = Prominence { latitude: 0.0, longitude: 0.0, height: 0.0, intensity: 0.0, duration: 60.0, age: 0.0 };
        assert!(p.tick(30.0, SOLAR_RADIUS));
        assert!((p.intensity - 1.0).abs() < 1e-12);
        assert!((p.height - 0.2 * SOLAR_RADIUS).abs() < 1.0);
        assert!(p.tick(30.0, SOLAR_RADIUS), "age == duration is still live");
        assert!(!p.tick(1.0, SOLAR_RADIUS));
    }

    #[test]
    fn prominences_retire_after_duration() {
        let mut rng = Rng::new(11);
        let mut manager = SurfaceFeatureManager::new(100, 50);
        manager.update(HOUR, &ctx(0.9), &mut rng);
        let live = manager.prominences().len() as u64;
        assert!(live > 0);
        let report = manager.update(2.0 * HOUR, &ctx(0.0), &mut rng);
        assert_eq!(report.prominences_retired, live);
        assert!(manager.prominences().is_empty());
    }

    #[test]
    fn report_merge_sums() {
        let mut a = SurfaceReport { spots_spawned: 1, ..Default::default() };
        a.merge(&SurfaceReport { spots_spawned: 2, prominences_dropped: 3, ..Default::default() });
        assert_eq!(a.spots_spawned, 3);
        assert_eq!(a.prominences_dropped, 3);
        assert!(!a.is_quiet());
        assert!(SurfaceReport::default().is_quiet());
    }

    #[test]
    fn report_merge_saturates() {
        let mut total = SurfaceReport { spots_evicted: u64::MAX, ..Default::default() };
        total.merge(&SurfaceReport { spots_evicted: 5, prominences_dropped: 2, ..Default::default() });
        assert_eq!(total.spots_evicted, u64::MAX);
        assert_eq!(total.prominences_dropped, 2);
    }
}
