//! Integration tests for sw-sim.

use std::sync::Mutex;

use sw_agent::Bug;
use sw_behavior::{BugBehavior, Intent, NoopBehavior, StepContext, SwarmBehavior};
use sw_core::{
    AgentId, AgentRng, OutsidePolicy, ShapeForm, ShapeTransition, SwarmConfig, Tick, Vec2,
};
use sw_spatial::Environment;

use crate::{NoopObserver, SimBuilder, SimError, SimObserver, SwarmSnapshot, TickSummary};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(population: usize, total_ticks: u64) -> SwarmConfig {
    SwarmConfig::default()
        .with_population(population)
        .with_total_ticks(total_ticks)
}

/// `n` lost bugs spaced along a row, well inside the domain.
fn row(n: usize) -> Vec<(Vec2, bool)> {
    (0..n).map(|i| (Vec2::new(10.0 + 3.0 * i as f64, 10.0), false)).collect()
}

/// Records everything the tick loop reports.
#[derive(Default)]
struct Recorder {
    starts:      Vec<Tick>,
    summaries:   Vec<TickSummary>,
    snapshots:   Vec<SwarmSnapshot>,
    transitions: Vec<ShapeTransition>,
    ended:       Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) { self.starts.push(tick); }
    fn on_transition(&mut self, t: &ShapeTransition) { self.transitions.push(*t); }
    fn on_tick_end(&mut self, s: &TickSummary) { self.summaries.push(*s); }
    fn on_snapshot(&mut self, s: &SwarmSnapshot) { self.snapshots.push(s.clone()); }
    fn on_sim_end(&mut self, tick: Tick) { self.ended = Some(tick); }
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn random_placement_is_in_bounds_and_conflict_free() {
        let sim = SimBuilder::new(test_config(120, 10), NoopBehavior).build().unwrap();
        assert_eq!(sim.env.population(), 120);

        let positions: Vec<Vec2> = sim.env.bugs().iter().map(|b| b.real_position).collect();
        for (i, &a) in positions.iter().enumerate() {
            assert!(sim.env.in_bounds(a), "{a} out of bounds");
            for &b in &positions[i + 1..] {
                assert!(!Environment::conflicts(a, b, 1.0), "{a} overlaps {b}");
            }
        }
    }

    #[test]
    fn anchors_know_their_position_and_lost_bugs_do_not() {
        let sim = SimBuilder::new(test_config(300, 10), NoopBehavior).build().unwrap();
        let anchors = sim.env.bugs().iter().filter(|b| b.is_anchor()).count();
        assert!((90..=210).contains(&anchors), "anchors = {anchors}");
        for bug in sim.env.bugs().iter() {
            if bug.is_anchor() {
                assert!(bug.localized);
                assert_eq!(bug.perceived_position, bug.real_position);
            } else {
                assert!(!bug.localized);
                assert_eq!(bug.perceived_position, Vec2::ZERO);
            }
        }
    }

    #[test]
    fn placement_is_deterministic_per_seed() {
        let positions = |seed| {
            let sim = SimBuilder::new(test_config(50, 10).with_seed(seed), NoopBehavior)
                .build()
                .unwrap();
            sim.env.bugs().iter().map(|b| (b.real_position, b.is_anchor())).collect::<Vec<_>>()
        };
        assert_eq!(positions(9), positions(9));
        assert_ne!(positions(9), positions(10));
    }

    #[test]
    fn saturated_domain_fails_placement() {
        let config = SwarmConfig {
            domain_width:           2.0,
            domain_height:          2.0,
            max_placement_attempts: 200,
            ..test_config(50, 10)
        };
        let err = SimBuilder::new(config, NoopBehavior).build().err().unwrap();
        assert!(matches!(err, SimError::Placement { requested: 50, attempts: 200, .. }));
    }

    #[test]
    fn placement_count_mismatch_errors() {
        let result = SimBuilder::new(test_config(3, 10), NoopBehavior)
            .placements(row(2))
            .build();
        assert!(matches!(result, Err(SimError::PopulationMismatch { expected: 3, got: 2, .. })));
    }

    #[test]
    fn explicit_placements_keep_order() {
        let sim = SimBuilder::new(test_config(3, 10), NoopBehavior)
            .placements(vec![
                (Vec2::new(5.0, 5.0), true),
                (Vec2::new(9.0, 5.0), false),
                (Vec2::new(13.0, 5.0), true),
            ])
            .build()
            .unwrap();
        let bug = sim.env.bug(AgentId(1)).unwrap();
        assert_eq!(bug.real_position, Vec2::new(9.0, 5.0));
        assert!(bug.is_lost());
        assert!(sim.env.bug(AgentId(2)).unwrap().is_anchor());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SwarmConfig { anchor_probability: 1.5, ..test_config(3, 10) };
        let result = SimBuilder::new(config, NoopBehavior).build();
        assert!(matches!(result, Err(SimError::Spatial(_))));
    }
}

// ── Run loop ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn noop_runs_to_end_tick() {
        let mut sim = SimBuilder::new(test_config(5, 20), NoopBehavior).build().unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.clock, Tick(20));
    }

    #[test]
    fn run_ticks_advances_clock() {
        let mut sim = SimBuilder::new(test_config(5, 20), NoopBehavior).build().unwrap();
        sim.run_ticks(7, &mut NoopObserver).unwrap();
        assert_eq!(sim.clock, Tick(7));
        sim.run_ticks(3, &mut NoopObserver).unwrap();
        assert_eq!(sim.clock, Tick(10));
    }

    #[test]
    fn observer_sees_every_tick_once() {
        let mut sim = SimBuilder::new(test_config(5, 30), NoopBehavior).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(rec.starts, (0..30).map(Tick).collect::<Vec<_>>());
        assert_eq!(rec.summaries.len(), 30);
        assert_eq!(rec.summaries[29].tick, Tick(29));
        assert_eq!(rec.ended, Some(Tick(30)));
    }

    #[test]
    fn snapshots_at_start_and_every_interval() {
        let config = SwarmConfig { snapshot_interval_ticks: 100, ..test_config(5, 250) };
        let mut sim = SimBuilder::new(config, NoopBehavior).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        let ticks: Vec<Tick> = rec.snapshots.iter().map(|s| s.tick).collect();
        assert_eq!(ticks, vec![Tick(0), Tick(100), Tick(200)]);
        assert!(rec.snapshots.iter().all(|s| s.agents.len() == 5));
    }

    #[test]
    fn zero_interval_emits_only_initial_snapshot() {
        let config = SwarmConfig { snapshot_interval_ticks: 0, ..test_config(5, 50) };
        let mut sim = SimBuilder::new(config, NoopBehavior).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(rec.snapshots.len(), 1);
    }
}

// ── Shape schedule ────────────────────────────────────────────────────────────

#[cfg(test)]
mod schedule_tests {
    use super::*;

    /// Records the form seen by the first bug on every tick.
    #[derive(Default)]
    struct FormWatcher {
        seen: Mutex<Vec<(Tick, ShapeForm, OutsidePolicy)>>,
    }

    impl SwarmBehavior for FormWatcher {
        fn step(&self, bug: &Bug, ctx: &StepContext<'_>, _rng: &mut AgentRng) -> Vec<Intent> {
            if bug.id == AgentId(0) {
                self.seen.lock().unwrap().push((
                    ctx.tick,
                    ctx.env.shape_form(),
                    ctx.env.outside_policy(),
                ));
            }
            vec![]
        }
    }

    #[test]
    fn transitions_fire_once_at_their_ticks() {
        let mut sim = SimBuilder::new(test_config(4, 1000), NoopBehavior)
            .placements(row(4))
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(rec.transitions, vec![
            ShapeTransition::new(500, ShapeForm::Split, OutsidePolicy::Repair),
            ShapeTransition::new(700, ShapeForm::Recovered, OutsidePolicy::Repair),
        ]);
        assert_eq!(sim.env.shape_form(), ShapeForm::Recovered);
    }

    #[test]
    fn bugs_see_the_new_form_from_the_transition_tick() {
        let mut sim = SimBuilder::new(test_config(2, 800), FormWatcher::default())
            .placements(row(2))
            .build()
            .unwrap();
        sim.run(&mut NoopObserver).unwrap();

        let seen = sim.behavior.seen.lock().unwrap();
        assert_eq!(seen.len(), 800);
        assert_eq!(seen[499].1, ShapeForm::Full);
        assert_eq!(seen[500].1, ShapeForm::Split);
        assert_eq!(seen[699].1, ShapeForm::Split);
        assert_eq!(seen[700].1, ShapeForm::Recovered);
        assert!(seen.iter().all(|&(_, _, policy)| policy == OutsidePolicy::Repair));
    }

    #[test]
    fn stepping_one_tick_past_t1_splits() {
        let mut sim = SimBuilder::new(test_config(2, 1000), NoopBehavior)
            .placements(row(2))
            .build()
            .unwrap();
        sim.run_ticks(500, &mut NoopObserver).unwrap();
        assert_eq!(sim.env.shape_form(), ShapeForm::Full);
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.env.shape_form(), ShapeForm::Split);
    }

    #[test]
    fn configured_ticks_move_the_schedule() {
        let config = test_config(2, 100).with_transition_ticks(10, 20);
        let mut sim = SimBuilder::new(config, NoopBehavior).placements(row(2)).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        let ticks: Vec<Tick> = rec.transitions.iter().map(|t| t.tick).collect();
        assert_eq!(ticks, vec![Tick(10), Tick(20)]);
    }
}

// ── Intent application ────────────────────────────────────────────────────────

#[cfg(test)]
mod intent_tests {
    use super::*;

    #[test]
    fn later_bugs_see_earlier_moves_in_the_same_tick() {
        /// Every bug steps right; bug 1 notes where bug 0 is when it acts.
        #[derive(Default)]
        struct Follow {
            seen: Mutex<Vec<f64>>,
        }
        impl SwarmBehavior for Follow {
            fn step(&self, bug: &Bug, ctx: &StepContext<'_>, _r: &mut AgentRng) -> Vec<Intent> {
                if bug.id == AgentId(1) {
                    let lead = ctx.env.bug(AgentId(0)).unwrap();
                    self.seen.lock().unwrap().push(lead.real_position.x);
                }
                vec![Intent::Move(Vec2::new(0.5, 0.0))]
            }
        }

        let mut sim = SimBuilder::new(test_config(2, 10), Follow::default())
            .placements(row(2))
            .build()
            .unwrap();
        sim.run_ticks(2, &mut NoopObserver).unwrap();

        assert_eq!(*sim.behavior.seen.lock().unwrap(), vec![10.5, 11.0]);
        let bug = sim.env.bug(AgentId(1)).unwrap();
        assert_eq!(bug.real_position, Vec2::new(14.0, 10.0));
        assert_eq!(bug.perceived_position, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn culling_does_not_skip_the_next_bug() {
        /// Culls even ids (with a trailing move that must be dropped) and
        /// records every visit.
        #[derive(Default)]
        struct CullEven {
            visited: Mutex<Vec<AgentId>>,
        }
        impl SwarmBehavior for CullEven {
            fn step(&self, bug: &Bug, _c: &StepContext<'_>, _r: &mut AgentRng) -> Vec<Intent> {
                self.visited.lock().unwrap().push(bug.id);
                if bug.id.0 % 2 == 0 {
                    vec![Intent::Cull, Intent::Move(Vec2::new(1.0, 0.0))]
                } else {
                    vec![]
                }
            }
        }

        let mut sim = SimBuilder::new(test_config(6, 10), CullEven::default())
            .placements(row(6))
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run_ticks(2, &mut rec).unwrap();

        let visited = sim.behavior.visited.lock().unwrap().clone();
        let ids = |v: &[u32]| v.iter().copied().map(AgentId).collect::<Vec<_>>();
        assert_eq!(visited, ids(&[0, 1, 2, 3, 4, 5, 1, 3, 5]));
        assert_eq!(rec.summaries[0].culled, 3);
        assert_eq!(rec.summaries[0].population, 3);
        assert_eq!(rec.summaries[1].culled, 0);
        assert_eq!(sim.env.bugs().ids(), ids(&[1, 3, 5]));
    }

    #[test]
    fn localize_and_shape_status_update_the_bug() {
        struct Fixed;
        impl SwarmBehavior for Fixed {
            fn step(&self, _b: &Bug, _c: &StepContext<'_>, _r: &mut AgentRng) -> Vec<Intent> {
                vec![
                    Intent::Localize(Vec2::new(1.0, 2.0)),
                    Intent::ShapeStatus { inside_estimated: true, inside_true: false },
                ]
            }
        }

        let mut sim = SimBuilder::new(test_config(1, 10), Fixed)
            .placements(row(1))
            .build()
            .unwrap();
        let mut rec = Recorder::default();
        sim.run_ticks(1, &mut rec).unwrap();

        let bug = sim.env.bug(AgentId(0)).unwrap();
        assert!(bug.localized);
        assert_eq!(bug.perceived_position, Vec2::new(1.0, 2.0));
        assert_eq!(bug.real_position, Vec2::new(10.0, 10.0));
        assert!(bug.inside_estimated);
        assert!(!bug.inside_true);

        let s = rec.summaries[0];
        assert_eq!((s.localized, s.inside_estimated, s.inside_true), (1, 1, 0));
    }
}

// ── Full swarm runs ───────────────────────────────────────────────────────────

#[cfg(test)]
mod swarm_tests {
    use super::*;

    #[test]
    fn repair_policy_keeps_population_constant() {
        let config = test_config(80, 120).with_seed(7);
        let mut sim = SimBuilder::new(config, BugBehavior).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert!(rec.summaries.iter().all(|s| s.population == 80 && s.culled == 0));
    }

    #[test]
    fn localisation_is_never_lost_without_culling() {
        let config = test_config(150, 150).with_seed(3);
        let mut sim = SimBuilder::new(config, BugBehavior).build().unwrap();
        let anchors = sim.env.bugs().iter().filter(|b| b.is_anchor()).count();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        let mut previous = anchors;
        for s in &rec.summaries {
            assert!(s.localized >= previous, "{}: {} < {previous}", s.tick, s.localized);
            previous = s.localized;
        }
    }

    #[test]
    fn cull_policy_only_shrinks_the_swarm() {
        let config = test_config(80, 100)
            .with_policy(OutsidePolicy::Cull)
            .with_transition_ticks(10_000, 20_000);
        let mut sim = SimBuilder::new(config, BugBehavior).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        let mut previous = 80;
        for s in &rec.summaries {
            assert!(s.population <= previous);
            assert_eq!(previous - s.population, s.culled);
            previous = s.population;
        }
        let total: usize = rec.summaries.iter().map(|s| s.culled).sum();
        assert_eq!(total + sim.env.population(), 80);
        assert!(rec.transitions.is_empty());
    }

    #[test]
    fn same_seed_same_swarm() {
        let run = || {
            let mut sim = SimBuilder::new(test_config(60, 40).with_seed(11), BugBehavior)
                .build()
                .unwrap();
            sim.run(&mut NoopObserver).unwrap();
            sim.snapshot()
        };
        assert_eq!(run(), run());
    }
}
