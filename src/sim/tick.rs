//! Fixed timestep simulation tick
//!
//! Advances a [`Level`] by one frame. The step order is part of the game feel
//! and must not change: gravity, input, condition refresh, airborne counter,
//! platforms, movement, collisions, ground, view, pose, termination.

use log::{debug, info, trace};

use super::body::{Bounded, BoundingBox};
use super::collision::{Contact, overlaps, resolve_ball, resolve_protagonist, touches_from_above};
use super::condition::Direction;
use super::state::{GroundRef, Level};
use crate::consts::LIFT_COOLDOWN_TICKS;
use crate::error::Error;

/// Intent flags sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
    /// Lift a boulder, or drop the one being carried
    pub lift: bool,
    /// Debug: finish the level in victory
    pub cheat: bool,
}

/// Advance the level by one fixed timestep.
///
/// An error leaves the level in an unspecified state and should be treated as
/// fatal for it.
pub fn tick(level: &mut Level, input: &TickInput) -> Result<(), Error> {
    apply_gravity(level)?;
    apply_input(level, input)?;

    let condition = &mut level.protagonist.condition;
    condition.jumping = level.protagonist.body.velocity.y() < 0.0;
    condition.tick_airborne();

    advance_platforms(level);
    integrate(level);
    resolve_collisions(level)?;
    update_ground(level);

    level.refresh_view();
    level.pose = level.protagonist.condition.pose();
    check_termination(level);

    level.ticks += 1;
    trace!(
        "tick {}: center {} velocity {}",
        level.ticks,
        level.protagonist.body.center(),
        level.protagonist.body.velocity
    );
    Ok(())
}

fn apply_gravity(level: &mut Level) -> Result<(), Error> {
    let body = &mut level.protagonist.body;
    if level.protagonist.condition.airborne {
        body.velocity = body.velocity.add(level.gravity)?;
    }
    Ok(())
}

fn apply_input(level: &mut Level, input: &TickInput) -> Result<(), Error> {
    if input.cheat {
        level.finished = true;
        level.victorious = true;
    }

    let protagonist = &mut level.protagonist;
    if input.left {
        protagonist.walk(Direction::Left)?;
    }
    if input.right {
        protagonist.walk(Direction::Right)?;
    }
    if !input.left && !input.right {
        protagonist.halt()?;
    }
    protagonist.condition.set_aim(input);

    if input.jump && !protagonist.condition.airborne {
        protagonist.jump()?;
        if let Some(ground) = level.ground.take() {
            debug!("Jumped off {ground:?}");
        }
    }

    let condition = &mut level.protagonist.condition;
    let airborne_ticks = condition.airborne_ticks();
    if airborne_ticks > 0 && airborne_ticks < LIFT_COOLDOWN_TICKS {
        condition.can_lift = false;
    } else if !input.lift {
        condition.can_lift = true;
    }

    if input.lift && condition.can_lift {
        if condition.carrying {
            level.drop_boulder()?;
        } else {
            lift_boulder(level);
        }
    }
    Ok(())
}

/// Try to pick up the boulder under the aim point. The attempt disarms the
/// lift either way.
fn lift_boulder(level: &mut Level) {
    let target = level.protagonist.aim_point();
    if let Some(boulder) = level.grid.remove_at(target) {
        debug!("Lifted boulder {} at {target}", boulder.id);
        level.protagonist.condition.carrying = true;
        if level.ground == Some(GroundRef::Static(boulder.id)) {
            level.ground = None;
        }
    }
    let condition = &mut level.protagonist.condition;
    condition.can_lift = false;
    condition.airborne = true;
}

fn advance_platforms(level: &mut Level) {
    for (index, platform) in level.platforms.iter_mut().enumerate() {
        let velocity = platform.step_pattern();
        if level.ground == Some(GroundRef::Platform(index)) {
            level.protagonist.body.displace(velocity);
        }
    }
}

fn integrate(level: &mut Level) {
    level.protagonist.body.advance();
    for ball in &mut level.balls {
        ball.body.advance();
    }
    for platform in &mut level.platforms {
        platform.body.advance();
    }
}

/// Protagonist first, then every ball; blocks, then boulders, then platforms
fn resolve_collisions(level: &mut Level) -> Result<(), Error> {
    let probe = level.protagonist.body.bounds().left();

    for obstacle in level.grid.query_near(probe) {
        if overlaps(level.protagonist.body.bounds(), obstacle.bounds()) {
            let contact = resolve_protagonist(&mut level.protagonist, obstacle.bounds())?;
            land(&mut level.ground, contact, GroundRef::Static(obstacle.id));
        }
    }
    for (index, platform) in level.platforms.iter().enumerate() {
        if overlaps(level.protagonist.body.bounds(), platform.body.bounds()) {
            let contact = resolve_protagonist(&mut level.protagonist, platform.body.bounds())?;
            land(&mut level.ground, contact, GroundRef::Platform(index));
        }
    }

    for ball in &mut level.balls {
        let probe = ball.body.bounds().left();
        for obstacle in level.grid.query_near(probe) {
            if overlaps(ball.body.bounds(), obstacle.bounds()) {
                resolve_ball(&mut ball.body, obstacle.bounds(), &mut level.rng)?;
            }
        }
        for platform in &level.platforms {
            if overlaps(ball.body.bounds(), platform.body.bounds()) {
                resolve_ball(&mut ball.body, platform.body.bounds(), &mut level.rng)?;
            }
        }
    }
    Ok(())
}

fn land(ground: &mut Option<GroundRef>, contact: Contact, support: GroundRef) {
    if contact == Contact::Above {
        if *ground != Some(support) {
            debug!("Landed on {support:?}");
        }
        *ground = Some(support);
    }
}

/// Keep the ground reference honest. Runs only while grounded: if the
/// protagonist no longer rests on its ground, look for a new one among
/// nearby blocks, then boulders, then platforms.
fn update_ground(level: &mut Level) {
    if level.protagonist.condition.airborne {
        return;
    }
    let feet = *level.protagonist.body.bounds();
    let supported = level
        .ground
        .and_then(|g| level.ground_bounds(g))
        .is_some_and(|support| touches_from_above(&feet, &support));
    if supported {
        return;
    }

    if let Some(ground) = level.ground.take() {
        debug!("Walked off {ground:?}");
    }
    level.protagonist.condition.airborne = true;

    let found = find_support(level, &feet);
    if let Some(support) = found {
        debug!("Stepped onto {support:?}");
        level.ground = Some(support);
        level.protagonist.condition.airborne = false;
    }
}

fn find_support(level: &Level, feet: &BoundingBox) -> Option<GroundRef> {
    let probe = feet.left();
    let rests_on = |support: &BoundingBox| touches_from_above(feet, support);
    level
        .grid
        .blocks_near(probe)
        .chain(level.grid.boulders_near(probe))
        .find(|o| rests_on(o.bounds()))
        .map(|o| GroundRef::Static(o.id))
        .or_else(|| {
            level
                .platforms
                .iter()
                .position(|p| rests_on(p.body.bounds()))
                .map(GroundRef::Platform)
        })
}

/// Goal beats hazards when both overlap on the same tick
fn check_termination(level: &mut Level) {
    let was_finished = level.finished;
    let me = level.protagonist.body.bounds();

    if overlaps(me, level.goal.bounds()) {
        level.victorious = true;
    }
    if level.victorious {
        level.finished = true;
    } else if level.balls.iter().any(|b| overlaps(me, b.body.bounds()))
        || level.spikes.iter().any(|s| overlaps(me, s.bounds()))
    {
        level.finished = true;
    }

    if level.finished && !was_finished {
        if level.victorious {
            info!("Level won after {} ticks", level.ticks + 1);
        } else {
            info!("Level lost after {} ticks", level.ticks + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Vector;
    use crate::sim::condition::Stance;
    use crate::sim::grid::{ObstacleKind, SpatialIndex};
    use crate::sim::pattern::MotionPattern;
    use crate::sim::state::{Ball, Goal, LevelSetup, MovingPlatform, Protagonist, Spikes};
    use glam::Vec2;

    const BS: f32 = 40.0;

    fn v(x: f32, y: f32) -> Vector {
        Vector::new(x, y).unwrap()
    }

    fn cell(col: f32, row: f32) -> BoundingBox {
        BoundingBox::new(Vec2::new((col + 0.5) * BS, (row + 0.5) * BS), BS, BS).unwrap()
    }

    /// Protagonist 30x60 standing with its feet exactly on row `floor_row`
    fn standing_at(col: f32, floor_row: f32) -> Protagonist {
        let center = Vec2::new((col + 0.5) * BS, floor_row * BS - 30.0);
        let bounds = BoundingBox::new(center, 30.0, 60.0).unwrap();
        Protagonist::new(bounds, 5.0, 12.0, BS, Direction::Right)
    }

    /// A 30-cell level with a solid floor on row 5 and the goal far away
    fn setup() -> LevelSetup {
        let mut grid = SpatialIndex::new(30, BS).unwrap();
        for col in 0..30 {
            grid.insert_static(ObstacleKind::Block, cell(col as f32, 5.0), col);
        }
        LevelSetup {
            protagonist: standing_at(3.0, 5.0),
            grid,
            balls: Vec::new(),
            spikes: Vec::new(),
            platforms: Vec::new(),
            goal: Goal::new(cell(28.0, 4.0)),
            gravity: v(0.0, 0.5),
            seed: 42,
        }
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    fn run(level: &mut Level, input: TickInput, ticks: usize) {
        for _ in 0..ticks {
            tick(level, &input).unwrap();
        }
    }

    #[test]
    fn test_settles_onto_floor() {
        let mut level = Level::new(setup());
        assert!(level.protagonist().condition.airborne);
        run(&mut level, idle(), 3);

        let p = level.protagonist();
        assert!(!p.condition.airborne);
        assert!(matches!(level.ground(), Some(GroundRef::Static(_))));
        assert_eq!(p.body.bounds().bottom(), 5.0 * BS);
        assert_eq!(p.body.velocity, Vector::ZERO);
        assert_eq!(level.pose().stance, Stance::Grounded);
    }

    #[test]
    fn test_resting_stays_grounded() {
        let mut level = Level::new(setup());
        run(&mut level, idle(), 3);
        let center = level.protagonist().body.center();
        for _ in 0..20 {
            tick(&mut level, &idle()).unwrap();
            assert!(!level.protagonist().condition.airborne);
            assert!(level.ground().is_some());
        }
        assert_eq!(level.protagonist().body.center(), center);
        assert_eq!(level.ticks(), 23);
    }

    #[test]
    fn test_walking_hands_ground_between_blocks() {
        let mut level = Level::new(setup());
        run(&mut level, idle(), 3);
        let first = level.ground();

        let right = TickInput {
            right: true,
            ..idle()
        };
        run(&mut level, right, 30);
        let p = level.protagonist();
        assert!(!p.condition.airborne);
        assert_ne!(level.ground(), first);
        assert_eq!(p.body.bounds().bottom(), 5.0 * BS);
        assert_eq!(p.condition.facing, Direction::Right);
        assert_eq!(level.pose().stance, Stance::Walking);
    }

    #[test]
    fn test_jump() {
        let mut level = Level::new(setup());
        run(&mut level, idle(), 3);

        let jump = TickInput {
            jump: true,
            ..idle()
        };
        tick(&mut level, &jump).unwrap();
        let p = level.protagonist();
        assert_eq!(p.body.velocity.y(), -12.0);
        assert!(p.condition.airborne);
        assert!(p.condition.jumping);
        assert!(level.ground().is_none());
        assert_eq!(p.condition.airborne_ticks(), 1);

        tick(&mut level, &idle()).unwrap();
        assert_eq!(level.protagonist().condition.airborne_ticks(), 2);
        assert_eq!(level.protagonist().body.velocity.y(), -11.5);

        // Holding jump in mid-air does nothing
        tick(&mut level, &jump).unwrap();
        assert_eq!(level.protagonist().body.velocity.y(), -11.0);

        // Eventually lands back on the floor
        run(&mut level, idle(), 60);
        let p = level.protagonist();
        assert!(!p.condition.airborne);
        assert_eq!(p.condition.airborne_ticks(), 0);
        assert_eq!(p.body.bounds().bottom(), 5.0 * BS);
    }

    #[test]
    fn test_wall_stops_walk_flush() {
        let mut s = setup();
        s.grid.insert_static(ObstacleKind::Block, cell(6.0, 4.0), 6);
        let mut level = Level::new(s);
        run(&mut level, idle(), 3);

        let right = TickInput {
            right: true,
            ..idle()
        };
        run(&mut level, right, 20);
        let p = level.protagonist();
        assert_eq!(p.body.bounds().right(), 6.0 * BS);
        assert_eq!(p.body.velocity.x(), 0.0);
    }

    #[test]
    fn test_goal_wins() {
        let mut s = setup();
        s.goal = Goal::new(cell(4.0, 4.0));
        let mut level = Level::new(s);
        let right = TickInput {
            right: true,
            ..idle()
        };
        run(&mut level, right, 6);
        assert!(level.is_victorious());
        assert!(level.is_finished());
    }

    #[test]
    fn test_goal_beats_spikes() {
        let mut s = setup();
        s.goal = Goal::new(cell(3.0, 4.0));
        s.spikes.push(Spikes::new(cell(3.0, 4.0), Direction::Up));
        let mut level = Level::new(s);
        tick(&mut level, &idle()).unwrap();
        assert!(level.is_finished());
        assert!(level.is_victorious());
    }

    #[test]
    fn test_spikes_kill() {
        let mut s = setup();
        s.spikes.push(Spikes::new(cell(4.0, 4.0), Direction::Up));
        let mut level = Level::new(s);
        let right = TickInput {
            right: true,
            ..idle()
        };
        run(&mut level, right, 6);
        assert!(level.is_finished());
        assert!(!level.is_victorious());
    }

    #[test]
    fn test_ball_kills() {
        let mut s = setup();
        let ball = BoundingBox::new(Vec2::new(8.5 * BS, 4.5 * BS), 20.0, 20.0).unwrap();
        s.balls.push(Ball::new(ball, v(-4.0, 0.0)));
        let mut level = Level::new(s);
        run(&mut level, idle(), 60);
        assert!(level.is_finished());
        assert!(!level.is_victorious());
    }

    #[test]
    fn test_cheat_finishes_victorious() {
        let mut level = Level::new(setup());
        let cheat = TickInput {
            cheat: true,
            ..idle()
        };
        tick(&mut level, &cheat).unwrap();
        assert!(level.is_finished());
        assert!(level.is_victorious());
    }

    #[test]
    fn test_reset_restores_start() {
        let mut s = setup();
        s.spikes.push(Spikes::new(cell(5.0, 4.0), Direction::Up));
        let mut level = Level::new(s);
        let start = level.start_center();

        let right = TickInput {
            right: true,
            ..idle()
        };
        run(&mut level, right, 25);
        assert!(level.is_finished());
        assert_ne!(level.protagonist().body.center(), start);

        level.reset_protagonist().unwrap();
        let p = level.protagonist();
        assert_eq!(p.body.center(), start);
        assert_eq!(p.body.velocity, Vector::ZERO);
        assert!(p.condition.airborne);
        assert!(level.ground().is_none());
        assert!(!level.is_finished());
        assert!(!level.is_victorious());
    }

    #[test]
    fn test_platform_carries_rider() {
        let mut grid = SpatialIndex::new(30, BS).unwrap();
        grid.insert_static(ObstacleKind::Block, cell(0.0, 9.0), 0);
        let platform_box = BoundingBox::new(Vec2::new(100.0, 210.0), 80.0, 20.0).unwrap();
        let pattern = MotionPattern::from_parts(&[v(2.0, 0.0), v(-2.0, 0.0)], &[50, 50]).unwrap();
        let rider = BoundingBox::new(Vec2::new(100.0, 170.0), 30.0, 60.0).unwrap();
        let mut level = Level::new(LevelSetup {
            protagonist: Protagonist::new(rider, 5.0, 12.0, BS, Direction::Right),
            grid,
            balls: Vec::new(),
            spikes: Vec::new(),
            platforms: vec![MovingPlatform::new(platform_box, pattern)],
            goal: Goal::new(cell(28.0, 0.0)),
            gravity: v(0.0, 0.5),
            seed: 1,
        });

        tick(&mut level, &idle()).unwrap();
        assert_eq!(level.ground(), Some(GroundRef::Platform(0)));

        let offset = level.protagonist().body.center().x - level.platforms()[0].body.center().x;
        run(&mut level, idle(), 20);
        let p = level.protagonist();
        let platform = &level.platforms()[0];
        assert!(!p.condition.airborne);
        assert!((p.body.center().x - platform.body.center().x - offset).abs() < 1e-3);
        assert!(platform.body.center().x > 130.0);
        assert!(touches_from_above(p.body.bounds(), platform.body.bounds()));
    }

    #[test]
    fn test_lift_and_drop_boulder() {
        let mut s = setup();
        let boulder = s
            .grid
            .insert_static(ObstacleKind::Boulder, cell(4.0, 4.0), 4)
            .unwrap();
        let mut level = Level::new(s);
        run(&mut level, idle(), 3);
        // Idle aim follows facing (right): reach one cell ahead of center
        assert!(cell(4.0, 4.0).contains(level.protagonist().aim_point()));

        let lift = TickInput {
            lift: true,
            ..idle()
        };
        tick(&mut level, &lift).unwrap();
        assert!(level.protagonist().condition.carrying);
        assert!(!level.grid().contains(boulder));

        // Holding the key does not drop it again
        run(&mut level, lift, 10);
        assert!(level.protagonist().condition.carrying);

        // Release, land, press again: the boulder goes back down
        run(&mut level, idle(), 10);
        assert!(!level.protagonist().condition.airborne);
        let count = level.grid().count();
        tick(&mut level, &lift).unwrap();
        assert!(!level.protagonist().condition.carrying);
        assert_eq!(level.grid().count(), count + 1);
        assert!(!level.protagonist().condition.can_lift);
    }

    #[test]
    fn test_lift_disabled_early_in_jump() {
        let mut s = setup();
        s.grid.insert_static(ObstacleKind::Boulder, cell(4.0, 4.0), 4);
        s.grid.insert_static(ObstacleKind::Boulder, cell(4.0, 3.0), 4);
        let mut level = Level::new(s);
        run(&mut level, idle(), 3);
        let count = level.grid().count();

        let jump = TickInput {
            jump: true,
            ..idle()
        };
        tick(&mut level, &jump).unwrap();

        let lift = TickInput {
            lift: true,
            ..idle()
        };
        for expected in 1..LIFT_COOLDOWN_TICKS {
            let p = level.protagonist();
            assert_eq!(p.condition.airborne_ticks(), expected);
            assert!(cell(4.0, 3.0).contains(p.aim_point()));
            tick(&mut level, &lift).unwrap();
            assert!(!level.protagonist().condition.carrying);
            assert!(!level.protagonist().condition.can_lift);
        }
        assert_eq!(level.grid().count(), count);

        // Back on the floor a fresh press works
        run(&mut level, idle(), 60);
        assert!(!level.protagonist().condition.airborne);
        tick(&mut level, &lift).unwrap();
        assert!(level.protagonist().condition.carrying);
        assert_eq!(level.grid().count(), count - 1);
    }

    /// Feet straddling cells 3 and 4 of a level with nothing else underfoot
    fn straddling(grid: SpatialIndex, platforms: Vec<MovingPlatform>) -> Level {
        let feet = BoundingBox::new(Vec2::new(4.0 * BS, 5.0 * BS - 30.0), 30.0, 60.0).unwrap();
        Level::new(LevelSetup {
            protagonist: Protagonist::new(feet, 5.0, 12.0, BS, Direction::Right),
            grid,
            balls: Vec::new(),
            spikes: Vec::new(),
            platforms,
            goal: Goal::new(cell(28.0, 0.0)),
            gravity: v(0.0, 0.5),
            seed: 3,
        })
    }

    #[test]
    fn test_ground_rescan_prefers_blocks() {
        let mut grid = SpatialIndex::new(30, BS).unwrap();
        grid.insert_static(ObstacleKind::Boulder, cell(3.0, 5.0), 3);
        let block = grid
            .insert_static(ObstacleKind::Block, cell(4.0, 5.0), 4)
            .unwrap();
        let mut level = straddling(grid, Vec::new());
        tick(&mut level, &idle()).unwrap();
        assert_eq!(level.ground(), Some(GroundRef::Static(block)));

        // Drop the reference while still standing on both
        level.ground = None;
        tick(&mut level, &idle()).unwrap();
        assert!(!level.protagonist().condition.airborne);
        assert_eq!(level.ground(), Some(GroundRef::Static(block)));
    }

    #[test]
    fn test_ground_rescan_prefers_boulders_over_platforms() {
        let mut grid = SpatialIndex::new(30, BS).unwrap();
        let boulder = grid
            .insert_static(ObstacleKind::Boulder, cell(3.0, 5.0), 3)
            .unwrap();
        let still = MotionPattern::from_parts(&[Vector::ZERO], &[1]).unwrap();
        let platform = MovingPlatform::new(cell(4.0, 5.0), still);
        let mut level = straddling(grid, vec![platform]);
        tick(&mut level, &idle()).unwrap();
        assert_eq!(level.ground(), Some(GroundRef::Static(boulder)));

        level.ground = None;
        tick(&mut level, &idle()).unwrap();
        assert_eq!(level.ground(), Some(GroundRef::Static(boulder)));
    }

    #[test]
    fn test_ball_bounces_off_platform() {
        let mut s = setup();
        let ball = BoundingBox::new(Vec2::new(12.5 * BS, 100.0), 20.0, 20.0).unwrap();
        s.balls.push(Ball::new(ball, v(0.0, 3.0)));
        let still = MotionPattern::from_parts(&[Vector::ZERO], &[1]).unwrap();
        let shelf = BoundingBox::new(Vec2::new(12.5 * BS, 160.0), 80.0, 20.0).unwrap();
        s.platforms.push(MovingPlatform::new(shelf, still));
        let mut level = Level::new(s);

        for _ in 0..20 {
            tick(&mut level, &idle()).unwrap();
            let ball = &level.balls()[0];
            assert!(!overlaps(ball.body.bounds(), &shelf));
        }
        let velocity = level.balls()[0].body.velocity;
        assert!(velocity.y() < -2.9);
        // Deflection stays within ±π/60 of straight up
        assert!(velocity.x().abs() < 3.0 * (std::f32::consts::PI / 60.0).sin() + 1e-4);
        assert!(level.balls()[0].body.bounds().bottom() <= shelf.top());
    }

    #[test]
    fn test_lifting_own_ground_detaches() {
        let mut s = setup();
        // Replace the floor under the start with a boulder
        let mut grid = SpatialIndex::new(30, BS).unwrap();
        let boulder = grid
            .insert_static(ObstacleKind::Boulder, cell(3.0, 5.0), 3)
            .unwrap();
        s.grid = grid;
        let mut level = Level::new(s);
        run(&mut level, idle(), 3);
        assert_eq!(level.ground(), Some(GroundRef::Static(boulder)));

        // Aim down at the boulder underfoot
        let lift_down = TickInput {
            lift: true,
            down: true,
            ..idle()
        };
        tick(&mut level, &lift_down).unwrap();
        assert!(level.protagonist().condition.carrying);
        assert!(level.ground().is_none());
        assert!(level.protagonist().condition.airborne);
    }

    #[test]
    fn test_reset_drops_cargo() {
        let mut s = setup();
        s.grid.insert_static(ObstacleKind::Boulder, cell(4.0, 4.0), 4);
        let mut level = Level::new(s);
        run(&mut level, idle(), 3);
        let count = level.grid().count();
        let lift = TickInput {
            lift: true,
            ..idle()
        };
        tick(&mut level, &lift).unwrap();
        assert_eq!(level.grid().count(), count - 1);

        level.reset_protagonist().unwrap();
        assert!(!level.protagonist().condition.carrying);
        assert_eq!(level.grid().count(), count);
    }

    #[test]
    fn test_view_tracks_protagonist() {
        let mut level = Level::new(setup());
        run(&mut level, idle(), 3);
        let goal = level.view().last().copied().unwrap();
        let expected = level.goal().center() - level.protagonist().body.center();
        assert_eq!(goal.offset, expected);
        assert_eq!(goal.width, BS);
    }

    #[test]
    fn test_determinism() {
        let build = || {
            let mut s = setup();
            for i in 0..3 {
                let ball = BoundingBox::new(
                    Vec2::new((10.0 + 4.0 * i as f32) * BS, 2.0 * BS),
                    20.0,
                    20.0,
                )
                .unwrap();
                s.balls.push(Ball::new(ball, v(3.0, 2.5)));
            }
            s.grid.insert_static(ObstacleKind::Block, cell(12.0, 1.0), 12);
            Level::new(s)
        };
        let mut a = build();
        let mut b = build();
        let script = |i: usize| TickInput {
            right: i % 40 < 25,
            left: i % 40 >= 30,
            jump: i % 17 == 0,
            ..idle()
        };
        for i in 0..300 {
            tick(&mut a, &script(i)).unwrap();
            tick(&mut b, &script(i)).unwrap();
        }
        assert_eq!(a.protagonist().body.center(), b.protagonist().body.center());
        for (x, y) in a.balls().iter().zip(b.balls()) {
            assert_eq!(x.body.center(), y.body.center());
            assert_eq!(x.body.velocity, y.body.velocity);
        }
    }
}
