//! Box-vs-box collision detection and response
//!
//! Resolution always works one mover against one obstacle. The mover is
//! rolled back to where it stood before its last displacement, the obstacle
//! is classified against that rolled-back box, and the velocity is then
//! re-applied as a fresh displacement. Classifying against the rolled-back
//! box rather than the overlapping one is what keeps resting contacts stable.

use rand::Rng;

use super::body::{Body, Bounded, BoundingBox};
use super::state::Protagonist;
use crate::consts::{BALL_DEFLECTION_SPAN, BALL_RECOIL, PROTAGONIST_RECOIL};
use crate::edges_meet;
use crate::error::DomainError;
use crate::geom::Vector;

/// Strict rectangle intersection. Shared edges do not count.
#[inline]
pub fn overlaps(a: &BoundingBox, b: &BoundingBox) -> bool {
    a.left() < b.right() && b.left() < a.right() && a.top() < b.bottom() && b.top() < a.bottom()
}

/// True if `mover` rests on `support`: its bottom edge meets the support's
/// top edge and the horizontal extents overlap or touch
#[inline]
pub fn touches_from_above(mover: &BoundingBox, support: &BoundingBox) -> bool {
    edges_meet(mover.bottom(), support.top())
        && mover.left() <= support.right()
        && support.left() <= mover.right()
}

/// Where the mover sits relative to the obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Mover is right of the obstacle
    Right,
    /// Mover is left of the obstacle
    Left,
    /// Mover is on top of the obstacle
    Above,
    /// Mover is underneath the obstacle
    Below,
    /// No separating edge; the boxes were already interpenetrating
    Embedded,
}

/// Classify by edge comparisons, first match wins
pub fn classify(mover: &BoundingBox, obstacle: &BoundingBox) -> Contact {
    if mover.left() >= obstacle.right() {
        Contact::Right
    } else if mover.right() <= obstacle.left() {
        Contact::Left
    } else if mover.bottom() <= obstacle.top() {
        Contact::Above
    } else if mover.top() >= obstacle.bottom() {
        Contact::Below
    } else {
        Contact::Embedded
    }
}

/// Push `body` away from `obstacle` by `magnitude`, leaving velocity alone
fn recoil(body: &mut Body, obstacle: &BoundingBox, magnitude: f32) -> Result<(), DomainError> {
    let away = Vector::generate_from(obstacle.center(), body.center())?.elongate(magnitude)?;
    body.bounds_mut().translate(away.as_vec2());
    Ok(())
}

/// Resolve the protagonist against one overlapping obstacle.
///
/// Side contacts zero the horizontal velocity and snap flush; vertical
/// contacts zero the vertical velocity and snap flush. Landing on top also
/// grounds the protagonist; the caller records which obstacle it landed on.
pub fn resolve_protagonist(
    protagonist: &mut Protagonist,
    obstacle: &BoundingBox,
) -> Result<Contact, DomainError> {
    let body = &mut protagonist.body;
    body.retreat();
    let contact = classify(body.bounds(), obstacle);
    match contact {
        Contact::Right => {
            body.velocity = body.velocity.project(Vector::Y_AXIS)?;
            body.bounds_mut().set_left(obstacle.right());
        }
        Contact::Left => {
            body.velocity = body.velocity.project(Vector::Y_AXIS)?;
            body.bounds_mut().set_right(obstacle.left());
        }
        Contact::Above => {
            body.velocity = body.velocity.project(Vector::X_AXIS)?;
            body.bounds_mut().set_bottom(obstacle.top());
            let condition = &mut protagonist.condition;
            condition.airborne = false;
            condition.jumping = false;
            condition.reset_airborne_ticks();
        }
        Contact::Below => {
            body.velocity = body.velocity.project(Vector::X_AXIS)?;
            body.bounds_mut().set_top(obstacle.bottom());
        }
        Contact::Embedded => recoil(body, obstacle, PROTAGONIST_RECOIL)?,
    }
    protagonist.body.advance();
    Ok(contact)
}

/// Rotate by a random angle within ±[`BALL_DEFLECTION_SPAN`]/2
fn deflect<R: Rng>(velocity: Vector, rng: &mut R) -> Result<Vector, DomainError> {
    if velocity.is_zero() {
        return Ok(velocity);
    }
    let delta = (rng.random::<f32>() - 0.5) * BALL_DEFLECTION_SPAN;
    velocity.add_argument(delta)
}

/// Bounce a ball off one overlapping obstacle. Balls never snap; they only
/// flip velocity components, each flip followed by a small random deflection.
pub fn resolve_ball<R: Rng>(
    ball: &mut Body,
    obstacle: &BoundingBox,
    rng: &mut R,
) -> Result<Contact, DomainError> {
    ball.retreat();
    let contact = classify(ball.bounds(), obstacle);
    match contact {
        Contact::Right | Contact::Left => {
            ball.velocity = deflect(ball.velocity.scale_xy(-1.0, 1.0)?, rng)?;
        }
        Contact::Above | Contact::Below => {
            ball.velocity = deflect(ball.velocity.scale_xy(1.0, -1.0)?, rng)?;
        }
        Contact::Embedded => {
            recoil(ball, obstacle, BALL_RECOIL)?;
            ball.velocity = deflect(ball.velocity.scale_xy(-1.0, 1.0)?, rng)?;
            ball.velocity = deflect(ball.velocity.scale_xy(1.0, -1.0)?, rng)?;
        }
    }
    ball.advance();
    Ok(contact)
}
