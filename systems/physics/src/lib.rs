#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-timestep platformer physics.
//!
//! Each [`step`] integrates the player's velocity and resolves collisions in
//! two axis-separated passes, horizontal first. Both passes scan the tile
//! list linearly in its stored order and resolve against the first
//! intersecting tile only, so the order produced by the level loader decides
//! which tile wins when the player overlaps several at once. Tile kinds do
//! not influence collision.

use ledgehop_core::{
    CellCoord, PlayerBody, Rect, Tile, GRAVITY, JUMP_VELOCITY, MAX_FALL_SPEED, TILE_SIZE,
};

/// Advances the player by exactly one fixed timestep against the provided solid tiles.
pub fn step(body: &mut PlayerBody, tiles: &[Tile]) {
    resolve_horizontal(body, tiles);
    resolve_vertical(body, tiles);
    if !body.on_ground {
        apply_gravity(body);
    }
}

/// Starts a jump if the player touched ground since the previous one.
///
/// Returns whether the jump took effect.
pub fn jump(body: &mut PlayerBody) -> bool {
    if !body.can_jump {
        return false;
    }
    body.y_velocity = JUMP_VELOCITY;
    body.can_jump = false;
    true
}

/// Teleports the player to the provided cell and zeroes both velocities.
///
/// Ground and jump flags are left untouched.
pub fn reset(body: &mut PlayerBody, cell: CellCoord) {
    body.rect.set_top_left(
        cell.column() as f32 * TILE_SIZE,
        cell.row() as f32 * TILE_SIZE,
    );
    body.x_velocity = 0.0;
    body.y_velocity = 0.0;
}

/// Adds the provided amount to the player's horizontal velocity.
pub fn nudge(body: &mut PlayerBody, delta: f32) {
    body.x_velocity += delta;
}

/// Stops horizontal movement.
pub fn halt(body: &mut PlayerBody) {
    body.x_velocity = 0.0;
}

fn resolve_horizontal(body: &mut PlayerBody, tiles: &[Tile]) {
    body.rect.translate_x(body.x_velocity);

    let Some(tile) = first_contact(&body.rect, tiles) else {
        return;
    };

    if body.x_velocity > 0.0 {
        body.rect.set_right(tile.rect().left());
    } else if body.x_velocity < 0.0 {
        body.rect.set_left(tile.rect().right());
    }
}

fn resolve_vertical(body: &mut PlayerBody, tiles: &[Tile]) {
    body.rect.translate_y(body.y_velocity);
    body.on_ground = false;

    let Some(tile) = first_contact(&body.rect, tiles) else {
        return;
    };

    if body.y_velocity > 0.0 {
        body.rect.set_bottom(tile.rect().top());
        body.on_ground = true;
        body.can_jump = true;
    } else if body.y_velocity < 0.0 {
        body.rect.set_top(tile.rect().bottom());
    }
    body.y_velocity = 0.0;
}

fn apply_gravity(body: &mut PlayerBody) {
    body.y_velocity = (body.y_velocity + GRAVITY).min(MAX_FALL_SPEED);
}

fn first_contact<'a>(rect: &Rect, tiles: &'a [Tile]) -> Option<&'a Tile> {
    tiles.iter().find(|tile| tile.rect().intersects(rect))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgehop_core::TileKind;

    #[test]
    fn first_contact_respects_list_order() {
        let near = Tile::new(TileKind::Wall, CellCoord::new(1, 0));
        let far = Tile::new(TileKind::StoneWall, CellCoord::new(1, 1));
        let rect = Rect::new(20.0, 20.0, 32.0, 32.0);

        let far_first = [far, near];
        let hit = first_contact(&rect, &far_first).expect("overlaps both tiles");
        assert_eq!(hit.kind(), TileKind::StoneWall);
        let near_first = [near, far];
        let hit = first_contact(&rect, &near_first).expect("overlaps both tiles");
        assert_eq!(hit.kind(), TileKind::Wall);
    }

    #[test]
    fn gravity_never_exceeds_terminal_speed() {
        let mut body = PlayerBody::spawn_at(CellCoord::new(0, 0));
        body.y_velocity = 5.9;
        apply_gravity(&mut body);
        assert_eq!(body.y_velocity, MAX_FALL_SPEED);
    }
}
