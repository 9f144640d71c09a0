//! Sprite selection for each snake segment.
//!
//! Corners are never rotated: each of the four corner assets is drawn
//! pre-oriented and covers exactly two turn pairs (see [`corner_for`]).

use crate::model::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Direction of a unit step from `from` to `to`. Screen y grows downward.
    pub fn between(from: Position, to: Position) -> Option<Direction> {
        match (to.x - from.x, to.y - from.y) {
            (1, 0) => Some(Direction::Right),
            (-1, 0) => Some(Direction::Left),
            (0, 1) => Some(Direction::Down),
            (0, -1) => Some(Direction::Up),
            _ => None,
        }
    }

    /// Clockwise rotation applied to sprites drawn facing right.
    pub fn rotation_degrees(self) -> u16 {
        match self {
            Direction::Right => 0,
            Direction::Down => 90,
            Direction::Left => 180,
            Direction::Up => 270,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteRole {
    Apple,
    GoldenApple,
    Head,
    Tail,
    BodyStraight,
    CornerUpLeft,
    CornerLeftDown,
    CornerDownRight,
    CornerRightUp,
}

impl SpriteRole {
    /// Load order of the asset batch.
    pub const ALL: [SpriteRole; 9] = [
        SpriteRole::Apple,
        SpriteRole::GoldenApple,
        SpriteRole::Head,
        SpriteRole::Tail,
        SpriteRole::BodyStraight,
        SpriteRole::CornerUpLeft,
        SpriteRole::CornerLeftDown,
        SpriteRole::CornerDownRight,
        SpriteRole::CornerRightUp,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            SpriteRole::Apple => "apple",
            SpriteRole::GoldenApple => "golden_apple",
            SpriteRole::Head => "head",
            SpriteRole::Tail => "tail",
            SpriteRole::BodyStraight => "body_straight",
            SpriteRole::CornerUpLeft => "body_corner_up_left",
            SpriteRole::CornerLeftDown => "body_corner_left_down",
            SpriteRole::CornerDownRight => "body_corner_down_right",
            SpriteRole::CornerRightUp => "body_corner_right_up",
        }
    }
}

/// Fixed turn table. Opposite and same-direction pairs have no corner.
pub fn corner_for(prev: Direction, next: Direction) -> Option<SpriteRole> {
    use Direction::*;
    match (prev, next) {
        (Down, Right) => Some(SpriteRole::CornerDownRight),
        (Right, Up) => Some(SpriteRole::CornerRightUp),
        (Up, Left) => Some(SpriteRole::CornerUpLeft),
        (Left, Down) => Some(SpriteRole::CornerLeftDown),
        (Right, Down) => Some(SpriteRole::CornerUpLeft),
        (Up, Right) => Some(SpriteRole::CornerLeftDown),
        (Left, Up) => Some(SpriteRole::CornerDownRight),
        (Down, Left) => Some(SpriteRole::CornerRightUp),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SegmentSprite {
    pub role: SpriteRole,
    pub rotation_degrees: u16,
    /// Neighbouring cells were not a unit step apart; the fallback sprite was chosen.
    pub degraded: bool,
}

impl SegmentSprite {
    fn facing(role: SpriteRole, dir: Option<Direction>) -> Self {
        Self {
            role,
            rotation_degrees: dir.unwrap_or(Direction::Right).rotation_degrees(),
            degraded: dir.is_none(),
        }
    }

    fn fallback() -> Self {
        Self {
            role: SpriteRole::BodyStraight,
            rotation_degrees: 0,
            degraded: true,
        }
    }
}

/// Sprite and rotation for segment `i` of a head-first snake.
pub fn resolve(snake: &[Position], i: usize) -> Option<SegmentSprite> {
    let seg = *snake.get(i)?;
    let last = snake.len() - 1;
    if i == 0 {
        if last == 0 {
            return Some(SegmentSprite {
                role: SpriteRole::Head,
                rotation_degrees: 0,
                degraded: false,
            });
        }
        return Some(SegmentSprite::facing(
            SpriteRole::Head,
            Direction::between(seg, snake[1]),
        ));
    }
    if i == last {
        return Some(SegmentSprite::facing(
            SpriteRole::Tail,
            Direction::between(snake[i - 1], seg),
        ));
    }
    let prev_dir = Direction::between(snake[i - 1], seg);
    let next_dir = Direction::between(seg, snake[i + 1]);
    let (Some(prev_dir), Some(next_dir)) = (prev_dir, next_dir) else {
        return Some(SegmentSprite::fallback());
    };
    if prev_dir == next_dir {
        return Some(SegmentSprite {
            role: SpriteRole::BodyStraight,
            rotation_degrees: prev_dir.rotation_degrees(),
            degraded: false,
        });
    }
    Some(match corner_for(prev_dir, next_dir) {
        Some(role) => SegmentSprite {
            role,
            rotation_degrees: 0,
            degraded: false,
        },
        // doubling back onto itself
        None => SegmentSprite::fallback(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn unit_steps_only() {
        assert_eq!(Direction::between(p(0, 0), p(1, 0)), Some(Right));
        assert_eq!(Direction::between(p(0, 0), p(0, 1)), Some(Down));
        assert_eq!(Direction::between(p(0, 0), p(-1, 0)), Some(Left));
        assert_eq!(Direction::between(p(0, 0), p(0, -1)), Some(Up));
        assert_eq!(Direction::between(p(0, 0), p(1, 1)), None);
        assert_eq!(Direction::between(p(0, 0), p(2, 0)), None);
        assert_eq!(Direction::between(p(0, 0), p(0, 0)), None);
    }

    #[test]
    fn all_eight_turns_have_a_corner() {
        let turns = [
            (Down, Right),
            (Right, Up),
            (Up, Left),
            (Left, Down),
            (Right, Down),
            (Up, Right),
            (Left, Up),
            (Down, Left),
        ];
        for (a, b) in turns {
            assert!(corner_for(a, b).is_some(), "{a:?} -> {b:?}");
        }
        // each physical corner covers exactly two pairs
        for role in [
            SpriteRole::CornerUpLeft,
            SpriteRole::CornerLeftDown,
            SpriteRole::CornerDownRight,
            SpriteRole::CornerRightUp,
        ] {
            let n = turns.iter().filter(|(a, b)| corner_for(*a, *b) == Some(role)).count();
            assert_eq!(n, 2, "{role:?}");
        }
    }

    #[test]
    fn corner_table_is_not_symmetric() {
        assert_eq!(corner_for(Down, Right), Some(SpriteRole::CornerDownRight));
        assert_eq!(corner_for(Right, Down), Some(SpriteRole::CornerUpLeft));
        assert_ne!(corner_for(Down, Right), corner_for(Right, Down));
        assert_eq!(corner_for(Left, Up), Some(SpriteRole::CornerDownRight));
        assert_eq!(corner_for(Down, Left), Some(SpriteRole::CornerRightUp));
    }

    #[test]
    fn straight_and_opposite_pairs_have_no_corner() {
        for d in [Up, Down, Left, Right] {
            assert_eq!(corner_for(d, d), None);
        }
        assert_eq!(corner_for(Up, Down), None);
        assert_eq!(corner_for(Left, Right), None);
    }

    #[test]
    fn straight_body_rotates_with_direction() {
        let vertical = [p(0, 0), p(0, 1), p(0, 2)];
        let s = resolve(&vertical, 1).unwrap();
        assert_eq!(s.role, SpriteRole::BodyStraight);
        assert_eq!(s.rotation_degrees, 90);
        let leftward = [p(5, 0), p(4, 0), p(3, 0)];
        assert_eq!(resolve(&leftward, 1).unwrap().rotation_degrees, 180);
    }

    #[test]
    fn head_and_tail() {
        let snake = [p(0, 0), p(0, -1), p(1, -1)];
        let head = resolve(&snake, 0).unwrap();
        assert_eq!(head.role, SpriteRole::Head);
        assert_eq!(head.rotation_degrees, 270);
        let tail = resolve(&snake, 2).unwrap();
        assert_eq!(tail.role, SpriteRole::Tail);
        assert_eq!(tail.rotation_degrees, 0);
        let corner = resolve(&snake, 1).unwrap();
        assert_eq!(corner.role, SpriteRole::CornerLeftDown);
        assert_eq!(corner.rotation_degrees, 0);
    }

    #[test]
    fn single_segment_faces_right() {
        let s = resolve(&[p(3, 3)], 0).unwrap();
        assert_eq!(s.role, SpriteRole::Head);
        assert_eq!(s.rotation_degrees, 0);
        assert!(!s.degraded);
        assert_eq!(resolve(&[p(3, 3)], 1), None);
    }

    #[test]
    fn gap_falls_back_to_unrotated_straight() {
        let snake = [p(0, 0), p(0, 1), p(3, 1), p(4, 1)];
        let s = resolve(&snake, 1).unwrap();
        assert_eq!(s.role, SpriteRole::BodyStraight);
        assert_eq!(s.rotation_degrees, 0);
        assert!(s.degraded);
        let head = resolve(&[p(0, 0), p(5, 5)], 0).unwrap();
        assert_eq!(head.rotation_degrees, 0);
        assert!(head.degraded);
    }
}
