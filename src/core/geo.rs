use serde::{Deserialize, Serialize};

/// Forward affine constants mapping the game's F11 plane onto world pixels:
/// `world_x = A·game_x + B·game_y + C`, `world_y = B·game_x − A·game_y + D`.
/// Fitted once against in-game reference positions; never re-derived at
/// runtime.
const FWD_A: f64 = -0.004_998_667_793_638_28;
const FWD_B: f64 = -0.000_000_214_642_549_806_45;
const FWD_C: f64 = 4_096.886_351_518_97;
const FWD_D: f64 = 4_096.774_637_471_93;

/// Algebraic inverse of the forward matrix. The forward map is a scaled
/// rotation, so the inverse keeps the same functional form with a second
/// constant set.
const INV_DET: f64 = FWD_A * FWD_A + FWD_B * FWD_B;
const INV_A: f64 = FWD_A / INV_DET;
const INV_B: f64 = FWD_B / INV_DET;
const INV_C: f64 = -(INV_A * FWD_C + INV_B * FWD_D);
const INV_D: f64 = INV_A * FWD_D - INV_B * FWD_C;

/// Half-span of the F11 plane covered by the world square.
const F11_COORD_MAX: f64 = 819_200.0;

/// Represents a point in world-pixel or screen space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn scale(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    pub fn floor(&self) -> Point {
        Point::new(self.x.floor(), self.y.floor())
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A position in the game's native coordinate system, as shown by the
/// in-game F11 window
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GamePoint {
    pub x: f64,
    pub y: f64,
}

impl GamePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Checks whether the coordinate lies inside the F11 plane the world
    /// square covers. Out-of-range points still transform; they just land
    /// outside `[0, world_size]`.
    pub fn is_valid(&self) -> bool {
        self.x.abs() <= F11_COORD_MAX && self.y.abs() <= F11_COORD_MAX
    }
}

/// Projects an F11 coordinate into world-pixel space.
///
/// Deterministic and allocation-free; performs no range validation (callers
/// clamp for display where needed).
pub fn game_to_world(point: GamePoint) -> Point {
    Point::new(
        FWD_A * point.x + FWD_B * point.y + FWD_C,
        FWD_B * point.x - FWD_A * point.y + FWD_D,
    )
}

/// Inverse of [`game_to_world`]; `world_to_game(game_to_world(p)) ≈ p`
/// within floating rounding.
pub fn world_to_game(point: Point) -> GamePoint {
    GamePoint::new(
        INV_A * point.x + INV_B * point.y + INV_C,
        INV_B * point.x - INV_A * point.y + INV_D,
    )
}

/// Formats one F11 axis value the way the in-game F11 window shows it:
/// in thousands with a `k` suffix.
pub fn format_f11(value: f64) -> String {
    let thousands = value / 1_000.0;
    if (thousands - thousands.trunc()).abs() < 1e-9 {
        format!("{}k", thousands.trunc() as i64)
    } else {
        format!("{:.1}k", thousands)
    }
}

/// Identifies one pre-rendered square raster tile of the map pyramid.
/// Level 0 is the whole world in a single tile; each level doubles the
/// grid on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub z: u8,
    pub row: u32,
    pub col: u32,
}

impl TileCoord {
    pub fn new(z: u8, row: u32, col: u32) -> Self {
        Self { z, row, col }
    }

    /// Checks if the tile indices are valid for their pyramid level
    pub fn is_valid(&self) -> bool {
        let per_side = 1u32 << self.z;
        self.row < per_side && self.col < per_side
    }
}
