use rand::Rng;

use crate::config::GridSize;
use crate::snake::Cell;

/// Number of steps per axis; each axis has `FOOD_BUCKETS + 1` possible values.
pub const FOOD_BUCKETS: i32 = 10;

/// Draws a food cell on the coarse food lattice.
///
/// Each axis rounds `u * 10` for a uniform `u` in `[0, 1)` and scales the
/// bucket to the grid, so only 11 values per axis are reachable. The snake
/// body is not avoided.
#[must_use]
pub fn quantized_position<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize) -> Cell {
    Cell {
        x: scale_bucket(draw_bucket(rng), bounds.width),
        y: scale_bucket(draw_bucket(rng), bounds.height),
    }
}

/// Returns every value one axis of [`quantized_position`] can produce.
#[must_use]
pub fn lattice_values(extent: u16) -> Vec<i32> {
    (0..=FOOD_BUCKETS)
        .map(|bucket| scale_bucket(bucket, extent))
        .collect()
}

fn draw_bucket<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    let unit: f64 = rng.gen_range(0.0..1.0);
    // Rounds half away from zero, so 0 and 10 each get half a bucket.
    (unit * f64::from(FOOD_BUCKETS)).round() as i32
}

fn scale_bucket(bucket: i32, extent: u16) -> i32 {
    bucket * (i32::from(extent) - 1) / FOOD_BUCKETS
}
