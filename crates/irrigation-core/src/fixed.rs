use fixed::types::I32F32;

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits.
pub type Fixed64 = I32F32;

/// Game time in minutes since the course opened.
pub type GameMinutes = u64;

pub const MINUTES_PER_HOUR: GameMinutes = 60;
pub const MINUTES_PER_DAY: GameMinutes = 24 * MINUTES_PER_HOUR;

/// Upper bound of the pressure scale.
pub const MAX_PRESSURE: Fixed64 = Fixed64::from_bits(100 << 32);

/// Convert an f64 to Fixed64. Use only for initialization, never in sim loop.
#[inline]
pub fn f64_to_fixed64(v: f64) -> Fixed64 {
    Fixed64::from_num(v)
}

/// Convert an f64 to Fixed64, or `None` for NaN, infinities and values
/// outside the Q32.32 range. Use for values read from files.
#[inline]
pub fn checked_f64_to_fixed64(v: f64) -> Option<Fixed64> {
    Fixed64::checked_from_num(v)
}

/// Convert Fixed64 to f64. Use only for display, never in sim loop.
#[inline]
pub fn fixed64_to_f64(v: Fixed64) -> f64 {
    v.to_num::<f64>()
}

/// Clamp a value into `[0, 1]`.
#[inline]
pub fn clamp_unit(v: Fixed64) -> Fixed64 {
    v.clamp(Fixed64::ZERO, Fixed64::ONE)
}

/// Clamp a value into `[0, 100]`.
#[inline]
pub fn clamp_pressure(v: Fixed64) -> Fixed64 {
    v.clamp(Fixed64::ZERO, MAX_PRESSURE)
}

/// Pressure as a fraction of [`MAX_PRESSURE`], clamped to `[0, 1]`.
#[inline]
pub fn pressure_fraction(pressure: Fixed64) -> Fixed64 {
    clamp_unit(clamp_pressure(pressure) / MAX_PRESSURE)
}

/// Convert a whole number of days to minutes.
#[inline]
pub const fn days(n: u64) -> GameMinutes {
    n * MINUTES_PER_DAY
}
