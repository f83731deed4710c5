/// The only runtime type: numbers, truth values and counts are all `f64`.
pub type Value = f64;

pub const TRUE: Value = 1.0;
pub const FALSE: Value = 0.0;

pub fn from_bool(value: bool) -> Value {
    if value { TRUE } else { FALSE }
}

/// Only exactly `1` is true. `2`, `0.5` and `NaN` all count as false.
pub fn is_truthy(value: Value) -> bool {
    value == TRUE
}
