//! Tick scaling with orders of magnitude snapped to multiples of 3
//!
//! Plain scientific notation picks whatever exponent fits each panel, so one
//! panel reads `×10⁴` and its neighbour `×10⁵`. Snapping down to a multiple
//! of 3 keeps every panel in SI-style units (thousands, millions, ...).

/// Orders strictly inside this range are left unscaled
pub const DEFAULT_POWER_LIMITS: (i32, i32) = (-6, 6);

const MAX_DECIMALS: i32 = 6;

/// Computes an [`AxisScale`] for a set of axis values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisScaler {
    power_limits: (i32, i32),
}

impl Default for AxisScaler {
    fn default() -> Self {
        Self::new(DEFAULT_POWER_LIMITS)
    }
}

impl AxisScaler {
    #[must_use]
    pub const fn new(power_limits: (i32, i32)) -> Self {
        Self { power_limits }
    }

    /// Exponent scientific notation would use for `values`
    ///
    /// This is `floor(log10(max |v|))` when that lies outside the power
    /// limits, and 0 otherwise (or when there are no non-zero values).
    #[must_use]
    pub fn natural_order(&self, values: &[f64]) -> i32 {
        let Some(peak) = peak_magnitude(values) else {
            return 0;
        };

        #[allow(clippy::cast_possible_truncation)]
        let order = peak.log10().floor() as i32;
        let (low, high) = self.power_limits;
        if order <= low || order >= high {
            order
        } else {
            0
        }
    }

    /// Scale for `values`, with the order snapped down to a multiple of 3
    #[must_use]
    pub fn scale(&self, values: &[f64]) -> AxisScale {
        let order = snap_order(self.natural_order(values));
        AxisScale {
            order,
            decimals: decimals_for(values, order),
        }
    }
}

/// Round an exponent down to the nearest multiple of 3
#[must_use]
pub const fn snap_order(order: i32) -> i32 {
    order - order.rem_euclid(3)
}

/// Tick formatting for one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisScale {
    order: i32,
    decimals: usize,
}

impl AxisScale {
    /// Identity scale: no exponent, `decimals` fractional digits
    #[must_use]
    pub const fn unscaled(decimals: usize) -> Self {
        Self { order: 0, decimals }
    }

    /// Exponent every tick value is divided by
    #[must_use]
    pub const fn order(&self) -> i32 {
        self.order
    }

    #[must_use]
    pub const fn decimals(&self) -> usize {
        self.decimals
    }

    /// Tick label for `value`
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        let scaled = value / 10f64.powi(self.order);
        let label = format!("{:.*}", self.decimals, scaled);
        // "-0.00" reads as a sign error on an axis
        if label.starts_with('-') && label[1..].chars().all(|c| c == '0' || c == '.') {
            label[1..].to_string()
        } else {
            label
        }
    }

    /// Multiplier to show next to the axis, if any
    ///
    /// With `math_text` the exponent is typeset (`×10⁶`), otherwise it is
    /// written in e-notation (`1e6`).
    #[must_use]
    pub fn offset_label(&self, math_text: bool) -> Option<String> {
        if self.order == 0 {
            return None;
        }
        if math_text {
            Some(format!("×10{}", superscript(self.order)))
        } else {
            Some(format!("1e{}", self.order))
        }
    }

    /// Axis description with the multiplier appended
    #[must_use]
    pub fn describe(&self, description: &str, math_text: bool) -> String {
        match self.offset_label(math_text) {
            Some(offset) => format!("{description} [{offset}]"),
            None => description.to_string(),
        }
    }
}

fn peak_magnitude(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .map(f64::abs)
        .filter(|v| *v > 0.0)
        .reduce(f64::max)
}

// Enough fractional digits to tell ticks about a fifth of the span apart.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn decimals_for(values: &[f64], order: i32) -> usize {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min > max {
        return 0;
    }

    let divisor = 10f64.powi(order);
    let span = (max - min) / divisor;
    let reference = if span > 0.0 {
        span / 5.0
    } else {
        let magnitude = max.abs().max(min.abs()) / divisor;
        if magnitude == 0.0 {
            return 0;
        }
        magnitude
    };

    let digits = -(reference.log10().floor() as i32);
    digits.clamp(0, MAX_DECIMALS) as usize
}

fn superscript(n: i32) -> String {
    n.to_string()
        .chars()
        .map(|c| match c {
            '-' => '⁻',
            '0' => '⁰',
            '1' => '¹',
            '2' => '²',
            '3' => '³',
            '4' => '⁴',
            '5' => '⁵',
            '6' => '⁶',
            '7' => '⁷',
            '8' => '⁸',
            '9' => '⁹',
            other => other,
        })
        .collect()
}
