//! Power-of-ten grid line placement.

/// Bias for live grid lines; also selects which ruler lines are major.
pub const DEFAULT_BIAS: f64 = 0.25;
/// Bias for the denser full set of ruler lines written into documents.
pub const RULER_BIAS: f64 = 1.25;

/// Iterator over grid line positions covering `[origin, origin + width]`.
///
/// Values are computed as `first + i * step` rather than by accumulation so
/// long runs do not drift.
#[derive(Debug, Clone)]
pub struct GridSteps {
    first: f64,
    step: f64,
    end: f64,
    index: u64,
}

impl GridSteps {
    /// Spacing between consecutive values.
    pub fn step(&self) -> f64 {
        self.step
    }
}

impl Iterator for GridSteps {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let value = self.first + self.index as f64 * self.step;
        if value > self.end {
            return None;
        }
        self.index += 1;
        Some(value)
    }
}

/// Yields grid positions at the "nicest" power-of-ten spacing for `width`.
///
/// `step = 10^floor(log10(width) - bias)`, starting at the largest multiple of
/// `step` not above `origin`. A non-positive or non-finite width yields the
/// single value `floor(origin)` with a step of 1.
pub fn steps(origin: f64, width: f64, bias: f64) -> GridSteps {
    if width <= 0.0 || !width.is_finite() || !origin.is_finite() {
        let first = if origin.is_finite() { origin.floor() } else { 0.0 };
        return GridSteps {
            first,
            step: 1.0,
            end: first,
            index: 0,
        };
    }

    let step = 10f64.powf((width.log10() - bias).floor());
    let first = (origin / step).floor() * step;
    GridSteps {
        first,
        step,
        end: origin + width,
        index: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hundred_wide_steps_by_ten() {
        let values: Vec<f64> = steps(0.0, 100.0, DEFAULT_BIAS).collect();
        assert_eq!(values.len(), 11);
        assert_eq!(values[0], 0.0);
        assert_eq!(values[1], 10.0);
        assert_eq!(values[10], 100.0);
    }

    #[test]
    fn start_is_floored_to_step_multiple() {
        let grid = steps(-15.0, 100.0, DEFAULT_BIAS);
        assert_eq!(grid.step(), 10.0);
        let values: Vec<f64> = grid.collect();
        assert_eq!(values.first(), Some(&-20.0));
        assert_eq!(values.last(), Some(&80.0));
    }

    #[test]
    fn small_widths_use_fractional_steps() {
        let grid = steps(0.0, 1.0, DEFAULT_BIAS);
        assert!((grid.step() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn degenerate_width_yields_single_step() {
        let zero: Vec<f64> = steps(3.5, 0.0, DEFAULT_BIAS).collect();
        assert_eq!(zero, vec![3.0]);

        let negative = steps(0.0, -12.0, DEFAULT_BIAS);
        assert_eq!(negative.step(), 1.0);
        assert_eq!(negative.count(), 1);

        assert_eq!(steps(0.0, f64::NAN, RULER_BIAS).count(), 1);
    }

    #[test]
    fn ruler_bias_is_denser_than_default() {
        let major = steps(0.0, 2.0, DEFAULT_BIAS);
        let ruler = steps(0.0, 2.0, RULER_BIAS);
        assert!((major.step() - 1.0).abs() < 1e-12);
        assert!((ruler.step() - 0.1).abs() < 1e-12);
    }
}
