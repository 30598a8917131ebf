//! Input diagnostics for the recurrence engines
//!
//! The engines never clamp or reject their inputs. Arguments outside
//! [-1, 1] produce NaN or meaningless values and derivatives at x = ±1
//! divide by zero. These helpers only report such inputs through the `log`
//! facade and skip the scan entirely when warnings are disabled.

use ndarray::ArrayView1;

/// Count of arguments with |x| > 1.
pub(crate) fn count_outside_unit_interval(x: ArrayView1<f64>) -> usize {
    x.iter().filter(|&&v| v.abs() > 1.0).count()
}

/// Count of arguments with x² == 1.
pub(crate) fn count_at_poles(x: ArrayView1<f64>) -> usize {
    x.iter().filter(|&&v| v * v == 1.0).count()
}

/// Warn about arguments outside the domain and, when derivatives were
/// requested, about arguments at the poles.
pub(crate) fn warn_on_domain(engine: &str, x: ArrayView1<f64>, with_derivative: bool) {
    if !log::log_enabled!(log::Level::Warn) {
        return;
    }

    let outside = count_outside_unit_interval(x);
    if outside > 0 {
        log::warn!(
            "{engine}: {outside} of {} arguments outside [-1, 1], results are not meaningful there",
            x.len()
        );
    }

    if with_derivative {
        let poles = count_at_poles(x);
        if poles > 0 {
            log::warn!(
                "{engine}: {poles} of {} arguments at x = ±1, derivatives are singular there",
                x.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_count_outside_unit_interval() {
        let x = array![-1.5, -1.0, 0.0, 0.999, 1.0, 1.0000001];
        assert_eq!(count_outside_unit_interval(x.view()), 2);
    }

    #[test]
    fn test_count_at_poles() {
        let x = array![-1.0, -0.5, 0.5, 1.0, 1.0];
        assert_eq!(count_at_poles(x.view()), 3);
    }
}
