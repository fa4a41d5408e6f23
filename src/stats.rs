//! Pure scoring functions shared by the session and the presentation layer.
//!
//! Everything here is a function of plain numbers so the scoring contract can
//! be tested without a session or a clock. The formulas are the standard
//! 5-chars-per-word ones: gross wpm ignores errors, net wpm subtracts one
//! "word" per error-minute and is floored at zero.

/// Gross words per minute: (typed chars / 5) per elapsed minute.
///
/// Returns a non-finite value when `elapsed_minutes` is zero; callers that
/// display this must clamp (see [`net_wpm`]).
pub fn gross_wpm(typed_len: usize, elapsed_minutes: f64) -> f64 {
    (typed_len as f64 / 5.0) / elapsed_minutes
}

/// Net words per minute: gross wpm minus the error rate, rounded, floored at
/// zero. Non-finite intermediates (no elapsed time yet) report as 0.
pub fn net_wpm(typed_len: usize, error_count: usize, elapsed_minutes: f64) -> u32 {
    let net = gross_wpm(typed_len, elapsed_minutes) - error_count as f64 / elapsed_minutes;

    if !net.is_finite() {
        return 0;
    }

    net.round().max(0.0) as u32
}

/// Accuracy percentage, rounded. Perfect (100) before any typing occurs.
pub fn accuracy(typed_len: usize, error_count: usize) -> u32 {
    if typed_len == 0 {
        return 100;
    }

    let correct = typed_len.saturating_sub(error_count);
    ((correct as f64 / typed_len as f64) * 100.0).round() as u32
}

/// Portion of the reference typed so far, as a percentage capped at 100.
pub fn progress_percent(typed_len: usize, reference_len: usize) -> f64 {
    ((typed_len as f64 / reference_len as f64) * 100.0).min(100.0)
}

/// Status label for the progress readout.
pub fn progress_label(percent: f64) -> String {
    if percent >= 100.0 {
        String::from("Complete!")
    } else {
        format!("{}% complete", percent.round())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gross_wpm_ten_words_in_a_minute() {
        // 50 chars = 10 words
        assert_eq!(gross_wpm(50, 1.0), 10.0);
    }

    #[test]
    fn test_gross_wpm_scales_with_time() {
        assert_eq!(gross_wpm(50, 0.5), 20.0);
        assert_eq!(gross_wpm(25, 1.0), 5.0);
    }

    #[test]
    fn test_net_wpm_no_errors() {
        assert_eq!(net_wpm(50, 0, 1.0), 10);
    }

    #[test]
    fn test_net_wpm_error_penalty() {
        // gross 10, minus 2 errors per minute
        assert_eq!(net_wpm(50, 2, 1.0), 8);
    }

    #[test]
    fn test_net_wpm_floored_at_zero() {
        assert_eq!(net_wpm(5, 20, 1.0), 0);
    }

    #[test]
    fn test_net_wpm_zero_elapsed_is_zero() {
        // 0/0 and inf-inf both come out non-finite and must clamp to 0
        assert_eq!(net_wpm(0, 0, 0.0), 0);
        assert_eq!(net_wpm(10, 1, 0.0), 0);
    }

    #[test]
    fn test_accuracy_rounds() {
        assert_eq!(accuracy(3, 1), 67);
        assert_eq!(accuracy(4, 1), 75);
        assert_eq!(accuracy(10, 0), 100);
    }

    #[test]
    fn test_accuracy_before_typing_is_perfect() {
        assert_eq!(accuracy(0, 0), 100);
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(0, 50), 0.0);
        assert_eq!(progress_percent(25, 50), 50.0);
        assert_eq!(progress_percent(50, 50), 100.0);
    }

    #[test]
    fn test_progress_percent_capped() {
        assert_eq!(progress_percent(60, 50), 100.0);
    }

    #[test]
    fn test_progress_label() {
        assert_eq!(progress_label(0.0), "0% complete");
        assert_eq!(progress_label(66.6), "67% complete");
        assert_eq!(progress_label(100.0), "Complete!");
    }
}
