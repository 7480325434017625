use axum::http::StatusCode;
use rand::Rng;

/// Status codes an injected fault is drawn from
pub const ERROR_CODES: [StatusCode; 9] = [
    StatusCode::BAD_REQUEST,
    StatusCode::UNAUTHORIZED,
    StatusCode::FORBIDDEN,
    StatusCode::REQUEST_TIMEOUT,
    StatusCode::CONFLICT,
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

pub const MIN_ERROR_PERCENTAGE: u8 = 1;
pub const MAX_ERROR_PERCENTAGE: u8 = 99;

/// Picks response statuses for `/errors` and for routes registered with
/// `error: true`.
///
/// Each pick is independent: with probability `error_percentage`% the status
/// is one of [`ERROR_CODES`], otherwise it is 200. The percentage is kept in
/// [`MIN_ERROR_PERCENTAGE`]..=[`MAX_ERROR_PERCENTAGE`] so repeated picks always
/// mix success and failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaultInjector {
    error_percentage: u8,
}

impl FaultInjector {
    pub fn new(error_percentage: u8) -> Self {
        FaultInjector {
            error_percentage: error_percentage.clamp(MIN_ERROR_PERCENTAGE, MAX_ERROR_PERCENTAGE),
        }
    }

    pub fn error_percentage(&self) -> u8 {
        self.error_percentage
    }

    pub fn pick(&self) -> StatusCode {
        self.pick_with(&mut rand::thread_rng())
    }

    pub fn pick_with<R: Rng>(&self, rng: &mut R) -> StatusCode {
        if rng.gen_range(0..100u8) < self.error_percentage {
            ERROR_CODES[rng.gen_range(0..ERROR_CODES.len())]
        } else {
            StatusCode::OK
        }
    }
}

impl Default for FaultInjector {
    fn default() -> Self {
        FaultInjector::new(50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_lowest_percentage_still_fails_sometimes() {
        let injector = FaultInjector::new(MIN_ERROR_PERCENTAGE);
        let mut rng = StdRng::seed_from_u64(7);
        let picks: Vec<StatusCode> = (0..10_000).map(|_| injector.pick_with(&mut rng)).collect();

        let successes = picks.iter().filter(|s| **s == StatusCode::OK).count();
        assert!(successes > 9_000, "only {} successes", successes);
        assert!(successes < picks.len());
    }

    #[test]
    fn test_highest_percentage_still_succeeds_sometimes() {
        let injector = FaultInjector::new(MAX_ERROR_PERCENTAGE);
        let mut rng = StdRng::seed_from_u64(7);
        let picks: Vec<StatusCode> = (0..10_000).map(|_| injector.pick_with(&mut rng)).collect();

        let failures = picks.iter().filter(|s| ERROR_CODES.contains(s)).count();
        assert!(failures > 9_000, "only {} failures", failures);
        assert!(failures < picks.len());
    }

    #[test]
    fn test_percentage_is_clamped() {
        assert_eq!(FaultInjector::new(0).error_percentage(), MIN_ERROR_PERCENTAGE);
        assert_eq!(FaultInjector::new(100).error_percentage(), MAX_ERROR_PERCENTAGE);
        assert_eq!(FaultInjector::new(250).error_percentage(), MAX_ERROR_PERCENTAGE);
        assert_eq!(FaultInjector::new(30).error_percentage(), 30);
    }

    #[test]
    fn test_default_mixes_success_and_errors() {
        let injector = FaultInjector::default();
        let mut rng = StdRng::seed_from_u64(42);
        let seen: HashSet<StatusCode> = (0..1_000).map(|_| injector.pick_with(&mut rng)).collect();

        assert!(seen.contains(&StatusCode::OK));
        assert!(seen.len() > 2);
        assert!(seen.iter().all(|s| *s == StatusCode::OK || ERROR_CODES.contains(s)));
    }

    #[test]
    fn test_thread_rng_pick() {
        let status = FaultInjector::default().pick();
        assert!(status == StatusCode::OK || ERROR_CODES.contains(&status));
    }
}
