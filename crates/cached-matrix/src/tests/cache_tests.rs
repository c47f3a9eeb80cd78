//! Tests for cached inversion

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use approx::assert_relative_eq;

    use crate::tests::test_utils::{identity_residual, mat, CountingInverter};
    use crate::{
        solve_cached, solve_cached_with, CachedMatrix, InverseConfig, LinalgError, Matrix,
    };

    const HIT_MESSAGE: &str = "getting cached data";

    /// Formatted log output shared between a subscriber and the test.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` under an info-level subscriber and return what it logged.
    fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        let out = tracing::subscriber::with_default(subscriber, f);
        (out, buffer.contents())
    }

    #[test]
    fn test_hit_emits_diagnostic_once() {
        let mut x = CachedMatrix::new(mat(&[&[1.0, 2.0], &[3.0, 4.0]]));
        let config = InverseConfig::default();

        let ((), logs) = with_captured_logs(|| {
            solve_cached(&mut x, &config).unwrap();
            solve_cached(&mut x, &config).unwrap();
        });
        assert_eq!(logs.matches(HIT_MESSAGE).count(), 1, "logs: {logs}");
    }

    #[test]
    fn test_miss_emits_no_hit_diagnostic() {
        let mut x = CachedMatrix::new(mat(&[&[1.0, 2.0], &[3.0, 4.0]]));

        let ((), logs) = with_captured_logs(|| {
            solve_cached(&mut x, &InverseConfig::default()).unwrap();
        });
        assert_eq!(logs.matches(HIT_MESSAGE).count(), 0, "logs: {logs}");

        // A replaced matrix starts over with a miss
        x.set(mat(&[&[2.0, 0.0], &[0.0, 2.0]]));
        let ((), logs) = with_captured_logs(|| {
            solve_cached(&mut x, &InverseConfig::default()).unwrap();
        });
        assert!(!logs.contains(HIT_MESSAGE), "logs: {logs}");
    }

    #[test]
    fn test_wide_scale_entries_are_invertible() {
        let mut x = CachedMatrix::new(mat(&[&[1e12, 0.0], &[0.0, 0.5]]));
        let inv = solve_cached(&mut x, &InverseConfig::default()).unwrap();
        assert_relative_eq!(inv.get(0, 0).unwrap(), 1e-12, max_relative = 1e-15);
        assert_eq!(inv.get(1, 1), Some(2.0));

        let mut x = CachedMatrix::new(
            Matrix::<f32>::from_rows(vec![vec![1e6, 0.0], vec![0.0, 0.5]]).unwrap(),
        );
        let inv = solve_cached(&mut x, &InverseConfig::default()).unwrap();
        assert_relative_eq!(inv.get(0, 0).unwrap(), 1e-6, max_relative = 1e-6);
        assert_eq!(inv.get(1, 1), Some(2.0));
    }

    #[test]
    fn test_caller_threshold_reaches_inverter() {
        let mut x = CachedMatrix::new(mat(&[&[1e12, 0.0], &[0.0, 0.5]]));

        let strict = CountingInverter::new(InverseConfig::default().with_pivot_threshold(1e-12));
        let err = solve_cached_with(&mut x, &strict).unwrap_err();
        assert!(matches!(err, LinalgError::SingularPivot { index: 1, .. }));
        assert_eq!(strict.calls(), 1);
        assert!(!x.has_cached_inverse());
    }

    #[test]
    fn test_fresh_container_reports_absent() {
        let x = CachedMatrix::new(mat(&[&[1.0, 2.0], &[3.0, 4.0]]));
        assert!(x.get_cached_inverse().is_none());
    }

    #[test]
    fn test_2x2_computes_then_reuses() {
        let mut x = CachedMatrix::new(mat(&[&[1.0, 2.0], &[3.0, 4.0]]));
        let inverter = CountingInverter::default();

        let first = solve_cached_with(&mut x, &inverter).unwrap();
        let expected = [-2.0, 1.0, 1.5, -0.5];
        for (&got, &want) in first.as_slice().iter().zip(&expected) {
            assert_relative_eq!(got, want, epsilon = 1e-12);
        }
        let first_value = first.clone();
        let first_buffer = first.as_slice().as_ptr();
        assert_eq!(inverter.calls(), 1);

        let second = solve_cached_with(&mut x, &inverter).unwrap();
        assert_eq!(second, &first_value);
        // Same allocation: the stored inverse was handed back, not rebuilt
        assert_eq!(second.as_slice().as_ptr(), first_buffer);
        assert_eq!(inverter.calls(), 1);
    }

    #[test]
    fn test_singular_does_not_populate_cache() {
        let mut x = CachedMatrix::new(mat(&[&[1.0, 2.0], &[2.0, 4.0]]));
        let inverter = CountingInverter::default();

        let err = solve_cached_with(&mut x, &inverter).unwrap_err();
        assert!(matches!(err, LinalgError::SingularPivot { index: 1, .. }));
        assert!(x.get_cached_inverse().is_none());

        // Not cached, so the next call tries again and fails the same way
        let err = solve_cached_with(&mut x, &inverter).unwrap_err();
        assert!(err.is_singular());
        assert_eq!(inverter.calls(), 2);
    }

    #[test]
    fn test_set_invalidates_then_recomputes() {
        let mut x = CachedMatrix::new(mat(&[&[1.0, 0.0], &[0.0, 1.0]]));
        let inverter = CountingInverter::default();

        let inv = solve_cached_with(&mut x, &inverter).unwrap();
        assert_eq!(inv, &Matrix::identity(2).unwrap());

        x.set(mat(&[&[2.0, 0.0], &[0.0, 2.0]]));
        assert!(x.get_cached_inverse().is_none());

        let inv = solve_cached_with(&mut x, &inverter).unwrap();
        assert_eq!(inv, &mat(&[&[0.5, 0.0], &[0.0, 0.5]]));
        assert_eq!(inverter.calls(), 2);
    }

    #[test]
    fn test_repeated_hits_never_recompute() {
        let mut x = CachedMatrix::new(mat(&[&[3.0, 1.0], &[1.0, 2.0]]));
        let inverter = CountingInverter::default();

        for _ in 0..10 {
            solve_cached_with(&mut x, &inverter).unwrap();
        }
        assert_eq!(inverter.calls(), 1);
    }

    #[test]
    fn test_round_trip_identity() {
        let m = mat(&[&[4.0, -2.0, 1.0], &[3.0, 6.0, -4.0], &[2.0, 1.0, 8.0]]);
        let mut x = CachedMatrix::new(m.clone());

        let inv = solve_cached(&mut x, &InverseConfig::default()).unwrap();
        assert!(identity_residual(&m, inv).unwrap() < 1e-12);
    }

    #[test]
    fn test_empty_default_container() {
        let mut x = CachedMatrix::<f64>::default();
        let inv = solve_cached(&mut x, &InverseConfig::default()).unwrap();
        assert_eq!(inv.shape(), (0, 0));
        assert!(x.has_cached_inverse());
    }

    #[test]
    fn test_recovers_after_singular_set() {
        let mut x = CachedMatrix::new(mat(&[&[1.0, 2.0], &[2.0, 4.0]]));
        assert!(solve_cached(&mut x, &InverseConfig::default()).is_err());

        x.set(mat(&[&[1.0, 2.0], &[3.0, 4.0]]));
        let inv = solve_cached(&mut x, &InverseConfig::default()).unwrap();
        assert_relative_eq!(inv.get(1, 0).unwrap(), 1.5, epsilon = 1e-12);
    }
}
