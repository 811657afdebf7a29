#[cfg(test)]
mod tests {
    use crate::config::*;
    use std::path::PathBuf;

    #[test]
    fn iterations_counts_inclusive_range() {
        assert_eq!(SweepParams::new(1000, 500, 2000).iterations(), 3);
        assert_eq!(SweepParams::new(5, 1, 5).iterations(), 1);
        assert_eq!(SweepParams::new(10, 1, 5).iterations(), 0);
        assert_eq!(SweepParams::new(0, 3, 10).iterations(), 4);
    }

    #[test]
    fn iterations_handles_full_i64_span() {
        let params = SweepParams::new(i64::MIN, i64::MAX, i64::MAX);
        assert_eq!(params.iterations(), 3);
    }

    #[test]
    fn iterations_saturates_on_widest_unit_step() {
        let params = SweepParams::new(i64::MIN, 1, i64::MAX);
        assert!(params.validate().is_ok());
        assert_eq!(params.iterations(), u64::MAX);
    }

    #[test]
    fn validate_rejects_non_positive_increment() {
        let err = SweepParams::new(1, 0, 10).validate().unwrap_err();
        assert!(err.to_string().contains("increment must be positive"));
        assert!(SweepParams::new(1, -5, 10).validate().is_err());
    }

    #[test]
    fn validate_accepts_empty_range_with_any_increment() {
        assert!(SweepParams::new(10, 0, 5).validate().is_ok());
        assert!(SweepParams::new(10, -1, 5).validate().is_ok());
    }

    #[test]
    fn default_config_targets_go_bench() {
        let cfg = SweepConfig::default();
        assert_eq!(cfg.program, "go");
        assert_eq!(cfg.args, vec!["test", "-bench=."]);
        assert_eq!(cfg.placeholder, 1000);
        assert_eq!(cfg.output, PathBuf::from("results.csv"));
        assert_eq!(cfg.expected_metrics(), 5);
    }

    #[test]
    fn in_dir_resolves_paths() {
        let cfg = SweepConfig::in_dir("/tmp/bhs");
        assert_eq!(cfg.artifact, PathBuf::from("/tmp/bhs/main_test.go"));
        assert_eq!(cfg.output, PathBuf::from("/tmp/bhs/results.csv"));
        assert_eq!(cfg.working_dir, PathBuf::from("/tmp/bhs"));
    }
}
