#[cfg(test)]
mod tests {
    use open_channel::{Channel, ChannelConfig, SolverOptions};

    #[test]
    fn test_minimal_toml() {
        let cfg: ChannelConfig = toml::from_str(
            r#"
            b = 12.0
            zleft = 0.0
            zright = 0.0
            n = 0.015
            slope = 0.0087
            q = 300.0
            "#,
        )
        .unwrap();
        assert_eq!(cfg, ChannelConfig::new(12.0, 0.0, 0.0, 0.015, 0.0087, 300.0));
        assert!(Channel::new(cfg).is_ok());
    }

    #[test]
    fn test_full_toml() {
        let cfg: ChannelConfig = toml::from_str(
            r#"
            b = 160.0
            zleft = 2.0
            zright = 2.0
            n = 0.014
            slope = 0.0034
            q = 83700.0
            y1 = 15.0
            y2 = 17.0
            alpha = 1.05
            steps = 20

            [solver]
            rtol = 1e-8
            "#,
        )
        .unwrap();
        assert_eq!(cfg.y1, Some(15.0));
        assert_eq!(cfg.y2, Some(17.0));
        assert_eq!(cfg.alpha, 1.05);
        assert_eq!(cfg.steps, 20);
        assert_eq!(cfg.solver.rtol, 1e-8);
        assert_eq!(cfg.solver.max_iter, SolverOptions::default().max_iter);
        let ch = Channel::new(cfg).unwrap();
        assert!(ch.direct_step().unwrap() > 0.0);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let r: Result<ChannelConfig, _> = toml::from_str(
            r#"
            b = 12.0
            zleft = 0.0
            zright = 0.0
            n = 0.015
            slope = 0.0087
            q = 300.0
            width = 3.0
            "#,
        );
        assert!(r.is_err());
    }

    #[test]
    fn test_missing_required_key() {
        let r: Result<ChannelConfig, _> = toml::from_str("b = 12.0\nn = 0.015\n");
        assert!(r.is_err());
    }
}
