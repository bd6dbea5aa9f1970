#[cfg(test)]
mod tests {
    use std::fs;

    use approx::assert_abs_diff_eq;
    use open_channel::{
        Channel, ChannelConfig, ChannelError, ErrorKind, Point, ProfileRenderer, ProfileType,
        TableRenderer,
    };
    use tempfile::NamedTempFile;

    fn river(y1: f64, y2: f64) -> Channel {
        Channel::new(
            ChannelConfig::new(160.0, 2.0, 2.0, 0.014, 0.0034, 83700.0)
                .with_depths(y1, y2)
                .with_alpha(1.05),
        )
        .unwrap()
    }

    fn mild(y1: f64, y2: f64) -> Channel {
        Channel::new(ChannelConfig::new(10.0, 0.0, 0.0, 0.02, 0.001, 150.0).with_depths(y1, y2))
            .unwrap()
    }

    #[test]
    fn test_area_exact() {
        assert_eq!(river(15.0, 17.0).area(15.0), 2850.0);
    }

    #[test]
    fn test_steep_drawdown_distance() {
        let ch = river(15.0, 17.0);
        assert_eq!(ch.profile_type(15.0).unwrap(), ProfileType::S2);
        assert_eq!(ch.downstream().unwrap(), Point::One);
        let d = ch.direct_step().unwrap();
        assert_abs_diff_eq!(d, 1340.0, epsilon = 20.0);
    }

    #[test]
    fn test_swap_is_symmetric() {
        let a = river(15.0, 17.0);
        let b = river(17.0, 15.0);
        // the 15 ft station is downstream either way
        assert_eq!(a.downstream().unwrap(), Point::One);
        assert_eq!(b.downstream().unwrap(), Point::Two);
        assert_abs_diff_eq!(a.direct_step().unwrap(), b.direct_step().unwrap(), epsilon = 1e-9);

        let c = mild(3.5, 2.5);
        let d = mild(2.5, 3.5);
        assert_eq!(c.downstream().unwrap(), Point::Two);
        assert_eq!(d.downstream().unwrap(), Point::One);
        assert_abs_diff_eq!(c.direct_step().unwrap(), d.direct_step().unwrap(), epsilon = 1e-9);
    }

    #[test]
    fn test_mild_profiles_positive() {
        // M2 drawdown
        let m2 = mild(3.5, 2.5);
        assert_eq!(m2.profile_type(3.0).unwrap(), ProfileType::M2);
        assert_abs_diff_eq!(m2.direct_step().unwrap(), 1017.3, epsilon = 1.0);
        // M1 backwater
        let m1 = mild(5.0, 4.0);
        assert_eq!(m1.downstream().unwrap(), Point::One);
        assert!(m1.direct_step().unwrap() > 0.0);
    }

    #[test]
    fn test_resolution_converges() {
        let coarse = Channel::new(
            ChannelConfig::new(10.0, 0.0, 0.0, 0.02, 0.001, 150.0)
                .with_depths(3.5, 2.5)
                .with_steps(50),
        )
        .unwrap();
        let fine = Channel::new(
            ChannelConfig::new(10.0, 0.0, 0.0, 0.02, 0.001, 150.0)
                .with_depths(3.5, 2.5)
                .with_steps(200),
        )
        .unwrap();
        assert_abs_diff_eq!(
            coarse.direct_step().unwrap(),
            fine.direct_step().unwrap(),
            epsilon = 1.0
        );
    }

    #[test]
    fn test_profile_runs_upstream_to_downstream() {
        let p = river(15.0, 17.0).profile().unwrap();
        assert_eq!(p.upstream(), Point::Two);
        assert_eq!(p.len(), 51);
        assert_eq!(p.depths()[0], 17.0);
        assert_abs_diff_eq!(p.depths()[50], 15.0, epsilon = 1e-9);
        assert_eq!(p.stations()[0], 0.0);
        assert_abs_diff_eq!(p.stations()[50], p.length(), epsilon = 1e-9);
    }

    #[test]
    fn test_missing_depths() {
        let ch = Channel::new(ChannelConfig::new(12.0, 0.0, 0.0, 0.015, 0.0087, 300.0)).unwrap();
        let err = ch.downstream().unwrap_err();
        assert!(matches!(err, ChannelError::MissingDepths));
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(matches!(ch.direct_step(), Err(ChannelError::MissingDepths)));

        let one = Channel::new(ChannelConfig {
            y1: Some(2.0),
            ..ChannelConfig::new(12.0, 0.0, 0.0, 0.015, 0.0087, 300.0)
        })
        .unwrap();
        assert!(matches!(one.downstream(), Err(ChannelError::MissingDepths)));
    }

    #[test]
    fn test_equal_depths_rejected() {
        let err = Channel::new(
            ChannelConfig::new(12.0, 0.0, 0.0, 0.015, 0.0087, 300.0).with_depths(2.0, 2.0),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_straddling_critical_is_ambiguous() {
        // yn ~ 3.82 and yc ~ 1.91: 2.5 is M2, 1.5 is M3
        let ch = mild(2.5, 1.5);
        let err = ch.downstream().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AmbiguousProfile);
        assert!(matches!(
            ch.direct_step(),
            Err(ChannelError::AmbiguousProfile { .. })
        ));
    }

    #[test]
    fn test_render_to_file() {
        let ch = river(15.0, 17.0);
        let tmp = NamedTempFile::new().unwrap();
        let mut renderer = TableRenderer::new(tmp.reopen().unwrap());
        let d = ch.direct_step_rendered(&mut renderer).unwrap();
        assert_abs_diff_eq!(d, ch.direct_step().unwrap(), epsilon = 1e-9);

        let text = fs::read_to_string(tmp.path()).unwrap();
        let rows: Vec<Vec<f64>> = text
            .lines()
            .skip(1)
            .map(|l| l.split_whitespace().map(|v| v.parse().unwrap()).collect())
            .collect();
        assert_eq!(rows.len(), 51);
        // first row is the upstream 17 ft point, last the downstream 15 ft point at the datum
        assert_abs_diff_eq!(rows[0][1], 17.0, epsilon = 1e-4);
        assert_abs_diff_eq!(rows[50][1], 15.0, epsilon = 1e-4);
        assert_abs_diff_eq!(rows[50][2], 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(rows[50][3], 15.0, epsilon = 1e-4);
    }

    struct Failing;

    impl ProfileRenderer for Failing {
        fn render(&mut self, _profile: &open_channel::Profile) -> std::io::Result<()> {
            Err(std::io::Error::other("plot window closed"))
        }
    }

    #[test]
    fn test_render_failure_propagates() {
        let err = river(15.0, 17.0).direct_step_rendered(&mut Failing).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Render);
    }
}
