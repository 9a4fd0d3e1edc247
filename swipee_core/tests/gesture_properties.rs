use swipee_core::{
    Action, DeviceId, DistanceMetric, FixedDevice, GestureRequest, InjectionError, Injector,
    InputSource, Interpolation, Invocation, ParseError, Point, SwipeMode, SwipeOptions, Swiper,
    TouchSample, Trajectory, WaitPolicy, parse_args,
};

#[derive(Default)]
struct Collect(Vec<TouchSample>);

impl Injector for Collect {
    fn inject(
        &mut self,
        sample: &TouchSample,
        _device: DeviceId,
        _source: InputSource,
        _wait: WaitPolicy,
    ) -> Result<(), InjectionError> {
        self.0.push(*sample);
        Ok(())
    }
}

fn run(args: &[&str], options: SwipeOptions) -> Vec<TouchSample> {
    let Ok(Invocation::Swipe(request)) = parse_args(args) else {
        panic!("{args:?} did not parse into a swipe");
    };
    let mut collected = Collect::default();
    Swiper::new(FixedDevice::default(), &mut collected, options)
        .swipe(&request)
        .unwrap();
    collected.0
}

fn interior_count(request: &GestureRequest, metric: DistanceMetric) -> usize {
    // Everything except the two bracket waypoints.
    Trajectory::new(request, Interpolation::Linear, metric).count() - 2
}

#[test]
fn interior_count_is_ceil_of_distance_over_step() {
    let cases = [
        ((0.0, 0.0), (100.0, 0.0), 3.0),
        ((0.0, 0.0), (50.0, 50.0), 2.5),
        ((10.0, 10.0), (10.0, 74.0), 1.0),
        ((5.0, 5.0), (-11.0, 14.0), 0.5),
        ((0.0, 0.0), (400.0, 0.0), 7.0),
        ((0.0, 0.0), (0.01, 0.0), 0.01),
        ((0.0, 0.0), (1.21, 0.0), 0.01),
        ((3.0, 0.0), (3.0, 0.09), 0.03),
        ((0.0, 0.0), (0.49, 0.0), 0.07),
    ];
    for (start, end, step) in cases {
        let request = GestureRequest {
            source: InputSource::Touchscreen,
            mode: SwipeMode::Exact,
            start: Point::from(start),
            end: Point::from(end),
            step,
        };
        let distance = DistanceMetric::Observed.distance(request.start, request.end);
        let expected = (distance / step).ceil() as usize;
        assert_eq!(
            interior_count(&request, DistanceMetric::Observed),
            expected,
            "{start:?} -> {end:?} step {step}"
        );
    }
}

#[test]
fn interior_count_matches_ceiling_across_a_sweep() {
    for hundredths in 1..=400u16 {
        let dx = f32::from(hundredths) / 100.0;
        for step in [0.01f32, 0.03, 0.1, 0.7] {
            let request = GestureRequest {
                source: InputSource::Touchscreen,
                mode: SwipeMode::Move,
                start: Point::new(0.0, 0.0),
                end: Point::new(dx, 0.0),
                step,
            };
            let distance = DistanceMetric::Observed.distance(request.start, request.end);
            assert_eq!(
                interior_count(&request, DistanceMetric::Observed),
                (distance / step).ceil() as usize,
                "dx {dx} step {step}"
            );
        }
    }
}

#[test]
fn first_sample_is_start_and_last_is_exactly_end() {
    for mode in ["exact", "start", "move", "end"] {
        for interpolation in [Interpolation::Linear, Interpolation::Sine] {
            let options = SwipeOptions {
                interpolation,
                ..SwipeOptions::default()
            };
            let samples = run(&[mode, "12.5", "700.25", "613.75", "98.5", "0.3"], options);
            assert_eq!(samples.first().unwrap().position, Point::new(12.5, 700.25));
            assert_eq!(samples.last().unwrap().position, Point::new(613.75, 98.5));
        }
    }
}

#[test]
fn interior_samples_approach_end_monotonically() {
    for interpolation in [Interpolation::Linear, Interpolation::Sine] {
        let options = SwipeOptions {
            interpolation,
            ..SwipeOptions::default()
        };
        let samples = run(&["exact", "900", "100", "100", "500", "0.4"], options);
        let xs: Vec<f32> = samples.iter().map(|s| s.position.x).collect();
        let ys: Vec<f32> = samples.iter().map(|s| s.position.y).collect();
        assert!(xs.windows(2).all(|w| w[1] <= w[0] + 1e-3), "{interpolation}: {xs:?}");
        assert!(ys.windows(2).all(|w| w[1] >= w[0] - 1e-3), "{interpolation}: {ys:?}");
    }
}

#[test]
fn bracket_actions_follow_the_mode() {
    let expected = [
        ("exact", Action::Down, Action::Move),
        ("start", Action::Down, Action::Move),
        ("move", Action::Move, Action::Move),
        ("end", Action::Move, Action::Up),
    ];
    for (mode, leading, trailing) in expected {
        let samples = run(&[mode, "0", "0", "64", "0", "1"], SwipeOptions::default());
        assert_eq!(samples.first().unwrap().action, leading, "{mode}");
        assert_eq!(samples.last().unwrap().action, trailing, "{mode}");
        assert!(
            samples[1..samples.len() - 1].iter().all(|s| s.action == Action::Move),
            "{mode}"
        );
        let downs = samples.iter().filter(|s| s.action == Action::Down).count();
        let ups = samples.iter().filter(|s| s.action == Action::Up).count();
        assert_eq!(downs, usize::from(leading == Action::Down), "{mode}");
        assert_eq!(ups, usize::from(trailing == Action::Up), "{mode}");
    }
}

#[test]
fn unknown_source_fails_as_unknown_command() {
    assert_eq!(
        parse_args(&["foo", "exact", "0", "0", "10", "10", "1"]),
        Err(ParseError::UnknownCommand("foo".to_string()))
    );
}

#[test]
fn horizontal_swipe_with_observed_metric() {
    // sqrt(|0 - 100| + 0) = 10, so one step of 10 covers the whole path.
    let samples = run(&["exact", "0", "0", "100", "0", "10"], SwipeOptions::default());
    let path: Vec<(Action, f32, f32)> = samples
        .iter()
        .map(|s| (s.action, s.position.x, s.position.y))
        .collect();
    assert_eq!(
        path,
        vec![
            (Action::Down, 0.0, 0.0),
            (Action::Move, 0.0, 0.0),
            (Action::Move, 100.0, 0.0),
        ]
    );
}

#[test]
fn horizontal_swipe_with_euclidean_metric() {
    let options = SwipeOptions {
        metric: DistanceMetric::Euclidean,
        ..SwipeOptions::default()
    };
    let samples = run(&["exact", "0", "0", "100", "0", "10"], options);

    assert_eq!(samples.len(), 12);
    assert_eq!(samples[0].action, Action::Down);
    assert_eq!(samples[0].position, Point::new(0.0, 0.0));
    for (i, sample) in samples[1..11].iter().enumerate() {
        assert_eq!(sample.action, Action::Move);
        assert!((sample.position.x - 10.0 * i as f32).abs() < 1e-3, "{sample}");
        assert_eq!(sample.position.y, 0.0);
    }
    assert_eq!(samples[11].action, Action::Move);
    assert_eq!(samples[11].position, Point::new(100.0, 0.0));
}

#[test]
fn far_apart_coordinates_never_reach_the_generator() {
    assert!(matches!(
        parse_args(&["exact", "3e38", "0", "-3e38", "0", "1"]),
        Err(ParseError::InvalidArguments { .. })
    ));
}

#[test]
fn zero_length_gesture_emits_only_the_bracket() {
    for metric in [DistanceMetric::Observed, DistanceMetric::Euclidean] {
        for interpolation in [Interpolation::Linear, Interpolation::Sine] {
            let options = SwipeOptions {
                interpolation,
                metric,
                ..SwipeOptions::default()
            };
            let samples = run(&["end", "5", "5", "5", "5", "1"], options);
            assert_eq!(samples.len(), 2);
            assert!(samples.iter().all(|s| s.position == Point::new(5.0, 5.0)));
            assert!(samples.iter().all(|s| s.position.x.is_finite()));
        }
    }
}
