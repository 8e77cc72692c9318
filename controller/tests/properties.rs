use controller::{
    Button, CameraConfig, FlatFloorBody, GlideMode, InputSample, LocomotionConfig,
    LocomotionController, OrbitCameraRig, Vec3, VerticalRegime,
};

const DT: f32 = 1.0 / 50.0;

/// Controller standing on a floor at y = 0 after one settling tick.
fn settled(config: LocomotionConfig) -> (LocomotionController, FlatFloorBody) {
    let mut body = FlatFloorBody::new(Vec3::zeros(), 0.0);
    let mut controller = LocomotionController::spawn(config, &body).unwrap();
    controller.physics_tick(DT, &mut body);
    assert!(controller.is_grounded());
    (controller, body)
}

fn render(controller: &mut LocomotionController, body: &mut FlatFloorBody, sample: InputSample) {
    controller.render_tick(&sample, DT, body);
}

#[test]
fn held_jump_peaks_at_max_height_after_time_to_apex() {
    let (mut controller, mut body) = settled(LocomotionConfig::default());
    render(&mut controller, &mut body, InputSample::default().press(Button::Jump));

    for _ in 0..50 {
        controller.physics_tick(DT, &mut body);
        assert!(!controller.is_grounded());
    }

    assert!((body.position.y - 11.0).abs() < 1.0e-2, "apex {}", body.position.y);
    assert!(controller.velocity().y.abs() < 1.0e-3);
}

#[test]
fn held_jump_with_symmetric_gravity_returns_to_the_floor() {
    let config = LocomotionConfig {
        gravity_on_falling: -22.0,
        ..LocomotionConfig::default()
    };
    let (mut controller, mut body) = settled(config);
    render(&mut controller, &mut body, InputSample::default().press(Button::Jump));

    for tick in 1..=100 {
        controller.physics_tick(DT, &mut body);
        if tick == 95 {
            assert!(body.position.y > 1.0);
        }
    }
    assert!(body.position.y.abs() < 1.0e-2, "ended at {}", body.position.y);

    controller.physics_tick(DT, &mut body);
    assert_eq!(controller.regime(), VerticalRegime::Grounded);
    assert!(controller.velocity().y.abs() < 1.0e-6);
}

#[test]
fn tapped_jump_peaks_at_min_height() {
    let (mut controller, mut body) = settled(LocomotionConfig::default());
    render(&mut controller, &mut body, InputSample::default().tap(Button::Jump));

    let mut peak: f32 = 0.0;
    for _ in 0..100 {
        controller.physics_tick(DT, &mut body);
        peak = peak.max(body.position.y);
    }

    assert!(peak >= 3.0 - 1.0e-2, "peak {peak}");
    assert!(peak < 11.0);
    assert_eq!(controller.regime(), VerticalRegime::Grounded);
}

#[test]
fn releasing_mid_jump_lands_lower_than_holding() {
    let held_peak = {
        let (mut controller, mut body) = settled(LocomotionConfig::default());
        render(&mut controller, &mut body, InputSample::default().press(Button::Jump));
        (0..60).fold(0.0f32, |peak, _| {
            controller.physics_tick(DT, &mut body);
            peak.max(body.position.y)
        })
    };

    let (mut controller, mut body) = settled(LocomotionConfig::default());
    render(&mut controller, &mut body, InputSample::default().press(Button::Jump));
    let mut peak: f32 = 0.0;
    for tick in 0..60 {
        if tick == 10 {
            render(&mut controller, &mut body, InputSample::default().release(Button::Jump));
        }
        controller.physics_tick(DT, &mut body);
        if tick == 10 {
            assert_eq!(controller.regime(), VerticalRegime::Releasing);
        }
        peak = peak.max(body.position.y);
    }

    assert!(peak > 3.0 - 1.0e-2);
    assert!(peak < held_peak);
}

#[test]
fn full_diagonal_walks_at_cardinal_speed() {
    let speed_for = |forward: f32, strafe: f32| {
        let (mut controller, mut body) = settled(LocomotionConfig::default());
        render(&mut controller, &mut body, InputSample::with_axes(forward, strafe));
        controller.physics_tick(DT, &mut body);
        let v = controller.velocity();
        (v.x * v.x + v.z * v.z).sqrt()
    };

    let cardinal = speed_for(1.0, 0.0);
    assert!((cardinal - 15.0).abs() < 1.0e-3);
    assert!((speed_for(1.0, 1.0) - cardinal).abs() < 1.0e-3);
    assert!((speed_for(-1.0, 1.0) - cardinal).abs() < 1.0e-3);
    assert!(speed_for(0.5, 0.5) < cardinal);
}

#[test]
fn glide_is_cleared_on_ground_contact() {
    let mut body = FlatFloorBody::new(Vec3::new(0.0, 30.0, 0.0), 0.0);
    let mut controller = LocomotionController::spawn(LocomotionConfig::default(), &body).unwrap();

    // Free fall until past -5 m/s.
    while controller.velocity().y > -5.0 {
        controller.physics_tick(DT, &mut body);
    }
    assert_eq!(controller.regime(), VerticalRegime::Falling);

    render(&mut controller, &mut body, InputSample::default().tap(Button::Glide));
    controller.physics_tick(DT, &mut body);
    assert_eq!(controller.regime(), VerticalRegime::Gliding);
    assert!((controller.velocity().y - -1.0).abs() < 1.0e-5);

    let mut ticks = 0;
    while !controller.is_grounded() {
        controller.physics_tick(DT, &mut body);
        ticks += 1;
        assert!(ticks < 5_000, "never landed");
    }
    assert!(!controller.is_gliding());
    assert_eq!(body.position.y, 0.0);
}

#[test]
fn contact_clears_a_fast_glide() {
    let config = LocomotionConfig {
        glide: GlideMode::Clamp {
            terminal_velocity: -5.0,
        },
        ..LocomotionConfig::default()
    };
    let mut body = FlatFloorBody::new(Vec3::new(0.0, 3.0, 0.0), 0.0);
    let mut controller = LocomotionController::spawn(config, &body).unwrap();
    controller.physics_tick(DT, &mut body);
    render(&mut controller, &mut body, InputSample::default().tap(Button::Glide));

    let mut before_contact = controller.velocity().y;
    let mut ticks = 0;
    loop {
        controller.physics_tick(DT, &mut body);
        if controller.is_grounded() {
            break;
        }
        assert_eq!(controller.regime(), VerticalRegime::Gliding);
        before_contact = controller.velocity().y;
        ticks += 1;
        assert!(ticks < 500, "never landed");
    }

    assert!((before_contact - -5.0).abs() < 1.0e-4, "descending at {before_contact}");
    assert!(!controller.is_gliding());
    assert_eq!(controller.regime(), VerticalRegime::Grounded);
    assert_eq!(controller.velocity().y, 0.0);
}

#[test]
fn landing_with_jump_still_held_allows_the_next_jump() {
    let (mut controller, mut body) = settled(LocomotionConfig::default());
    render(&mut controller, &mut body, InputSample::default().press(Button::Jump));

    let held = InputSample::default().hold(Button::Jump);
    let mut ticks = 0;
    loop {
        render(&mut controller, &mut body, held);
        controller.physics_tick(DT, &mut body);
        if controller.is_grounded() {
            break;
        }
        ticks += 1;
        assert!(ticks < 500, "never landed");
    }

    // Still holding from the first jump: no new jump without a fresh press.
    render(&mut controller, &mut body, held);
    controller.physics_tick(DT, &mut body);
    assert_eq!(controller.regime(), VerticalRegime::Grounded);

    render(&mut controller, &mut body, InputSample::default().press(Button::Jump));
    controller.physics_tick(DT, &mut body);
    assert_eq!(controller.regime(), VerticalRegime::Ascending);
}

#[test]
fn release_and_repress_between_ticks_ends_the_held_jump() {
    let (mut controller, mut body) = settled(LocomotionConfig::default());
    render(&mut controller, &mut body, InputSample::default().press(Button::Jump));
    controller.physics_tick(DT, &mut body);
    assert_eq!(controller.regime(), VerticalRegime::Ascending);

    render(&mut controller, &mut body, InputSample::default().release(Button::Jump));
    render(&mut controller, &mut body, InputSample::default().press(Button::Jump));
    controller.physics_tick(DT, &mut body);

    // The release ended the held arc; the airborne press toggled glide.
    assert_eq!(controller.regime(), VerticalRegime::Releasing);
    assert!(controller.is_gliding());
}

#[test]
fn disabled_glide_never_engages() {
    let config = LocomotionConfig {
        glide: GlideMode::Disabled,
        ..LocomotionConfig::default()
    };
    let mut body = FlatFloorBody::new(Vec3::new(0.0, 30.0, 0.0), 0.0);
    let mut controller = LocomotionController::spawn(config, &body).unwrap();

    for _ in 0..10 {
        render(&mut controller, &mut body, InputSample::default().tap(Button::Glide));
        controller.physics_tick(DT, &mut body);
        assert!(!controller.is_gliding());
    }
}

#[test]
fn edges_reach_exactly_one_physics_tick() {
    let mut body = FlatFloorBody::new(Vec3::new(0.0, 50.0, 0.0), 0.0);
    let mut controller = LocomotionController::spawn(LocomotionConfig::default(), &body).unwrap();
    controller.physics_tick(DT, &mut body);

    // Two render frames per physics tick: the tap in the first frame still arrives.
    render(&mut controller, &mut body, InputSample::default().tap(Button::Glide));
    render(&mut controller, &mut body, InputSample::default());
    controller.physics_tick(DT, &mut body);
    assert!(controller.is_gliding());

    // Two physics ticks per render frame: the toggle is not applied twice.
    render(&mut controller, &mut body, InputSample::default().tap(Button::Glide));
    controller.physics_tick(DT, &mut body);
    controller.physics_tick(DT, &mut body);
    assert!(!controller.is_gliding());
}

#[test]
fn checkpoint_round_trip_restores_position_and_resets_motion() {
    let (mut controller, mut body) = settled(LocomotionConfig::default());
    let saved_at = body.position;

    render(&mut controller, &mut body, InputSample::default().tap(Button::SaveCheckpoint));
    controller.physics_tick(DT, &mut body);
    assert!(controller.checkpoint().is_some());

    // Walk away, turn and jump.
    let mut walk = InputSample::with_axes(1.0, 0.0).press(Button::Jump);
    walk.yaw = 0.5;
    render(&mut controller, &mut body, walk);
    for _ in 0..20 {
        controller.physics_tick(DT, &mut body);
    }
    assert!((body.position - saved_at).norm() > 1.0);
    assert!(!controller.is_grounded());

    render(&mut controller, &mut body, InputSample::default().tap(Button::RestoreCheckpoint));
    controller.physics_tick(DT, &mut body);

    assert_eq!(body.position, saved_at);
    assert_eq!(controller.velocity(), Vec3::zeros());
    assert!(!controller.is_gliding());
    assert_eq!(controller.facing_degrees(), 0.0);
    assert!((body.facing_degrees - 0.0).abs() < 1.0e-4);
}

#[test]
fn camera_follows_the_character_and_respects_pitch_bounds() {
    let (mut controller, mut body) = settled(LocomotionConfig::default());
    let mut rig = OrbitCameraRig::new(CameraConfig::default()).unwrap();

    let mut sample = InputSample::with_axes(1.0, 0.0);
    sample.yaw = 1.0;
    // Looking down: the camera stays on the full-radius sphere.
    sample.pitch = -1.0;
    for _ in 0..100 {
        let turned = controller.render_tick(&sample, DT, &mut body);
        controller.physics_tick(DT, &mut body);
        if rig.move_pitch(sample.pitch, DT, turned) {
            rig.update(body.position, controller.facing_degrees());
        }
        let pitch = rig.pitch_degrees();
        assert!(pitch >= rig.config().lowest_pitch() && pitch <= rig.config().max_pitch);
    }

    let last = rig.transform().unwrap();
    let again = rig.update(body.position, controller.facing_degrees());
    assert_eq!(last, again);
    assert!(((last.position - body.position).norm() - rig.config().distance).abs() < 1.0e-3);
}
