use super::*;

fn sh(script: &str) -> CommandCaptionProvider {
    CommandCaptionProvider::new("sh").with_args(["-c", script])
}

#[cfg(unix)]
#[test]
fn stdout_becomes_caption() {
    let p = sh("cat > /dev/null; printf '  Cute!  \\n'");
    assert_eq!(p.generate_caption(b"\x89PNG fake").unwrap(), "Cute!");
}

#[cfg(unix)]
#[test]
fn image_bytes_arrive_on_stdin() {
    let p = sh("wc -c | tr -d ' '");
    assert_eq!(p.generate_caption(&[0u8; 1234]).unwrap(), "1234");
}

#[cfg(unix)]
#[test]
fn non_zero_exit_is_a_provider_error() {
    let err = sh("echo boom >&2; exit 3").generate_caption(&[]).unwrap_err();
    assert!(matches!(err, BoothError::CaptionProvider(_)));
    assert!(err.to_string().contains("boom"));
}

#[cfg(unix)]
#[test]
fn empty_output_is_a_provider_error() {
    let err = sh("true").generate_caption(&[]).unwrap_err();
    assert!(err.to_string().contains("no caption"));
}

#[cfg(unix)]
#[test]
fn slow_command_times_out() {
    let p = sh("sleep 5; echo late").with_timeout(Duration::from_millis(100));
    let started = Instant::now();
    let err = p.generate_caption(&[]).unwrap_err();
    assert!(err.to_string().contains("timed out"));
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[test]
fn missing_program_is_a_provider_error() {
    let p = CommandCaptionProvider::new("photobooth-no-such-captioner");
    let err = p.generate_caption(&[]).unwrap_err();
    assert!(matches!(err, BoothError::CaptionProvider(_)));
}

#[cfg(unix)]
#[test]
fn timeout_returns_while_background_jobs_hold_the_pipes() {
    let p = sh("sleep 5 & sleep 5").with_timeout(Duration::from_millis(100));
    let started = Instant::now();
    let err = p.generate_caption(&[]).unwrap_err();
    assert!(err.to_string().contains("timed out"));
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[cfg(unix)]
#[test]
fn output_pipes_left_open_after_exit_are_bounded_by_the_timeout() {
    let p = sh("sleep 5 & echo early").with_timeout(Duration::from_millis(400));
    let started = Instant::now();
    let err = p.generate_caption(&[]).unwrap_err();
    assert!(err.to_string().contains("stayed open"));
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[test]
fn wait_until_stops_at_the_deadline() {
    let started = Instant::now();
    assert!(!wait_until(started + Duration::from_millis(30), || false));
    assert!(started.elapsed() >= Duration::from_millis(30));
    assert!(wait_until(started, || true));
}
