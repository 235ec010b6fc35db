//! Integration tests for the loudness detector and brightness mapping

use proptest::prelude::*;
use sign_sequencer::{EnvelopeDetector, SoundConfig};

#[test]
fn fresh_detector_is_silent() {
    let detector: EnvelopeDetector = EnvelopeDetector::default();
    assert_eq!(detector.mean(), 512);
    assert_eq!(detector.intensity(), 0);
}

#[test]
fn reset_forgets_noise() {
    let mut detector: EnvelopeDetector = EnvelopeDetector::default();
    for i in 0..16u16 {
        detector.push_sample(if i % 2 == 0 { 0 } else { 1023 });
    }
    assert!(detector.intensity() > 0);
    detector.reset();
    assert_eq!(detector.intensity(), 0);
}

#[test]
fn quiet_input_maps_to_dark() {
    let sound = SoundConfig::default();
    assert_eq!(sound.brightness(0), 0);
    assert_eq!(sound.brightness(40), 0);
}

#[test]
fn loud_input_saturates_instead_of_wrapping() {
    let sound = SoundConfig::default();
    assert_eq!(sound.brightness(1023), 252);
    assert_eq!(sound.brightness(200), 252);
}

#[test]
fn detector_drives_brightness_end_to_end() {
    let sound = SoundConfig::default();
    let mut detector: EnvelopeDetector = EnvelopeDetector::default();
    for i in 0..16u16 {
        detector.push_sample(if i % 2 == 0 { 412 } else { 612 });
    }
    assert_eq!(detector.intensity(), 100);
    assert_eq!(sound.brightness(detector.intensity()), 240);
}

proptest! {
    #[test]
    fn constant_window_has_zero_intensity(value in 0u16..=1023) {
        let mut detector: EnvelopeDetector = EnvelopeDetector::default();
        for _ in 0..16 {
            detector.push_sample(value);
        }
        prop_assert_eq!(detector.mean(), value);
        prop_assert_eq!(detector.intensity(), 0);
    }

    #[test]
    fn alternating_window_has_half_the_swing(a in 0u16..=1023, b in 0u16..=1023) {
        let mut detector: EnvelopeDetector = EnvelopeDetector::default();
        for i in 0..16 {
            detector.push_sample(if i % 2 == 0 { a } else { b });
        }
        prop_assert_eq!(detector.intensity(), a.abs_diff(b) / 2);
    }

    #[test]
    fn brightness_is_monotonic(a in 0u16..=1023, b in 0u16..=1023) {
        let sound = SoundConfig::default();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(sound.brightness(low) <= sound.brightness(high));
    }
}
