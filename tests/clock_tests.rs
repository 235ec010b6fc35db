//! Integration tests for the tick-driven clock

use proptest::prelude::*;
use sign_sequencer::{Clock, OverflowHandler, TimeSource};

#[test]
fn fresh_clock_reads_zero() {
    let clock = Clock::new();
    assert_eq!(clock.now_ms(), 0);
    assert_eq!(clock.ticks_per_ms(), 5);
}

#[test]
fn overflow_interrupts_drive_the_clock() {
    let clock = Clock::new();
    for _ in 0..5_000 {
        clock.on_overflow();
    }
    assert_eq!(TimeSource::now_ms(&clock), 1_000);
}

#[test]
fn shared_reference_is_a_time_source() {
    fn read<T: TimeSource>(source: T) -> u64 {
        source.now_ms()
    }

    let clock = Clock::new().starting_at(42);
    assert_eq!(read(&clock), 42);
}

proptest! {
    #[test]
    fn ticks_divide_into_whole_milliseconds(ticks in 0u32..20_000) {
        let clock = Clock::new();
        for _ in 0..ticks {
            clock.tick();
        }
        prop_assert_eq!(clock.now_ms(), u64::from(ticks / 5));
    }

    #[test]
    fn readings_never_go_backwards(
        ticks_per_ms in 1u8..=10,
        bursts in proptest::collection::vec(0u16..50, 1..40),
    ) {
        let clock = Clock::with_ticks_per_ms(ticks_per_ms);
        let mut last = clock.now_ms();
        for burst in bursts {
            for _ in 0..burst {
                clock.tick();
            }
            let now = clock.now_ms();
            prop_assert!(now >= last);
            last = now;
        }
    }
}
