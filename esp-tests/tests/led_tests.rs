//! Integration Tests für die LED Logic
//!
//! Diese Tests laufen auf dem Host (x86_64) und nutzen MockLedWriter

mod common;

use common::{MockLedWriter, quiet_led_config};
use embassy_futures::block_on;
use embassy_futures::select::{Either, select};
use embassy_time::{Duration, Timer};
use farbsensor_core::logic::StartupAnimation;
use farbsensor_core::tasks::led::{apply_pending, led_logic, play_startup_animation, write_color};
use farbsensor_core::{AcquisitionFlags, Fabric, LedConfig, LedError, SmartLedWriter};
use rgb::RGB8;

// ============================================================================
// Tests: MockLedWriter
// ============================================================================

#[test]
fn test_mock_led_writer_write() {
    let mut mock = MockLedWriter::new();
    let color = RGB8 { r: 10, g: 0, b: 0 };

    assert_eq!(mock.write_count(), 0);
    assert_eq!(mock.last_color(), None);

    mock.write(color).unwrap();

    assert_eq!(mock.write_count(), 1);
    assert_eq!(mock.last_color(), Some(color));
}

#[test]
fn test_mock_led_writer_fail() {
    let mut mock = MockLedWriter::new();
    mock.fail_next_write = true;

    let result = mock.write(RGB8 { r: 10, g: 0, b: 0 });
    assert_eq!(result, Err(LedError::WriteFailed));
    assert_eq!(mock.write_count(), 0);

    // Danach funktioniert der Writer wieder
    mock.write(RGB8 { r: 0, g: 10, b: 0 }).unwrap();
    assert_eq!(mock.write_count(), 1);
}

// ============================================================================
// Tests: write_color
// ============================================================================

#[test]
fn test_write_color_retries_once_when_busy() {
    let fabric = Fabric::new();
    let mut led = MockLedWriter::with_fabric(&fabric);
    led.busy_next_write = true;

    let color = RGB8 { r: 1, g: 2, b: 3 };
    let result = block_on(write_color(&mut led, &fabric, color));

    assert_eq!(result, Ok(()));
    assert_eq!(led.history, vec![color]);
}

#[test]
fn test_write_color_reports_hardware_error() {
    let fabric = Fabric::new();
    let mut led = MockLedWriter::new();
    led.fail_next_write = true;

    let result = block_on(write_color(&mut led, &fabric, RGB8 { r: 1, g: 1, b: 1 }));
    assert_eq!(result, Err(LedError::WriteFailed));
}

// ============================================================================
// Tests: apply_pending
// ============================================================================

#[test]
fn test_apply_pending_keeps_fifo_order() {
    let fabric = Fabric::new();
    let mut led = MockLedWriter::new();
    let first = RGB8 { r: 255, g: 0, b: 0 };
    let second = RGB8 { r: 0, g: 0, b: 255 };

    assert!(fabric.publish_color(first));
    assert!(fabric.publish_color(second));

    let written = block_on(apply_pending(&mut led, &fabric));
    assert_eq!(written, 2);
    assert_eq!(led.history, vec![first, second]);
    assert_eq!(fabric.colors.count(), 0);
}

#[test]
fn test_apply_pending_skips_failed_color() {
    let fabric = Fabric::new();
    let mut led = MockLedWriter::new();
    led.fail_next_write = true;

    fabric.publish_color(RGB8 { r: 9, g: 9, b: 9 });
    fabric.publish_color(RGB8 { r: 7, g: 7, b: 7 });

    let written = block_on(apply_pending(&mut led, &fabric));
    assert_eq!(written, 1);
    assert_eq!(led.last_color(), Some(RGB8 { r: 7, g: 7, b: 7 }));
}

#[test]
fn test_publish_color_drops_when_queue_full() {
    let fabric = Fabric::new();
    assert!(fabric.publish_color(RGB8 { r: 1, g: 0, b: 0 }));
    assert!(fabric.publish_color(RGB8 { r: 2, g: 0, b: 0 }));
    assert!(!fabric.publish_color(RGB8 { r: 3, g: 0, b: 0 }));

    // Flag ist trotzdem gesetzt
    assert!(
        fabric
            .acquisition_events
            .get()
            .contains(AcquisitionFlags::NEW_COLOR)
    );
}

// ============================================================================
// Tests: Start-Animation und Task-Schleife
// ============================================================================

#[test]
fn test_startup_animation_ends_dark() {
    let fabric = Fabric::new();
    let mut led = MockLedWriter::new();
    let config = LedConfig {
        startup_animation: true,
        animation_brightness: 3,
        animation_step: Duration::from_micros(10),
    };

    block_on(play_startup_animation(&mut led, &fabric, &config));

    let expected: Vec<RGB8> = StartupAnimation::new(3).collect();
    assert_eq!(led.history, expected);
    assert_eq!(led.last_color(), Some(RGB8 { r: 0, g: 0, b: 0 }));
}

#[test]
fn test_led_logic_applies_published_color() {
    let fabric = Fabric::new();
    let color = RGB8 { r: 40, g: 50, b: 60 };

    let result = block_on(select(
        led_logic(MockLedWriter::new(), &fabric, quiet_led_config()),
        async {
            Timer::after(Duration::from_millis(2)).await;
            fabric.publish_color(color);
            // LED-Task hat die Queue geleert und das Flag gelöscht
            while fabric.colors.count() > 0
                || fabric
                    .acquisition_events
                    .get()
                    .contains(AcquisitionFlags::NEW_COLOR)
            {
                Timer::after(Duration::from_millis(1)).await;
            }
        },
    ));

    assert!(matches!(result, Either::Second(())));
}
