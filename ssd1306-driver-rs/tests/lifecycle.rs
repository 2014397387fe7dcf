//! Lifecycle: binding checks, reset sequencing, teardown and the
//! initialized gate.

mod common;

use std::rc::Rc;

use common::{full_driver, iic_driver, spi_driver, Bench, Call, Delay, Fault, Iic, Rst, Spi};
use display_interface::DisplayError;
use ssd1306_driver_rs::{Address, Binding, Error, Interface, Ssd1306, Unbound};

#[test]
fn iic_init_pulses_reset_then_opens_bus() {
    let (bench, mut oled) = iic_driver();

    oled.init().unwrap();

    assert!(oled.is_initialized());
    assert_eq!(
        bench.calls(),
        [
            Call::RstInit,
            Call::RstSet(false),
            Call::DelayMs(100),
            Call::RstSet(true),
            Call::IicOpen,
        ]
    );
}

#[test]
fn spi_init_prepares_dc_line_first() {
    let (bench, mut oled) = spi_driver();

    oled.init().unwrap();

    assert_eq!(
        bench.calls(),
        [
            Call::DcInit,
            Call::RstInit,
            Call::RstSet(false),
            Call::DelayMs(100),
            Call::RstSet(true),
            Call::SpiOpen,
        ]
    );
}

#[test]
fn init_twice_is_a_no_op() {
    let (bench, mut oled) = iic_driver();
    oled.init().unwrap();
    bench.take();

    oled.init().unwrap();

    assert!(bench.calls().is_empty());
    assert!(oled.is_initialized());
}

#[test]
fn missing_reset_line_is_reported_before_any_io() {
    let bench = Rc::new(Bench::default());
    let mut oled = Ssd1306::new_iic(
        Iic(bench.clone()),
        Address::Sa0Low,
        Unbound,
        Delay(bench.clone()),
    );

    assert!(matches!(
        oled.init(),
        Err(Error::MissingBinding(Binding::Reset))
    ));
    assert!(bench.calls().is_empty());
    assert!(!oled.is_initialized());
}

#[test]
fn spi_without_dc_line_is_rejected() {
    let bench = Rc::new(Bench::default());
    let mut oled = Ssd1306::new(
        Iic(bench.clone()),
        Spi(bench.clone()),
        Unbound,
        Rst(bench.clone()),
        Delay(bench.clone()),
    );
    oled.set_interface(Interface::Spi).unwrap();

    assert!(matches!(
        oled.init(),
        Err(Error::MissingBinding(Binding::CommandData))
    ));
    assert!(bench.calls().is_empty());
}

#[test]
fn selecting_an_unbound_bus_is_rejected() {
    let (bench, mut oled) = spi_driver();
    oled.set_interface(Interface::Iic).unwrap();

    assert!(matches!(
        oled.init(),
        Err(Error::MissingBinding(Binding::Iic))
    ));
    assert!(bench.calls().is_empty());

    let (bench, mut oled) = iic_driver();
    oled.set_interface(Interface::Spi).unwrap();

    assert!(matches!(
        oled.init(),
        Err(Error::MissingBinding(Binding::Spi))
    ));
    assert!(bench.calls().is_empty());
}

#[test]
fn failed_bus_open_releases_lines() {
    let (bench, mut oled) = spi_driver();
    bench.fail(Fault::SpiOpen);

    assert!(matches!(oled.init(), Err(Error::Transport(_))));
    assert!(!oled.is_initialized());
    assert_eq!(
        bench.calls(),
        [
            Call::DcInit,
            Call::RstInit,
            Call::RstSet(false),
            Call::DelayMs(100),
            Call::RstSet(true),
            Call::SpiOpen,
            Call::RstDeinit,
            Call::DcDeinit,
        ]
    );
}

#[test]
fn failed_reset_init_releases_dc_only() {
    let (bench, mut oled) = spi_driver();
    bench.fail(Fault::RstInit);

    assert!(matches!(
        oled.init(),
        Err(Error::Transport(DisplayError::RSError))
    ));
    assert_eq!(
        bench.calls(),
        [Call::DcInit, Call::RstInit, Call::DcDeinit]
    );
}

#[test]
fn failed_dc_init_touches_nothing_else() {
    let (bench, mut oled) = spi_driver();
    bench.fail(Fault::DcInit);

    assert!(matches!(oled.init(), Err(Error::Transport(_))));
    assert_eq!(bench.calls(), [Call::DcInit]);
}

#[test]
fn failed_reset_pulse_is_reported_as_reset_error() {
    let (bench, mut oled) = iic_driver();
    bench.fail(Fault::RstSet);

    assert!(matches!(
        oled.init(),
        Err(Error::Transport(DisplayError::RSError))
    ));
    assert_eq!(
        bench.calls(),
        [Call::RstInit, Call::RstSet(false), Call::RstDeinit]
    );
    assert!(!oled.is_initialized());
}

#[test]
fn iic_deinit_powers_down_then_closes() {
    let (bench, mut oled) = iic_driver();
    oled.init().unwrap();
    bench.take();

    oled.deinit().unwrap();

    assert!(!oled.is_initialized());
    assert_eq!(
        bench.calls(),
        [
            Call::IicWrite {
                address: 0x3C,
                control: 0x00,
                bytes: vec![0x8D, 0x10],
            },
            Call::IicWrite {
                address: 0x3C,
                control: 0x00,
                bytes: vec![0xAE],
            },
            Call::RstDeinit,
            Call::IicClose,
        ]
    );
}

#[test]
fn spi_deinit_releases_dc_line() {
    let (bench, mut oled) = spi_driver();
    oled.init().unwrap();
    bench.take();

    oled.deinit().unwrap();

    assert_eq!(
        bench.calls(),
        [
            Call::DcSet(false),
            Call::SpiWrite(vec![0x8D, 0x10]),
            Call::DcSet(false),
            Call::SpiWrite(vec![0xAE]),
            Call::RstDeinit,
            Call::DcDeinit,
            Call::SpiClose,
        ]
    );
}

#[test]
fn deinit_failure_still_tears_down_and_reports_first_error() {
    let (bench, mut oled) = iic_driver();
    oled.init().unwrap();
    bench.take();
    bench.fail(Fault::Write);
    bench.fail(Fault::IicClose);

    let result = oled.deinit();

    assert!(matches!(
        result,
        Err(Error::Transport(DisplayError::BusWriteError))
    ));
    assert!(!oled.is_initialized());
    let calls = bench.calls();
    assert!(calls.contains(&Call::RstDeinit));
    assert_eq!(calls.last(), Some(&Call::IicClose));
}

#[test]
fn init_deinit_init_round_trip() {
    let (bench, mut oled) = iic_driver();

    oled.init().unwrap();
    oled.deinit().unwrap();
    oled.init().unwrap();

    assert!(oled.is_initialized());
    let opens = bench
        .calls()
        .iter()
        .filter(|c| **c == Call::IicOpen)
        .count();
    assert_eq!(opens, 2);
}

#[test]
fn bus_operations_require_init() {
    let (bench, mut oled) = iic_driver();

    assert!(matches!(oled.set_contrast(1), Err(Error::NotInitialized)));
    assert!(matches!(oled.set_multiplex_ratio(0x3F), Err(Error::NotInitialized)));
    assert!(matches!(oled.flush(), Err(Error::NotInitialized)));
    assert!(matches!(oled.clear(), Err(Error::NotInitialized)));
    assert!(matches!(oled.write_point(0, 0, true), Err(Error::NotInitialized)));
    assert!(matches!(oled.read_point(0, 0), Err(Error::NotInitialized)));
    assert!(matches!(oled.write_command(&[0xAF]), Err(Error::NotInitialized)));
    assert!(matches!(oled.deinit(), Err(Error::NotInitialized)));
    assert!(bench.calls().is_empty());
}

#[test]
fn bus_operations_fail_after_deinit() {
    let (bench, mut oled) = iic_driver();
    oled.init().unwrap();
    oled.deinit().unwrap();
    bench.take();

    assert!(matches!(oled.set_display(true), Err(Error::NotInitialized)));
    assert!(matches!(oled.flush(), Err(Error::NotInitialized)));
    assert!(bench.calls().is_empty());
}

#[test]
fn not_initialized_wins_over_bad_arguments() {
    let (_bench, mut oled) = iic_driver();

    assert!(matches!(
        oled.set_multiplex_ratio(0x00),
        Err(Error::NotInitialized)
    ));
}

#[test]
fn transport_selection_is_locked_while_initialized() {
    let (_bench, mut oled) = full_driver();
    oled.init().unwrap();

    assert!(matches!(
        oled.set_interface(Interface::Spi),
        Err(Error::AlreadyInitialized)
    ));
    assert!(matches!(
        oled.set_address(Address::Sa0High),
        Err(Error::AlreadyInitialized)
    ));
    assert_eq!(oled.interface(), Interface::Iic);
    assert_eq!(oled.address(), Address::Sa0Low);

    oled.deinit().unwrap();
    oled.set_interface(Interface::Spi).unwrap();
    assert_eq!(oled.interface(), Interface::Spi);
}

#[test]
fn full_driver_initializes_bound_dc_line_on_iic() {
    let (bench, mut oled) = full_driver();

    oled.init().unwrap();

    assert_eq!(bench.calls().first(), Some(&Call::DcInit));
    assert_eq!(bench.calls().last(), Some(&Call::IicOpen));
}
