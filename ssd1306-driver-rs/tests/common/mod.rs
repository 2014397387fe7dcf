//! Recording test bench shared by the integration tests.
//!
//! Every port writes into one [`Bench`] so tests can assert on the exact
//! interleaving of bus writes, line changes and delays. Faults can be
//! injected per operation.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use display_interface::DisplayError;
use embedded_hal::delay::DelayNs;
use ssd1306_driver_rs::{Address, ControlLine, IicBus, SpiBus, Ssd1306, Unbound};

/// One observed port operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    IicOpen,
    IicClose,
    IicWrite {
        address: u8,
        control: u8,
        bytes: Vec<u8>,
    },
    SpiOpen,
    SpiClose,
    SpiWrite(Vec<u8>),
    DcInit,
    DcDeinit,
    DcSet(bool),
    RstInit,
    RstDeinit,
    RstSet(bool),
    DelayMs(u32),
}

/// Operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    IicOpen,
    IicClose,
    SpiOpen,
    DcInit,
    RstInit,
    RstSet,
    /// Every bus write (IIC or SPI).
    Write,
}

#[derive(Default)]
pub struct Bench {
    calls: RefCell<Vec<Call>>,
    faults: RefCell<Vec<Fault>>,
    /// Bus writes allowed to succeed before [`Fault::Write`] kicks in.
    writes_before_fault: Cell<Option<usize>>,
    writes: Cell<usize>,
}

impl Bench {
    /// Recorded calls so far.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Recorded calls so far, clearing the log.
    pub fn take(&self) -> Vec<Call> {
        self.calls.take()
    }

    pub fn fail(&self, fault: Fault) {
        self.faults.borrow_mut().push(fault);
    }

    /// Let `n` more bus writes succeed, then fail every write after.
    pub fn fail_writes_after(&self, n: usize) {
        self.writes.set(0);
        self.writes_before_fault.set(Some(n));
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn check(&self, fault: Fault) -> Result<(), DisplayError> {
        if self.faults.borrow().contains(&fault) {
            Err(DisplayError::BusWriteError)
        } else {
            Ok(())
        }
    }

    fn check_write(&self) -> Result<(), DisplayError> {
        self.check(Fault::Write)?;
        let n = self.writes.get();
        self.writes.set(n + 1);
        match self.writes_before_fault.get() {
            Some(limit) if n >= limit => Err(DisplayError::BusWriteError),
            _ => Ok(()),
        }
    }

    /// Bus writes only, as `(is_data, bytes)`.
    pub fn writes(&self) -> Vec<(bool, Vec<u8>)> {
        let mut dc = false;
        let mut out = Vec::new();
        for call in self.calls.borrow().iter() {
            match call {
                Call::IicWrite { control, bytes, .. } => out.push((*control == 0x40, bytes.clone())),
                Call::DcSet(level) => dc = *level,
                Call::SpiWrite(bytes) => out.push((dc, bytes.clone())),
                _ => {}
            }
        }
        out
    }
}

// ── Ports ────────────────────────────────────────────────────────────────

pub struct Iic(pub Rc<Bench>);
pub struct Spi(pub Rc<Bench>);
pub struct Dc(pub Rc<Bench>);
pub struct Rst(pub Rc<Bench>);
pub struct Delay(pub Rc<Bench>);

impl IicBus for Iic {
    fn open(&mut self) -> Result<(), DisplayError> {
        self.0.record(Call::IicOpen);
        self.0.check(Fault::IicOpen)
    }

    fn close(&mut self) -> Result<(), DisplayError> {
        self.0.record(Call::IicClose);
        self.0.check(Fault::IicClose)
    }

    fn write(&mut self, address: u8, control: u8, bytes: &[u8]) -> Result<(), DisplayError> {
        self.0.record(Call::IicWrite {
            address,
            control,
            bytes: bytes.to_vec(),
        });
        self.0.check_write()
    }
}

impl SpiBus for Spi {
    fn open(&mut self) -> Result<(), DisplayError> {
        self.0.record(Call::SpiOpen);
        self.0.check(Fault::SpiOpen)
    }

    fn close(&mut self) -> Result<(), DisplayError> {
        self.0.record(Call::SpiClose);
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.0.record(Call::SpiWrite(bytes.to_vec()));
        self.0.check_write()
    }
}

impl ControlLine for Dc {
    fn init(&mut self) -> Result<(), DisplayError> {
        self.0.record(Call::DcInit);
        self.0.check(Fault::DcInit)
    }

    fn deinit(&mut self) -> Result<(), DisplayError> {
        self.0.record(Call::DcDeinit);
        Ok(())
    }

    fn set(&mut self, high: bool) -> Result<(), DisplayError> {
        self.0.record(Call::DcSet(high));
        Ok(())
    }
}

impl ControlLine for Rst {
    fn init(&mut self) -> Result<(), DisplayError> {
        self.0.record(Call::RstInit);
        self.0.check(Fault::RstInit)
    }

    fn deinit(&mut self) -> Result<(), DisplayError> {
        self.0.record(Call::RstDeinit);
        Ok(())
    }

    fn set(&mut self, high: bool) -> Result<(), DisplayError> {
        self.0.record(Call::RstSet(high));
        self.0.check(Fault::RstSet)
    }
}

impl DelayNs for Delay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.0.record(Call::DelayMs(ms));
    }
}

// ── Drivers ──────────────────────────────────────────────────────────────

pub type IicDriver = Ssd1306<Iic, Unbound, Unbound, Rst, Delay>;
pub type SpiDriver = Ssd1306<Unbound, Spi, Dc, Rst, Delay>;
pub type FullDriver = Ssd1306<Iic, Spi, Dc, Rst, Delay>;

pub fn iic_driver() -> (Rc<Bench>, IicDriver) {
    let bench = Rc::new(Bench::default());
    let driver = Ssd1306::new_iic(
        Iic(bench.clone()),
        Address::Sa0Low,
        Rst(bench.clone()),
        Delay(bench.clone()),
    );
    (bench, driver)
}

pub fn spi_driver() -> (Rc<Bench>, SpiDriver) {
    let bench = Rc::new(Bench::default());
    let driver = Ssd1306::new_spi(
        Spi(bench.clone()),
        Dc(bench.clone()),
        Rst(bench.clone()),
        Delay(bench.clone()),
    );
    (bench, driver)
}

pub fn full_driver() -> (Rc<Bench>, FullDriver) {
    let bench = Rc::new(Bench::default());
    let driver = Ssd1306::new(
        Iic(bench.clone()),
        Spi(bench.clone()),
        Dc(bench.clone()),
        Rst(bench.clone()),
        Delay(bench.clone()),
    );
    (bench, driver)
}

/// IIC driver after a successful `init`, with the log cleared.
pub fn ready_iic() -> (Rc<Bench>, IicDriver) {
    let (bench, mut driver) = iic_driver();
    driver.init().unwrap();
    bench.take();
    (bench, driver)
}

/// SPI driver after a successful `init`, with the log cleared.
pub fn ready_spi() -> (Rc<Bench>, SpiDriver) {
    let (bench, mut driver) = spi_driver();
    driver.init().unwrap();
    bench.take();
    (bench, driver)
}

/// The bus writes one `flush` of `pages` produces, as `(is_data, bytes)`.
pub fn expected_flush(pages: &[[u8; 128]; 8]) -> Vec<(bool, Vec<u8>)> {
    let mut out = Vec::new();
    for (page, data) in pages.iter().enumerate() {
        out.push((false, vec![0xB0 | page as u8]));
        out.push((false, vec![0x00]));
        out.push((false, vec![0x10]));
        out.push((true, data.to_vec()));
    }
    out
}
