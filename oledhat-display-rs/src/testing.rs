//! Recording fakes for the bus, control lines and delays.

use core::cell::RefCell;
use core::convert::Infallible;
use std::rc::Rc;
use std::vec::Vec;

use display_interface::{AsyncWriteOnlyDataCommand, DataFormat, DisplayError};
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{self, I2c, Operation, SevenBitAddress};

/// I2C bus that records each write as `(address, bytes)`.
#[derive(Default)]
pub struct FakeI2c {
    pub writes: Vec<(u8, Vec<u8>)>,
    pub fail: bool,
}

impl i2c::ErrorType for FakeI2c {
    type Error = i2c::ErrorKind;
}

impl I2c<SevenBitAddress> for FakeI2c {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.fail {
            return Err(i2c::ErrorKind::Bus);
        }
        for op in operations {
            if let Operation::Write(bytes) = op {
                self.writes.push((address, bytes.to_vec()));
            }
        }
        Ok(())
    }
}

/// One write seen by [`FakeInterface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Command(Vec<u8>),
    Data(Vec<u8>),
}

/// Display interface recording commands and data separately.
#[derive(Default)]
pub struct FakeInterface {
    pub frames: Vec<Frame>,
    /// Fail the write with this zero-based index, and every one after.
    pub fail_from: Option<usize>,
}

impl FakeInterface {
    pub fn failing_from(index: usize) -> Self {
        Self {
            fail_from: Some(index),
            ..Self::default()
        }
    }

    pub fn commands(&self) -> Vec<Vec<u8>> {
        self.frames
            .iter()
            .filter_map(|f| match f {
                Frame::Command(c) => Some(c.clone()),
                Frame::Data(_) => None,
            })
            .collect()
    }

    pub fn data(&self) -> Vec<Vec<u8>> {
        self.frames
            .iter()
            .filter_map(|f| match f {
                Frame::Data(d) => Some(d.clone()),
                Frame::Command(_) => None,
            })
            .collect()
    }

    /// `(page register, data)` for every page select followed by a data
    /// write.
    pub fn page_writes(&self) -> Vec<(u8, Vec<u8>)> {
        self.frames
            .windows(2)
            .filter_map(|w| match (&w[0], &w[1]) {
                (Frame::Command(c), Frame::Data(d)) if c.len() == 3 => Some((c[0], d.clone())),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, frame: Frame) -> Result<(), DisplayError> {
        if self.fail_from.is_some_and(|n| self.frames.len() >= n) {
            return Err(DisplayError::BusWriteError);
        }
        self.frames.push(frame);
        Ok(())
    }
}

fn bytes(format: DataFormat<'_>) -> Vec<u8> {
    match format {
        DataFormat::U8(b) => b.to_vec(),
        _ => panic!("unexpected data format"),
    }
}

impl AsyncWriteOnlyDataCommand for FakeInterface {
    async fn send_commands(&mut self, cmd: DataFormat<'_>) -> Result<(), DisplayError> {
        self.record(Frame::Command(bytes(cmd)))
    }

    async fn send_data(&mut self, buf: DataFormat<'_>) -> Result<(), DisplayError> {
        self.record(Frame::Data(bytes(buf)))
    }
}

/// Shared log of control-line transitions and delays, in order.
pub type EventLog = Rc<RefCell<Vec<Event>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    High(&'static str),
    Low(&'static str),
    DelayMs(u32),
}

pub struct FakePin {
    pub name: &'static str,
    pub log: EventLog,
    pub broken: bool,
}

impl FakePin {
    pub fn new(name: &'static str, log: &EventLog) -> Self {
        Self {
            name,
            log: log.clone(),
            broken: false,
        }
    }
}

impl ErrorType for FakePin {
    type Error = ErrorKind;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), ErrorKind> {
        if self.broken {
            return Err(ErrorKind::Other);
        }
        self.log.borrow_mut().push(Event::Low(self.name));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), ErrorKind> {
        if self.broken {
            return Err(ErrorKind::Other);
        }
        self.log.borrow_mut().push(Event::High(self.name));
        Ok(())
    }
}

/// Output pin for boards with the line tied off.
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

pub struct FakeDelay {
    pub log: EventLog,
}

impl FakeDelay {
    pub fn new(log: &EventLog) -> Self {
        Self { log: log.clone() }
    }
}

impl DelayNs for FakeDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.log.borrow_mut().push(Event::DelayMs(ns / 1_000_000));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(Event::DelayMs(ms));
    }
}
