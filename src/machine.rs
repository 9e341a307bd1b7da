//! The conversion state machine shared by every driver in this crate.
//!
//! A [`Sensor`] owns one device session: the transport, the clock, the
//! current [`State`] and the last [`ErrorKind`]. What is specific to a device
//! (which registers to program, which command starts a conversion, how to tell
//! it is finished and how to turn raw bits into physical units) lives behind
//! the [`Device`] trait.
//!
//! Nothing here sleeps except [`Sensor::begin`]. Everything else does at most a
//! handful of register accesses and returns.

use crate::bus::{RegisterBus, Transport};
use crate::clock::{elapsed_ms, Clock};
use crate::error::{error_message, ErrorKind, SensorError, SensorResult, ERROR_MESSAGE_LEN};
use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::SevenBitAddress;

/// Where a session currently is.
///
/// `P` is the device's phase type. Single-phase devices have one phase,
/// the barometer goes through a temperature phase and then a pressure phase.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum State<P> {
    /// Constructed, `setup()` not called yet.
    WaitSetup,
    /// Configured but not started, or `begin()` failed.
    WaitBegin,
    /// Ready to accept a `request()`.
    Idle,
    /// A conversion for phase `P` has been issued and is in progress.
    Busy(P),
    /// The conversion for phase `P` is done and its result can be read out.
    Complete(P),
    /// Phase `P` failed. Relaxes to [`State::Idle`] on the next `update()`.
    Error(P),
    /// A reading is waiting to be consumed by `read()`.
    Available,
}

/// What collecting a completed phase produced.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Outcome<P, R> {
    /// Start this phase next.
    Next(P),
    /// The final reading.
    Done(R),
}

/// The device specific part of a driver: its phase plan and compensation.
pub trait Device {
    /// Bus addresses the device can be strapped to.
    type Address: Copy + Debug + Default + Into<SevenBitAddress>;
    type Settings: Clone + Debug + Default;
    /// Argument to `request()`.
    type Request;
    /// Result handed out by `read()`.
    type Reading: Copy + Debug;
    type Phase: Copy + Debug + PartialEq;

    /// Name used in error messages.
    const NAME: &'static str;

    /// Time the device needs after power-up before it answers, in milliseconds.
    const STARTUP_DELAY_MS: u32 = 0;

    /// Programs `settings` into the device. Runs once per `begin()` and may block.
    fn configure<T: Transport, D: DelayNs>(
        &mut self,
        bus: &mut RegisterBus<'_, T>,
        settings: &Self::Settings,
        delay: &mut D,
    ) -> SensorResult<(), T::Error>;

    /// Starts a conversion and returns the phase now in progress.
    fn start<T: Transport>(
        &mut self,
        bus: &mut RegisterBus<'_, T>,
        settings: &Self::Settings,
        request: Self::Request,
    ) -> SensorResult<Self::Phase, T::Error>;

    /// Issues the command for a follow-up phase returned by [`Device::collect`].
    fn trigger<T: Transport>(
        &mut self,
        bus: &mut RegisterBus<'_, T>,
        settings: &Self::Settings,
        phase: Self::Phase,
    ) -> SensorResult<(), T::Error>;

    /// Reports whether `phase` has finished. `elapsed_ms` counts from the command.
    fn poll<T: Transport>(
        &mut self,
        bus: &mut RegisterBus<'_, T>,
        settings: &Self::Settings,
        phase: Self::Phase,
        elapsed_ms: u32,
    ) -> SensorResult<bool, T::Error>;

    /// Reads out and compensates the result of a finished `phase`.
    fn collect<T: Transport>(
        &mut self,
        bus: &mut RegisterBus<'_, T>,
        settings: &Self::Settings,
        phase: Self::Phase,
    ) -> SensorResult<Outcome<Self::Phase, Self::Reading>, T::Error>;
}

/// One device session.
pub struct Sensor<D: Device, T, C> {
    device: D,
    transport: T,
    clock: C,
    state: State<D::Phase>,
    last_error: ErrorKind,
    address: D::Address,
    settings: D::Settings,
    requested_at: u32,
    reading: Option<D::Reading>,
}

impl<D, T, C> Sensor<D, T, C>
where
    D: Device,
    T: Transport,
    C: Clock,
{
    pub fn new(device: D, transport: T, clock: C) -> Self {
        Self {
            device,
            transport,
            clock,
            state: State::WaitSetup,
            last_error: ErrorKind::default(),
            address: D::Address::default(),
            settings: D::Settings::default(),
            requested_at: 0,
            reading: None,
        }
    }

    /// Stores the address and settings for the next `begin()`.
    ///
    /// Discards anything in flight. May be called any number of times.
    pub fn setup(&mut self, address: D::Address, settings: D::Settings) {
        self.last_error = ErrorKind::FailedUnknown;
        self.address = address;
        self.settings = settings;
        self.requested_at = 0;
        self.reading = None;
        self.set_state(State::WaitBegin);
    }

    /// Brings the device up and applies the settings.
    ///
    /// On failure the session stays in [`State::WaitBegin`]; there is no retry.
    pub fn begin<Dl: DelayNs>(&mut self, delay: &mut Dl) -> SensorResult<(), T::Error> {
        if self.state != State::WaitBegin {
            self.end();
        }

        self.transport.open();
        delay.delay_ms(D::STARTUP_DELAY_MS);

        let mut bus = RegisterBus::new(&mut self.transport, self.address.into());
        let result = self.device.configure(&mut bus, &self.settings, delay);
        self.last_error = ErrorKind::from(&result);

        match result {
            Ok(()) => {
                log::debug!("{} at 0x{:02X} started", D::NAME, bus.address());
                self.set_state(State::Idle);
                Ok(())
            }
            Err(e) => {
                log::warn!("{} failed to start: {:?}", D::NAME, e);
                Err(e)
            }
        }
    }

    /// Advances the state machine by at most one step. Call it often.
    pub fn update(&mut self) {
        let now = self.clock.now_ms();
        let mut bus = RegisterBus::new(&mut self.transport, self.address.into());

        let next = match self.state {
            State::Busy(phase) => {
                let elapsed = elapsed_ms(now, self.requested_at);
                match self.device.poll(&mut bus, &self.settings, phase, elapsed) {
                    Ok(true) => State::Complete(phase),
                    Ok(false) => return,
                    Err(e) => {
                        Self::fail(&mut self.last_error, phase, &e);
                        State::Error(phase)
                    }
                }
            }
            State::Complete(phase) => match self.device.collect(&mut bus, &self.settings, phase) {
                Ok(Outcome::Done(reading)) => {
                    self.reading = Some(reading);
                    self.last_error = ErrorKind::Success;
                    State::Available
                }
                Ok(Outcome::Next(next)) => {
                    match self.device.trigger(&mut bus, &self.settings, next) {
                        Ok(()) => {
                            self.requested_at = now;
                            State::Busy(next)
                        }
                        Err(e) => {
                            Self::fail(&mut self.last_error, next, &e);
                            State::Error(next)
                        }
                    }
                }
                Err(e) => {
                    Self::fail(&mut self.last_error, phase, &e);
                    State::Error(phase)
                }
            },
            State::Error(_) => State::Idle,
            State::WaitSetup | State::WaitBegin | State::Idle | State::Available => return,
        };

        self.set_state(next);
    }

    /// Closes the transport and returns to [`State::WaitBegin`].
    pub fn end(&mut self) {
        if self.state == State::WaitBegin {
            return;
        }

        self.transport.close();
        self.reading = None;
        self.set_state(State::WaitBegin);
    }

    /// True while a reading is waiting for `read()`.
    pub fn available(&self) -> bool {
        self.state == State::Available
    }

    /// Starts a conversion. Only valid in [`State::Idle`].
    ///
    /// In any other state nothing is sent to the device and
    /// [`SensorError::Busy`] is returned.
    pub fn request(&mut self, request: D::Request) -> SensorResult<(), T::Error> {
        if self.state != State::Idle {
            self.last_error = ErrorKind::FailedBusy;
            return Err(SensorError::Busy);
        }

        let mut bus = RegisterBus::new(&mut self.transport, self.address.into());
        match self.device.start(&mut bus, &self.settings, request) {
            Ok(phase) => {
                self.requested_at = self.clock.now_ms();
                self.last_error = ErrorKind::Success;
                self.set_state(State::Busy(phase));
                Ok(())
            }
            Err(e) => {
                log::warn!("{} request failed: {:?}", D::NAME, e);
                self.last_error = e.kind();
                Err(e)
            }
        }
    }

    /// Hands out the reading and returns to [`State::Idle`]. Only valid in [`State::Available`].
    pub fn read(&mut self) -> SensorResult<D::Reading, T::Error> {
        let reading = match (self.state, self.reading) {
            (State::Available, Some(reading)) => reading,
            _ => {
                self.last_error = ErrorKind::FailedBusy;
                return Err(SensorError::Busy);
            }
        };

        self.reading = None;
        self.last_error = ErrorKind::Success;
        self.set_state(State::Idle);
        Ok(reading)
    }

    /// Power management is left to the surrounding code.
    pub fn on_sleep(&mut self) {}

    /// See [`Sensor::on_sleep`].
    pub fn on_wakeup(&mut self) {}

    pub fn state(&self) -> State<D::Phase> {
        self.state
    }

    pub fn last_error(&self) -> ErrorKind {
        self.last_error
    }

    /// Human readable form of [`Sensor::last_error`].
    pub fn error_message(&self) -> heapless::String<ERROR_MESSAGE_LEN> {
        error_message(D::NAME, self.last_error)
    }

    pub fn address(&self) -> D::Address {
        self.address
    }

    pub fn settings(&self) -> &D::Settings {
        &self.settings
    }

    /// Replaces the settings. They are programmed into the device on the next `begin()`.
    ///
    /// Settings are fixed for a running session: outside [`State::WaitSetup`] and
    /// [`State::WaitBegin`] nothing changes and [`SensorError::Busy`] is returned.
    pub fn set_settings(&mut self, settings: D::Settings) -> SensorResult<(), T::Error> {
        if !matches!(self.state, State::WaitSetup | State::WaitBegin) {
            self.last_error = ErrorKind::FailedBusy;
            return Err(SensorError::Busy);
        }

        self.settings = settings;
        Ok(())
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub(crate) fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Register access at the session's address, for device specific extras.
    pub fn bus(&mut self) -> RegisterBus<'_, T> {
        RegisterBus::new(&mut self.transport, self.address.into())
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Gives back the transport and the clock.
    pub fn release(self) -> (T, C) {
        (self.transport, self.clock)
    }

    fn fail(last_error: &mut ErrorKind, phase: D::Phase, error: &SensorError<T::Error>) {
        log::warn!("{} {:?} phase failed: {:?}", D::NAME, phase, error);
        *last_error = error.kind();
    }

    fn set_state(&mut self, state: State<D::Phase>) {
        if self.state != state {
            log::debug!("{}: {:?} -> {:?}", D::NAME, self.state, state);
        }
        self.state = state;
    }
}
