use std::sync::atomic::{AtomicU32, Ordering};

use embedded_hal::digital::InputPin;

#[derive(Debug, Default)]
pub struct InputState {
    activations: AtomicU32,
}

impl InputState {
    pub fn record_activation(&self) {
        self.activations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn take_activations(&self) -> u32 {
        self.activations.swap(0, Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    ActiveLow,
    ActiveHigh,
}

pub struct PushButton<P> {
    pin: P,
    polarity: Polarity,
    debounce_ms: u32,
    pressed: bool,
    candidate: bool,
    candidate_since_ms: u32,
}

impl<P> PushButton<P>
where
    P: InputPin,
{
    pub fn new(pin: P, polarity: Polarity, debounce_ms: u32) -> Self {
        Self {
            pin,
            polarity,
            debounce_ms,
            pressed: false,
            candidate: false,
            candidate_since_ms: 0,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Samples the pin. Returns `true` once per click, on the debounced release.
    pub fn poll(&mut self, clock_ms: u32) -> Result<bool, P::Error> {
        let raw = match self.polarity {
            Polarity::ActiveLow => self.pin.is_low()?,
            Polarity::ActiveHigh => self.pin.is_high()?,
        };

        if raw != self.candidate {
            self.candidate = raw;
            self.candidate_since_ms = clock_ms;
            return Ok(false);
        }
        if raw == self.pressed || clock_ms.wrapping_sub(self.candidate_since_ms) < self.debounce_ms {
            return Ok(false);
        }

        self.pressed = raw;
        Ok(!raw)
    }
}
