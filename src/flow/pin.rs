//! PIN entry gate
//!
//! A plain string comparison against a PIN that ships with the page. It keeps
//! the surprise behind a step, nothing more. [`PinForm`] adds the page steps
//! around it: a welcome card, then entry, then a short verifying pause.

/// Required PIN length
pub const PIN_LENGTH: usize = 8;

/// Why a PIN was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PinError {
    #[error("PIN must be {PIN_LENGTH} characters, got {0}")]
    WrongLength(usize),
    #[error("Sorry, wrong PIN. Please try again!")]
    Mismatch,
}

/// Compares entered PINs with the expected one
#[derive(Debug, Clone)]
pub struct PinGate {
    expected: String,
}

impl PinGate {
    pub const SUCCESS_MESSAGE: &'static str = "Correct PIN! Press Next for a surprise!";

    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }

    /// Whether the submit button should be enabled for `input`
    pub fn can_submit(input: &str) -> bool {
        input.chars().count() == PIN_LENGTH
    }

    pub fn verify(&self, input: &str) -> Result<(), PinError> {
        let len = input.chars().count();
        if len != PIN_LENGTH {
            return Err(PinError::WrongLength(len));
        }
        if input == self.expected {
            Ok(())
        } else {
            Err(PinError::Mismatch)
        }
    }
}

/// Time the form spends "verifying" before showing the result (ms)
pub const VERIFY_DELAY_MS: f64 = 800.0;

/// Where the PIN page is
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PinStage {
    /// Welcome card with a start button
    Welcome,
    /// Input shown and editable
    Entry,
    /// Input locked until `done_at`
    Verifying { done_at: f64 },
    /// Correct PIN entered; the Next button is offered
    Accepted,
}

/// PIN page state
#[derive(Debug, Clone)]
pub struct PinForm {
    gate: PinGate,
    stage: PinStage,
    /// Input captured at submit time
    submitted: String,
}

impl PinForm {
    pub fn new(gate: PinGate) -> Self {
        Self {
            gate,
            stage: PinStage::Welcome,
            submitted: String::new(),
        }
    }

    pub fn stage(&self) -> PinStage {
        self.stage
    }

    /// Back to the welcome card
    pub fn reset(&mut self) {
        self.stage = PinStage::Welcome;
        self.submitted.clear();
    }

    /// Leave the welcome card for the input
    pub fn begin(&mut self) {
        if self.stage == PinStage::Welcome {
            self.stage = PinStage::Entry;
        }
    }

    pub fn is_input_locked(&self) -> bool {
        matches!(self.stage, PinStage::Verifying { .. })
    }

    /// Whether the submit button should be enabled for `input` right now
    pub fn can_submit(&self, input: &str) -> bool {
        self.stage == PinStage::Entry && PinGate::can_submit(input)
    }

    /// Lock the input and start verifying. Returns whether verification
    /// started; submits outside the entry step are ignored.
    pub fn submit(&mut self, input: &str, now_ms: f64) -> bool {
        if self.stage != PinStage::Entry {
            return false;
        }
        self.submitted = input.to_string();
        self.stage = PinStage::Verifying {
            done_at: now_ms + VERIFY_DELAY_MS,
        };
        true
    }

    /// Finish a pending verification once its delay has passed. Returns the
    /// verdict on the call that resolves it, `None` otherwise.
    pub fn advance(&mut self, now_ms: f64) -> Option<Result<(), PinError>> {
        let PinStage::Verifying { done_at } = self.stage else {
            return None;
        };
        if now_ms < done_at {
            return None;
        }
        let verdict = self.gate.verify(&self.submitted);
        self.stage = if verdict.is_ok() {
            PinStage::Accepted
        } else {
            PinStage::Entry
        };
        self.submitted.clear();
        Some(verdict)
    }
}
