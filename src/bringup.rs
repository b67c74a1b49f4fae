//! BNO055 bring-up sequence
//!
//! Bring-up is an explicit sequence of [`Step`]s. The order lives in
//! [`Step::next`], the trailing wait of every step in [`Step::settle_ms`], and
//! the identity probe policy in [`ProbePolicy`], so none of them depends on
//! the bus and all of them can be checked on their own.
//!
//! ```text
//! Disconnected -> Connecting -> Probing -> ConfiguringMode -> Resetting
//!              -> PoweringUp -> FinalConfiguring -> Ready
//! any step --(error)--> Failed(step)
//! ```

/// Wait after every `OPR_MODE` or `PWR_MODE` write
pub const MODE_SETTLE_MS: u32 = 30;
/// Wait after triggering a system reset before polling the chip again
pub const RESET_BOOT_MS: u32 = 1000;
/// Interval between chip-identity polls after reset
pub const RESET_POLL_MS: u32 = 40;
/// Wait once the chip answers again after reset
pub const RESET_SETTLE_MS: u32 = 50;
/// Wait after clearing `SYS_TRIGGER` at power-up
pub const POWER_UP_SETTLE_MS: u32 = 10;
/// Wait after entering the target operation mode
pub const FINAL_SETTLE_MS: u32 = 10;

/// One step of the bring-up sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Find the controller and open the device connection
    Connecting,
    /// Check the chip identity, with bounded retries
    Probing,
    /// Enter configuration mode
    ConfiguringMode,
    /// Reset the chip and wait until it answers again
    Resetting,
    /// Normal power, register page 0, clear the system trigger
    PoweringUp,
    /// Enter the target fusion mode
    FinalConfiguring,
}

impl Step {
    /// First step of the sequence
    pub const FIRST: Self = Self::Connecting;

    /// Step that follows this one, `None` after the last
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Connecting => Some(Self::Probing),
            Self::Probing => Some(Self::ConfiguringMode),
            Self::ConfiguringMode => Some(Self::Resetting),
            Self::Resetting => Some(Self::PoweringUp),
            Self::PoweringUp => Some(Self::FinalConfiguring),
            Self::FinalConfiguring => None,
        }
    }

    /// Fixed wait at the end of the step, after its last register write
    #[must_use]
    pub const fn settle_ms(self) -> u32 {
        match self {
            Self::Connecting | Self::Probing => 0,
            Self::ConfiguringMode => MODE_SETTLE_MS,
            Self::Resetting => RESET_SETTLE_MS,
            Self::PoweringUp => POWER_UP_SETTLE_MS,
            Self::FinalConfiguring => FINAL_SETTLE_MS,
        }
    }
}

/// Lifecycle of a `Bno055Driver`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BringUpState {
    /// No bring-up attempted since construction or release
    #[default]
    Disconnected,
    /// Bring-up is executing this step
    InProgress(Step),
    /// Bring-up completed; all accessors are available
    Ready,
    /// Bring-up aborted in this step; it must be restarted from scratch
    Failed(Step),
}

impl BringUpState {
    /// State after `step` completes successfully
    #[must_use]
    pub const fn advance(step: Step) -> Self {
        match step.next() {
            Some(next) => Self::InProgress(next),
            None => Self::Ready,
        }
    }

    /// Whether accessors may talk to the chip
    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Result of evaluating one identity read against the probe policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProbeOutcome {
    /// The expected identity was read
    Matched,
    /// Wait this many milliseconds, then read again
    Retry(u32),
    /// No retries left
    Exhausted,
}

/// Bounded retry policy for the identity probe
///
/// The wait only happens between two reads. Once the retries are used up the
/// probe fails straight away, so the defaults give up after one second rather
/// than two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProbePolicy {
    /// Reads allowed after the first one
    pub max_retries: u8,
    /// Wait between two reads in milliseconds
    pub retry_delay_ms: u32,
}

impl Default for ProbePolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            retry_delay_ms: 1000,
        }
    }
}

impl ProbePolicy {
    /// Create a policy
    #[must_use]
    pub const fn new(max_retries: u8, retry_delay_ms: u32) -> Self {
        Self {
            max_retries,
            retry_delay_ms,
        }
    }

    /// Total number of identity reads before giving up
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_retries as u32 + 1
    }

    /// Decide what follows read number `attempt` (0 for the first read)
    #[must_use]
    pub const fn evaluate(&self, attempt: u32, found: u8, expected: u8) -> ProbeOutcome {
        if found == expected {
            ProbeOutcome::Matched
        } else if attempt < self.max_retries as u32 {
            ProbeOutcome::Retry(self.retry_delay_ms)
        } else {
            ProbeOutcome::Exhausted
        }
    }
}
