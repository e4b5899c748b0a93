/// Currency amounts (INR) as carried on the wire.
pub type Money = f64;

/// Fraud-likelihood estimate in `0..=100`.
pub type RiskScore = u8;

/// Upper bound of [`RiskScore`].
pub const MAX_RISK_SCORE: RiskScore = 100;

/// All backend-provided timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Whether an outcome came from the live backend or the local simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Live,
    Demo,
}

impl Mode {
    pub fn is_demo(self) -> bool {
        matches!(self, Mode::Demo)
    }
}
