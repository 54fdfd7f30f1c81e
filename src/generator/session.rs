use serde::{Deserialize, Serialize};

use super::clock::Clock;
use super::ledger::HistoryLedger;
use super::source::{generate, RandomSource};
use super::types::{GeneratorError, Range};
use crate::persistence::PersistedState;

/// What a client renders after every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub history: Vec<i64>,
    pub total_count: u64,
    pub average: i64,
    pub last_time: Option<String>,
    pub min: i64,
    pub max: i64,
}

/// Ledger plus the range inputs and last-time label that travel with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorState {
    ledger: HistoryLedger,
    min_value: Option<String>,
    max_value: Option<String>,
    last_time: Option<String>,
}

impl GeneratorState {
    pub fn from_persisted(state: PersistedState) -> Self {
        Self {
            ledger: HistoryLedger::restore(state.history, state.total_count, state.sum_values),
            min_value: state.min_value,
            max_value: state.max_value,
            last_time: state.last_time,
        }
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState::capture(
            &self.ledger,
            self.min_value.clone(),
            self.max_value.clone(),
            self.last_time.clone(),
        )
    }

    pub fn ledger(&self) -> &HistoryLedger {
        &self.ledger
    }

    /// Range as the inputs currently read; may be invalid if the stored text is.
    pub fn current_inputs(&self) -> (i64, i64) {
        Range::from_inputs(self.min_value.as_deref(), self.max_value.as_deref())
    }

    #[tracing::instrument(skip(self, source, clock))]
    pub fn generate(
        &mut self,
        range: Range,
        source: &mut impl RandomSource,
        clock: &dyn Clock,
    ) -> Result<i64, GeneratorError> {
        let value = generate(source, range)?;

        self.ledger.record(value);
        self.min_value = Some(range.min().to_string());
        self.max_value = Some(range.max().to_string());
        self.last_time = Some(clock.time_label());

        tracing::debug!(value, total_count = self.ledger.total_count(), "Recorded draw");
        Ok(value)
    }

    /// Empties the history and counters. Range inputs and the last-time label stay.
    pub fn clear(&mut self) {
        self.ledger.clear();
    }

    pub fn snapshot(&self) -> Snapshot {
        let (min, max) = self.current_inputs();
        Snapshot {
            history: self.ledger.history().to_vec(),
            total_count: self.ledger.total_count(),
            average: self.ledger.average(),
            last_time: self.last_time.clone(),
            min,
            max,
        }
    }
}
