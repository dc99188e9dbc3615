//! src/reducers/adder.rs
use crate::error::{AggregateError, RecordError};
use crate::functions::{Count, Key, KeyCount, ReduceEmitter, Reducer};
use crate::record::RawRecord;

/// The reducer's only in-flight state: the group currently being summed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GroupState {
    #[default]
    Idle,
    Active { key: Key, total: Count },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdderStats {
    pub groups_emitted: u64,
    pub malformed_counts: u64,
    pub out_of_order_keys: u64,
}

/// Sums the counts of contiguous runs of equal keys.
///
/// Input must already be sorted (or at least grouped) by key. Unsorted input
/// is not rejected: a key that reappears after a different key starts a new
/// group and is emitted again. Descending keys are logged and counted so the
/// broken upstream contract is visible.
pub struct Adder<E> {
    emitter: E,
    state: GroupState,
    stats: AdderStats,
}

impl<E> Adder<E> {
    pub fn stats(&self) -> AdderStats {
        self.stats
    }
}

impl<E: ReduceEmitter> Adder<E> {
    fn emit_group(&mut self, key: Key, total: Count) -> Result<(), AggregateError> {
        self.emitter.emit(KeyCount::new(key, total))?;
        self.stats.groups_emitted += 1;
        Ok(())
    }

    fn start_group(&mut self, record: &RawRecord<'_>) -> Result<(), AggregateError> {
        if let Some(count) = self.parse_count(record)? {
            self.state = GroupState::Active {
                key: record.key().to_string(),
                total: count,
            };
        }
        Ok(())
    }

    /// `None` for a malformed count, which is dropped. A count too large for
    /// `Count` is fatal, like a total that overflows.
    fn parse_count(&mut self, record: &RawRecord<'_>) -> Result<Option<Count>, AggregateError> {
        match record.count() {
            Ok(count) => Ok(Some(count)),
            Err(RecordError::CountTooLarge { key, .. }) => Err(AggregateError::CountOverflow { key }),
            Err(e) => {
                tracing::debug!(error = %e, "Dropping record with malformed count");
                self.stats.malformed_counts += 1;
                Ok(None)
            }
        }
    }
}

impl<E: ReduceEmitter> Reducer for Adder<E> {
    type Emitter = E;

    fn build(emitter: E) -> Self {
        Self {
            emitter,
            state: GroupState::Idle,
            stats: AdderStats::default(),
        }
    }

    fn reduce(&mut self, record: RawRecord<'_>) -> Result<(), AggregateError> {
        match std::mem::take(&mut self.state) {
            GroupState::Idle => self.start_group(&record)?,
            GroupState::Active { key, total } if key == record.key() => {
                let total = match self.parse_count(&record)? {
                    Some(count) => total
                        .checked_add(count)
                        .ok_or_else(|| AggregateError::CountOverflow { key: key.clone() })?,
                    None => total,
                };
                self.state = GroupState::Active { key, total };
            }
            GroupState::Active { key, total } => {
                if record.key() < key.as_str() {
                    tracing::warn!(
                        previous = %key,
                        next = record.key(),
                        "Input is not sorted by key; totals for this key may be split"
                    );
                    self.stats.out_of_order_keys += 1;
                }
                // The finished group goes out before the next record is
                // looked at, even if that record turns out to be malformed.
                self.emit_group(key, total)?;
                self.start_group(&record)?;
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), AggregateError> {
        if let GroupState::Active { key, total } = std::mem::take(&mut self.state) {
            self.emit_group(key, total)?;
        }
        Ok(())
    }

    fn into_emitter(self) -> E {
        self.emitter
    }
}
