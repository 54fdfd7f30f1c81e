pub mod clock;
pub mod ledger;
pub mod session;
pub mod source;
pub mod spin;
pub mod types;


pub use clock::{Clock, SystemClock};
pub use ledger::{HistoryLedger, HISTORY_LIMIT};
pub use session::{GeneratorState, Snapshot};
pub use source::{generate, OsRandomSource, RandomSource};
pub use spin::{Spin, SpinFrame};
pub use types::{GeneratorError, Range};
