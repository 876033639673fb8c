//! Job-shop domain models.
//!
//! Provides the problem description ([`Instance`]), the per-step operation
//! views used by dispatching rules, and the output types ([`Schedule`],
//! [`Solution`]).
//!
//! # Domain Mappings
//!
//! | u-jobshop | Manufacturing | Computing |
//! |-----------|---------------|-----------|
//! | Job | Order / Routing | Pipeline |
//! | Operation | Process Step | Stage |
//! | Machine | Work Center | Worker |
//! | Solution | Production Plan | Execution Plan |

mod instance;
mod operation;
mod schedule;
mod solution;

pub use instance::Instance;
pub use operation::{OperationRef, ReadyOperation};
pub use schedule::{Schedule, ScheduledOperation, Violation, ViolationType};
pub use solution::Solution;
