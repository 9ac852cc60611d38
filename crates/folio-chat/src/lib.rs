//! Chat widget core for the portfolio.
//!
//! Provides keyword intent resolution, reply synthesis (including the live
//! projects listing), and the session that owns the visible transcript.

pub mod intent;
pub mod markup;
pub mod reply;
pub mod session;
pub mod types;

pub use intent::{resolve, Intent};
pub use reply::{Reply, ReplyOutcome, ReplySynthesizer};
pub use session::{ChatSession, SubmitOutcome, QUICK_QUESTIONS};
pub use types::{Message, Sender, SessionSnapshot};
