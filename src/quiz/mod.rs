//! Quiz domain: questions, the session state machine and review data.
//!
//! # Architecture
//!
//! * [`question`]: validated [`Question`] records and the [`Answer`] variant.
//! * [`session`]: the [`Session`] controller and its [`Attempt`] log.
//! * [`review`]: per-choice highlighting for the post-quiz review.
//!
//! Per question the session moves `Answering -> Revealed -> Answering(next)`,
//! and after the last question into `Complete`, which toggles between the
//! summary and the review listing without further scoring.

pub mod question;
pub mod review;
pub mod session;

pub use question::{Answer, Question, QuestionError, RawQuestion};
pub use review::{ChoiceMark, ReviewEntry};
pub use session::{Attempt, Intent, QuizError, Session};
