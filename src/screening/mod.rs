pub mod glim;
pub mod instruments;
pub mod model;
pub mod scorer;

pub use glim::{GlimCriteria, GlimDiagnosis};
pub use instruments::{find_instrument, INSTRUMENTS};
pub use model::{AnswerOption, Answers, ScreeningConfig, ScreeningQuestion, ScreeningResult, Scoring};
pub use scorer::{evaluate, evaluate_checked, missing_answers, validate_answers};
