pub mod model;
pub mod openai;

pub use model::{FnModel, LanguageModel};
pub use openai::OpenAiCompletionModel;
