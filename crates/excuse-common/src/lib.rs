pub mod excuse;
pub mod validation;

pub use excuse::{Category, ExcuseForm, ExcuseRequest, ExcuseResponse, Seriousness, Tone};
pub use validation::ValidationError;

pub mod telemetry;
