mod engine;
mod types;
mod validate;

pub use engine::generate_pro_forma;
pub use types::{ProFormaInputs, ProFormaResult};
pub use validate::{FieldError, RawProFormaInput, RawValue, ValidationErrors, validate_inputs};
