pub mod capability;

pub use capability::{CapabilityError, DocumentParser, TaxAssistant};
