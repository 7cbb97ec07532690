use crate::error::Result;

/// Check that an input value satisfies its structural invariants.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
