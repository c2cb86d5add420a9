use thiserror::Error;

pub type LayoutResult<T> = Result<T, LayoutError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A container referenced a field slug the bound schema does not declare.
    #[error("field '{slug}' is not defined in the schema")]
    UndefinedField { slug: String },
}
