/// Errors from walker and field operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KernelError {
    #[error("walker {0:?} not found")]
    WalkerNotFound(String),
    #[error("walker has no location; set one before stepping")]
    UninitializedLocation,
    #[error("mean distance is undefined for an empty field")]
    EmptyField,
    #[error("no unused walker name found after {attempts} attempts")]
    NameGenerationExhausted { attempts: usize },
    #[error("walker {0:?} already exists")]
    DuplicateName(String),
}
