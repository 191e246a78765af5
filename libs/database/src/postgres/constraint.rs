use sea_orm::{DbErr, SqlErr};

/// Integrity constraint the store rejected a write with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    Unique(String),
    ForeignKey(String),
}

impl ConstraintViolation {
    /// Driver message, e.g. `duplicate key value violates unique constraint ...`.
    pub fn detail(&self) -> &str {
        match self {
            Self::Unique(msg) | Self::ForeignKey(msg) => msg,
        }
    }
}

/// Classify `err` as a unique or foreign-key violation, if it is one.
pub fn constraint_violation(err: &DbErr) -> Option<ConstraintViolation> {
    match err.sql_err()? {
        SqlErr::UniqueConstraintViolation(msg) => Some(ConstraintViolation::Unique(msg)),
        SqlErr::ForeignKeyConstraintViolation(msg) => Some(ConstraintViolation::ForeignKey(msg)),
        _ => None,
    }
}
