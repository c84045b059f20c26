use thiserror::Error;

use crate::model::{JuzIdError, StageError, ThemeParseError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    JuzId(#[from] JuzIdError),
    #[error(transparent)]
    Stage(#[from] StageError),
    #[error(transparent)]
    Theme(#[from] ThemeParseError),
}
