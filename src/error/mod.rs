mod convert;
mod resolve;

pub use convert::ConvertError;
pub use resolve::ResolveError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

pub type Result<T> = std::result::Result<T, Error>;
