use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no project named \"empty\" exists to receive unbound channels")]
    NoFallbackProject,
}

pub type Result<T> = std::result::Result<T, Error>;
