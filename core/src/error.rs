pub use medialib_errors::FacadeError as Error;

pub type Result<T> = std::result::Result<T, Error>;
