pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Malformed record: {message}")]
	MalformedRecord { message: String },
	#[error("Unit index out of sync: {message}")]
	IndexOutOfSync { message: String },
	#[error("Invalid argument: {message}")]
	InvalidArgument { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
}
impl From<wf_providers::Error> for Error {
	fn from(err: wf_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}
