/// Async state for data fetched through [`crate::api::CatalogService`].
///
/// Follows the RemoteData pattern: a request is either not started, in
/// flight, finished with data, or finished with an error. Replaces the
/// `loading: bool` + `data: Option<T>` pair that tends to drift apart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resource<T, E = String> {
    /// No request has been made yet
    NotAsked,

    /// Request is in progress
    Loading,

    /// Request succeeded with data
    Success(T),

    /// Request failed with error
    Failure(E),
}

impl<T, E> Resource<T, E> {
    pub fn from_result(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Resource::Success(data),
            Err(e) => Resource::Failure(e),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Resource::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Resource::Failure(_))
    }

    /// Get a reference to the data if the request succeeded
    pub fn to_option(&self) -> Option<&T> {
        match self {
            Resource::Success(data) => Some(data),
            _ => None,
        }
    }
}

impl<T, E> Default for Resource<T, E> {
    fn default() -> Self {
        Resource::NotAsked
    }
}

impl<T, E> From<Result<T, E>> for Resource<T, E> {
    fn from(result: Result<T, E>) -> Self {
        Resource::from_result(result)
    }
}
