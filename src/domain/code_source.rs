//! Source of candidate short codes.

/// Produces candidate short codes for link issuance.
///
/// Implementations are pure generators: they never consult the link store, so
/// a returned code may already be taken. Uniqueness is enforced by the store's
/// insert-if-absent operation and the bounded retry loop in
/// [`crate::application::services::LinkService::shorten`].
///
/// # Implementations
///
/// - [`crate::utils::code_generator::RandomCodeGenerator`] - CSPRNG-backed generator
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait CodeSource: Send + Sync {
    /// Returns a new candidate code.
    fn generate(&self) -> String;
}
