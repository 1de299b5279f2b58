use crate::Result;

/// the media host trait for external object stores
///
/// Clients upload binaries straight to the host and hand the resulting
/// urls to this service; the service only persists and returns urls.
#[async_trait::async_trait]
pub trait MediaHost {
    /// notify the host that a url was detached so the asset can be reclaimed
    async fn discard(&self, url: &str) -> Result<()>;
}

/// host whose assets are managed entirely by the uploader
#[derive(Debug, Default)]
pub struct UnmanagedHost;

#[async_trait::async_trait]
impl MediaHost for UnmanagedHost {
    async fn discard(&self, _url: &str) -> Result<()> {
        Ok(())
    }
}
