/// Errors that can occur in the transport layer.
///
/// The adapter never hands these to the sync core: a failed send is
/// logged and counted, then forgotten.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// There is no live connection to send on.
    #[error("not connected")]
    NotConnected,

    /// The connection was closed while sending.
    #[error("connection closed: {0}")]
    ConnectionClosed(String),

    /// Sending data failed.
    #[error("send failed: {0}")]
    SendFailed(#[source] std::io::Error),
}
