use async_trait::async_trait;

/// Chat platform that receives finished posters
#[async_trait]
pub trait DeliveryPort: Send + Sync {
    /// Send one photo with a caption to a chat
    ///
    /// Returns `true` only when the platform accepted the photo. Implementations
    /// make a single attempt and never return an error; failures are logged.
    async fn deliver(
        &self,
        chat_id: &str,
        image_bytes: Vec<u8>,
        filename: &str,
        caption: &str,
    ) -> bool;
}
