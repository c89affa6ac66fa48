#[macro_export]
macro_rules! impl_store {
    ($($name:ty),+ $(,)?) => ($(
        #[async_trait::async_trait]
        impl $crate::store::Store for $name {
            async fn new() -> anyhow::Result<Self> {
                let path = <Self as $crate::store::Storable>::path()?;

                <Self as $crate::store::Store>::load_from(&path).await
            }

            async fn save(&self) -> anyhow::Result<Self> {
                let path = <Self as $crate::store::Storable>::path()?;

                <Self as $crate::store::Store>::save_to(self, &path).await
            }

            async fn load_from(path: &std::path::Path) -> anyhow::Result<Self> {
                use anyhow::Context as _;
                use tokio::io::AsyncReadExt as _;

                if tokio::fs::metadata(path).await.is_err() {
                    return <Self as $crate::store::Store>::save_to(&Self::default(), path).await;
                }

                let mut file = tokio::fs::File::open(path)
                    .await
                    .context("Error opening file")?;

                let mut buffer = String::new();
                file.read_to_string(&mut buffer).await?;

                serde_json::from_str(&buffer).context("Failed to deserialize")
            }

            async fn save_to(&self, path: &std::path::Path) -> anyhow::Result<Self> {
                use anyhow::Context as _;
                use tokio::io::AsyncWriteExt as _;

                tokio::fs::create_dir_all(path.parent().context("Failed to get store directory")?)
                    .await
                    .context("Failed to create store directory")?;

                let mut file = tokio::fs::File::create(path)
                    .await
                    .context("Error opening file")?;

                file.write_all(
                    serde_json::to_string(&self)
                        .context("Failed to serialize")?
                        .as_bytes(),
                )
                .await
                .context("Failed to write store")?;

                log::debug!("Saved store to {}", path.display());

                Ok(self.clone())
            }
        }
    )+)
}
