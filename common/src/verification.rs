use futures_util::StreamExt;
use serde::de::DeserializeOwned;

use crate::inner_error::Result;

/// Reads the collection back through `T` so that stored records which no longer
/// deserialize are reported at startup. With `all` unset only the first record
/// is checked.
pub async fn verify<T>(collection: &mongodb::Collection<T>, all: bool) -> Result<usize>
where
    T: DeserializeOwned + Unpin + Send + Sync,
{
    let mut cursor = collection.find(None, None).await?;

    let mut checked = 0;
    while let Some(value) = cursor.next().await {
        let _ = value?;
        checked += 1;
        if !all {
            break;
        }
    }

    log::info!(
        "Verified {} record(s) in collection {}",
        checked,
        collection.name()
    );
    Ok(checked)
}
