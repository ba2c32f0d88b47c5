use std::path::Path;

use tokio::io::AsyncBufReadExt;

async fn read_file_lines(path: impl AsRef<Path>) -> eyre::Result<Vec<String>> {
    let file = tokio::fs::read(path).await?;
    let mut lines = file.lines();

    let mut contents = vec![];
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if !line.is_empty() {
            contents.push(line.to_owned());
        }
    }

    Ok(contents)
}

/// Reads `path` as a list, logging and returning an empty list when the
/// file is missing or unreadable.
async fn read_list(path: &Path, kind: &str) -> Vec<String> {
    match read_file_lines(path).await {
        Ok(items) => {
            log::info!("Loaded {} {kind} from {}", items.len(), path.display());
            items
        }
        Err(e) => {
            log::error!("Failed to read {kind} file {}: {e}", path.display());
            vec![]
        }
    }
}

pub async fn read_addresses(path: impl AsRef<Path>) -> Vec<String> {
    read_list(path.as_ref(), "addresses").await
}

pub async fn read_proxies(path: impl AsRef<Path>) -> Vec<String> {
    read_list(path.as_ref(), "proxies").await
}
