// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use tempfile::tempdir;
use tokio::net::TcpStream;
use tokio::time::sleep;

use crate::error::Fallible;

/// Creates a temporary directory that outlives the test that made it.
pub fn create_tmp_directory() -> Fallible<PathBuf> {
    let dir: PathBuf = tempdir()?.keep();
    Ok(dir.canonicalize()?)
}

/// Blocks until something is listening on `addr`.
pub async fn wait_for_listener(addr: SocketAddr) {
    loop {
        if let Ok(stream) = TcpStream::connect(addr).await {
            drop(stream);
            break;
        }
        sleep(Duration::from_millis(1)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tmp_directory() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        assert!(dir.is_dir());
        Ok(())
    }
}
