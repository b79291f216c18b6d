//! Location of the shard files making up the dataset.
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory used when no layout is given, relative to the working directory.
pub const DEFAULT_ROOT: &str = "cifar-10/cifar-10-batches-bin";

pub const TRAINING_FILES: [&str; 5] = [
    "data_batch_1.bin",
    "data_batch_2.bin",
    "data_batch_3.bin",
    "data_batch_4.bin",
    "data_batch_5.bin",
];

pub const TEST_FILE: &str = "test_batch.bin";

/// Training shards, decoded in order, and the test shard.
///
/// A layout can be written as json, e.g.
///
/// ```json
/// {
///   "training": ["data/data_batch_1.bin", "data/data_batch_2.bin"],
///   "test": "data/test_batch.bin"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardLayout {
    pub training: Vec<PathBuf>,
    pub test: PathBuf,
}

impl ShardLayout {
    /// The standard `data_batch_{1..5}.bin` and `test_batch.bin` files inside `root`.
    pub fn from_root<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Self {
            training: TRAINING_FILES.iter().map(|f| root.join(f)).collect(),
            test: root.join(TEST_FILE),
        }
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read(path).map_err(|err| Error::from(err).with_path(path))?;
        let layout =
            serde_json::from_slice(&contents).map_err(|err| Error::from(err).with_path(path))?;
        Ok(layout)
    }
}

impl Default for ShardLayout {
    fn default() -> Self {
        Self::from_root(DEFAULT_ROOT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_files() {
        let layout = ShardLayout::from_root("/data");
        assert_eq!(layout.training.len(), 5);
        assert_eq!(layout.training[0], Path::new("/data/data_batch_1.bin"));
        assert_eq!(layout.training[4], Path::new("/data/data_batch_5.bin"));
        assert_eq!(layout.test, Path::new("/data/test_batch.bin"));
        assert_eq!(
            ShardLayout::default().test,
            Path::new("cifar-10/cifar-10-batches-bin/test_batch.bin")
        );
    }

    #[test]
    fn json_layout() -> Result<()> {
        let layout: ShardLayout =
            serde_json::from_str(r#"{"training": ["a.bin", "b.bin"], "test": "t.bin"}"#)?;
        assert_eq!(layout.training, [PathBuf::from("a.bin"), PathBuf::from("b.bin")]);
        assert_eq!(layout.test, PathBuf::from("t.bin"));
        Ok(())
    }
}
