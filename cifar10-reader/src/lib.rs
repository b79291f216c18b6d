//! Reader for the binary version of the CIFAR-10 dataset.
//!
//! ```no_run
//! use cifar10_reader::{read_dataset, ShardLayout};
//! # fn main() -> cifar10_reader::Result<()> {
//!
//! let layout = ShardLayout::from_root("cifar-10/cifar-10-batches-bin");
//! // At most 100 records from each of the five training shards, the whole test shard.
//! let mut dataset = read_dataset::<f32, u8>(&layout, 100, 0)?;
//! assert!(dataset.training_len() <= 500);
//! dataset.resize_training(256);
//! # Ok(())}
//! ```
//!
//! Images and labels are decoded into any [`Container`], images are built by a factory
//! function so that both flat images (`Vec<P>`) and (3, 32, 32) [`Image3d`] images can be
//! filled. Pixel and label values can be of any type implementing `From<u8>`.
pub mod container;
pub mod dataset;
mod error;
pub mod image;
pub mod layout;
pub mod reader;
pub mod shard;

pub use container::Container;
pub use dataset::{class_name, Cifar10Dataset, Dataset3d, FlatDataset, LABEL_COUNT};
#[cfg(feature = "tensor")]
pub use dataset::TensorDataset;
pub use error::{Error, Result};
pub use image::{flat_image, image_3d, Image, Image3d};
pub use layout::ShardLayout;
pub use reader::{
    load_dir, read_dataset, read_dataset_3d, read_dataset_3d_split, read_dataset_3d_with,
    read_dataset_direct, read_test, read_training,
};
pub use shard::{decode_shard_bytes, read_shard};
