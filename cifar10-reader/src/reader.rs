//! Assembling the dataset from its shards.
//!
//! The files can be downloaded from the following page:
//! <https://www.cs.toronto.edu/~kriz/cifar.html>
//! The binary version of the dataset is used.
//!
//! Limits apply to each shard separately, reading the training split with a limit of 100 gives
//! 500 records. A limit of 0 reads whole shards. Shards that cannot be opened are skipped with a
//! warning, so callers should check the lengths of the returned splits when a partial load
//! matters.
use crate::container::Container;
use crate::dataset::{Cifar10Dataset, Dataset3d, FlatDataset};
use crate::image::{flat_image, image_3d, Image};
use crate::layout::ShardLayout;
use crate::shard::read_shard;
use crate::Result;
use std::path::Path;

fn read_or_skip<Images, Labels, F>(
    path: &Path,
    limit: usize,
    image_fn: F,
    images: &mut Images,
    labels: &mut Labels,
) -> Result<usize>
where
    Images: Container,
    Images::Item: Image,
    <Images::Item as Image>::Pixel: From<u8>,
    Labels: Container,
    Labels::Item: From<u8>,
    F: FnMut() -> Images::Item,
{
    match read_shard(path, limit, image_fn, images, labels) {
        Ok(records) => Ok(records),
        Err(err) if err.is_shard_open() => {
            tracing::warn!("skipping shard: {err}");
            Ok(0)
        }
        Err(err) => Err(err),
    }
}

/// Appends the training shards of `layout`, in order, to `images` and `labels`. Returns the
/// number of records read.
pub fn read_training<Images, Labels, F>(
    layout: &ShardLayout,
    limit: usize,
    mut image_fn: F,
    images: &mut Images,
    labels: &mut Labels,
) -> Result<usize>
where
    Images: Container,
    Images::Item: Image,
    <Images::Item as Image>::Pixel: From<u8>,
    Labels: Container,
    Labels::Item: From<u8>,
    F: FnMut() -> Images::Item,
{
    let mut records = 0;
    for path in layout.training.iter() {
        records += read_or_skip(path, limit, &mut image_fn, images, labels)?;
    }
    Ok(records)
}

/// Appends the test shard of `layout` to `images` and `labels`.
pub fn read_test<Images, Labels, F>(
    layout: &ShardLayout,
    limit: usize,
    image_fn: F,
    images: &mut Images,
    labels: &mut Labels,
) -> Result<usize>
where
    Images: Container,
    Images::Item: Image,
    <Images::Item as Image>::Pixel: From<u8>,
    Labels: Container,
    Labels::Item: From<u8>,
    F: FnMut() -> Images::Item,
{
    read_or_skip(&layout.test, limit, image_fn, images, labels)
}

/// Reads both splits, building every image with `image_fn`.
pub fn read_dataset_direct<Images, Labels, F>(
    layout: &ShardLayout,
    training_limit: usize,
    test_limit: usize,
    mut image_fn: F,
) -> Result<Cifar10Dataset<Images, Labels>>
where
    Images: Container,
    Images::Item: Image,
    <Images::Item as Image>::Pixel: From<u8>,
    Labels: Container,
    Labels::Item: From<u8>,
    F: FnMut() -> Images::Item,
{
    let mut dataset = Cifar10Dataset::<Images, Labels>::default();
    read_training(
        layout,
        training_limit,
        &mut image_fn,
        &mut dataset.training_images,
        &mut dataset.training_labels,
    )?;
    read_test(
        layout,
        test_limit,
        &mut image_fn,
        &mut dataset.test_images,
        &mut dataset.test_labels,
    )?;
    Ok(dataset)
}

/// Reads the dataset for images built by `image_fn`, usually 3 dimensional ones.
///
/// The test shard is appended to the *training* split, read with `training_limit`, and the
/// test split is left empty. Existing users of this loader rely on that layout, a warning is
/// emitted on every call as it is most likely not what new code wants: use
/// [`read_dataset_3d_split`] or [`read_dataset_direct`] to get a separate test split.
pub fn read_dataset_3d_with<Images, Labels, F>(
    layout: &ShardLayout,
    training_limit: usize,
    mut image_fn: F,
) -> Result<Cifar10Dataset<Images, Labels>>
where
    Images: Container,
    Images::Item: Image,
    <Images::Item as Image>::Pixel: From<u8>,
    Labels: Container,
    Labels::Item: From<u8>,
    F: FnMut() -> Images::Item,
{
    tracing::warn!(
        test = ?layout.test,
        "3d loader appends the test shard to the training split, the test split stays empty"
    );
    let mut dataset = Cifar10Dataset::<Images, Labels>::default();
    read_training(
        layout,
        training_limit,
        &mut image_fn,
        &mut dataset.training_images,
        &mut dataset.training_labels,
    )?;
    read_test(
        layout,
        training_limit,
        &mut image_fn,
        &mut dataset.training_images,
        &mut dataset.training_labels,
    )?;
    Ok(dataset)
}

/// Reads the dataset with flat images of `P` values and labels of type `L`.
pub fn read_dataset<P, L>(
    layout: &ShardLayout,
    training_limit: usize,
    test_limit: usize,
) -> Result<FlatDataset<P, L>>
where
    P: From<u8> + Default + Clone,
    L: From<u8>,
{
    read_dataset_direct(layout, training_limit, test_limit, flat_image::<P>)
}

/// Reads the dataset with (3, 32, 32) images, see [`read_dataset_3d_with`] for where the test
/// shard ends up.
pub fn read_dataset_3d<P, L>(layout: &ShardLayout, training_limit: usize) -> Result<Dataset3d<P, L>>
where
    P: From<u8> + Default + Clone,
    L: From<u8>,
{
    read_dataset_3d_with(layout, training_limit, image_3d::<P>)
}

/// Reads the dataset with (3, 32, 32) images, keeping the test shard in the test split.
pub fn read_dataset_3d_split<P, L>(
    layout: &ShardLayout,
    training_limit: usize,
    test_limit: usize,
) -> Result<Dataset3d<P, L>>
where
    P: From<u8> + Default + Clone,
    L: From<u8>,
{
    read_dataset_direct(layout, training_limit, test_limit, image_3d::<P>)
}

/// Reads the whole dataset from the standard files in `dir`, with flat `u8` images.
pub fn load_dir<T: AsRef<Path>>(dir: T) -> Result<FlatDataset> {
    read_dataset(&ShardLayout::from_root(dir), 0, 0)
}
