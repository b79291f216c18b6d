//! Decoding of a single CIFAR-10 binary shard.
//!
//! A shard is a plain concatenation of fixed size records, each record being one label byte
//! followed by the 3072 pixel bytes of a 32x32 RGB image stored channel by channel. There is no
//! header, the whole file is read in memory before decoding.
use crate::container::Container;
use crate::image::Image;
use crate::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const WIDTH: usize = 32;
pub const HEIGHT: usize = 32;
pub const CHANNELS: usize = 3;
pub const LABEL_BYTES: usize = 1;
pub const PIXELS_PER_IMAGE: usize = WIDTH * HEIGHT * CHANNELS;
pub const RECORD_BYTES: usize = LABEL_BYTES + PIXELS_PER_IMAGE;
pub const RECORDS_PER_SHARD: usize = 10000;

/// Number of records decoded for a given limit, `0` or anything above the shard size means the
/// whole shard.
pub fn record_count(limit: usize) -> usize {
    if limit > 0 && limit < RECORDS_PER_SHARD {
        limit
    } else {
        RECORDS_PER_SHARD
    }
}

/// Decodes the records held in `data`, appending the labels and images to the output
/// sequences.
///
/// Each image is built with `image_fn` and must expose exactly [`PIXELS_PER_IMAGE`] slots, pixel
/// `k` of record `i` is taken from byte `i * RECORD_BYTES + 1 + k`. The outputs are left
/// untouched when an error is returned. Returns the number of records appended.
pub fn decode_shard_bytes<Images, Labels, F>(
    data: &[u8],
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
    let records = record_count(limit);
    let expected = records * RECORD_BYTES;
    if data.len() < expected {
        return Err(Error::MalformedShard {
            len: data.len(),
            expected,
            records,
        });
    }

    let image_start = images.len();
    let label_start = labels.len();
    images.reserve(records);
    labels.resize_with(label_start + records, || 0u8.into());

    for (index, record) in data[..expected].chunks_exact(RECORD_BYTES).enumerate() {
        labels.set(label_start + index, record[0].into());
        let mut image = image_fn();
        if image.len() != PIXELS_PER_IMAGE {
            images.truncate(image_start);
            labels.truncate(label_start);
            return Err(Error::ImageSize {
                expected: PIXELS_PER_IMAGE,
                got: image.len(),
            });
        }
        for (k, &byte) in record[LABEL_BYTES..].iter().enumerate() {
            image.set_pixel(k, byte.into())
        }
        images.push(image);
    }
    Ok(records)
}

/// Reads the shard at `path` and decodes it with [`decode_shard_bytes`].
///
/// Fails with [`Error::ShardOpen`] when the file cannot be opened or read, e.g. when the path
/// is a directory, in which case nothing is appended to the outputs.
pub fn read_shard<P, Images, Labels, F>(
    path: P,
    limit: usize,
    image_fn: F,
    images: &mut Images,
    labels: &mut Labels,
) -> Result<usize>
where
    P: AsRef<Path>,
    Images: Container,
    Images::Item: Image,
    <Images::Item as Image>::Pixel: From<u8>,
    Labels: Container,
    Labels::Item: From<u8>,
    F: FnMut() -> Images::Item,
{
    let path = path.as_ref();
    let shard_open = |source: std::io::Error| Error::ShardOpen {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(shard_open)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data).map_err(shard_open)?;
    let records = decode_shard_bytes(&data, limit, image_fn, images, labels)
        .map_err(|err| err.with_path(path))?;
    tracing::debug!(?path, records, len = data.len(), "decoded shard");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{flat_image, image_3d, Image3d};

    fn records(n: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(n * RECORD_BYTES);
        for i in 0..n {
            data.push((i % 10) as u8);
            data.extend((0..PIXELS_PER_IMAGE).map(|k| ((i + k) % 256) as u8));
        }
        data
    }

    #[test]
    fn clamp_limit() {
        assert_eq!(record_count(0), RECORDS_PER_SHARD);
        assert_eq!(record_count(1), 1);
        assert_eq!(record_count(9999), 9999);
        assert_eq!(record_count(10000), RECORDS_PER_SHARD);
        assert_eq!(record_count(123456), RECORDS_PER_SHARD);
    }

    #[test]
    fn byte_mapping() -> Result<()> {
        let data = records(3);
        let mut images: Vec<Vec<u8>> = vec![];
        let mut labels: Vec<u8> = vec![];
        let n = decode_shard_bytes(&data, 3, flat_image::<u8>, &mut images, &mut labels)?;
        assert_eq!(n, 3);
        assert_eq!(labels, [0, 1, 2]);
        for (i, image) in images.iter().enumerate() {
            assert_eq!(image.len(), PIXELS_PER_IMAGE);
            for (k, &pixel) in image.iter().enumerate() {
                assert_eq!(pixel, data[i * RECORD_BYTES + 1 + k]);
            }
        }

        let mut cubes: Vec<Image3d<f32>> = vec![];
        let mut labels: Vec<u32> = vec![];
        decode_shard_bytes(&data, 3, image_3d::<f32>, &mut cubes, &mut labels)?;
        assert_eq!(labels, [0, 1, 2]);
        assert_eq!(*cubes[2].get(0, 0, 0), 2.);
        assert_eq!(*cubes[2].get(1, 0, 3), ((2 + 1024 + 3) % 256) as f32);
        Ok(())
    }

    #[test]
    fn appends_after_existing() -> Result<()> {
        let data = records(4);
        let mut images: Vec<Vec<u8>> = vec![vec![0; PIXELS_PER_IMAGE]];
        let mut labels: Vec<u8> = vec![42];
        decode_shard_bytes(&data, 2, flat_image::<u8>, &mut images, &mut labels)?;
        assert_eq!(labels, [42, 0, 1]);
        assert_eq!(images.len(), 3);
        assert_eq!(images[2][0], 1);
        Ok(())
    }

    #[test]
    fn short_buffer() {
        let data = records(2);
        let mut images: Vec<Vec<u8>> = vec![];
        let mut labels: Vec<u8> = vec![];
        let err = decode_shard_bytes(&data[..RECORD_BYTES + 5], 2, flat_image::<u8>, &mut images, &mut labels)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedShard {
                len: 3078,
                expected: 6146,
                records: 2
            }
        ));
        assert!(images.is_empty());
        assert!(labels.is_empty());
    }

    #[test]
    fn wrong_image_size_rolls_back() {
        let data = records(2);
        let mut images: Vec<Vec<u8>> = vec![vec![1; PIXELS_PER_IMAGE]];
        let mut labels: Vec<u8> = vec![7];
        let err = decode_shard_bytes(&data, 2, || vec![0u8; 16], &mut images, &mut labels)
            .unwrap_err();
        assert!(matches!(err, Error::ImageSize { expected: 3072, got: 16 }));
        assert_eq!(images.len(), 1);
        assert_eq!(labels, [7]);
    }

    #[test]
    fn unreadable_shard() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut images: Vec<Vec<u8>> = vec![];
        let mut labels: Vec<u8> = vec![];
        let err = read_shard(dir.path(), 1, flat_image::<u8>, &mut images, &mut labels)
            .unwrap_err();
        assert!(err.is_shard_open());
        let err = read_shard(
            dir.path().join("missing.bin"),
            1,
            flat_image::<u8>,
            &mut images,
            &mut labels,
        )
        .unwrap_err();
        assert!(err.is_shard_open());
        assert!(images.is_empty());
        assert!(labels.is_empty());
        Ok(())
    }
}
