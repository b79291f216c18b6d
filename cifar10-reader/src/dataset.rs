//! The decoded CIFAR-10 dataset.
use crate::container::Container;
use crate::image::Image3d;

/// Number of distinct labels in CIFAR-10.
pub const LABEL_COUNT: usize = 10;

/// Class names indexed by label, as listed in `batches.meta.txt`.
pub const CLASS_NAMES: [&str; LABEL_COUNT] = [
    "airplane",
    "automobile",
    "bird",
    "cat",
    "deer",
    "dog",
    "frog",
    "horse",
    "ship",
    "truck",
];

pub fn class_name(label: u8) -> Option<&'static str> {
    CLASS_NAMES.get(label as usize).copied()
}

/// Training and test images with their labels.
///
/// Images and labels of the same split always have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cifar10Dataset<Images, Labels> {
    pub training_images: Images,
    pub training_labels: Labels,
    pub test_images: Images,
    pub test_labels: Labels,
}

/// Flat images, one `Vec<P>` of 3072 values per image.
pub type FlatDataset<P = u8, L = u8> = Cifar10Dataset<Vec<Vec<P>>, Vec<L>>;

/// Images with a (3, 32, 32) shape.
pub type Dataset3d<P = u8, L = u8> = Cifar10Dataset<Vec<Image3d<P>>, Vec<L>>;

impl<Images: Container, Labels: Container> Cifar10Dataset<Images, Labels> {
    pub fn training_len(&self) -> usize {
        self.training_images.len()
    }

    pub fn test_len(&self) -> usize {
        self.test_images.len()
    }

    /// Shrinks the training split to `new_size` elements, does nothing if it is not larger.
    pub fn resize_training(&mut self, new_size: usize) {
        if self.training_images.len() > new_size {
            self.training_images.truncate(new_size);
            self.training_labels.truncate(new_size);
        }
    }

    /// Shrinks the test split to `new_size` elements, does nothing if it is not larger.
    pub fn resize_test(&mut self, new_size: usize) {
        if self.test_images.len() > new_size {
            self.test_images.truncate(new_size);
            self.test_labels.truncate(new_size);
        }
    }
}

#[cfg(feature = "tensor")]
mod tensor {
    use super::Cifar10Dataset;
    use crate::image::Image;
    use crate::shard::{CHANNELS, HEIGHT, WIDTH};
    use candle::{Device, Result, Tensor, WithDType};

    /// The dataset as stacked tensors, images have a `(n, 3, 32, 32)` shape and labels `(n,)`.
    pub struct TensorDataset {
        pub train_images: Tensor,
        pub train_labels: Tensor,
        pub test_images: Tensor,
        pub test_labels: Tensor,
        pub labels: usize,
    }

    fn images_tensor<'a, I, P>(images: I, device: &Device) -> Result<Tensor>
    where
        I: ExactSizeIterator<Item = &'a [P]>,
        P: WithDType,
    {
        let samples = images.len();
        let mut data = Vec::with_capacity(samples * CHANNELS * HEIGHT * WIDTH);
        for image in images {
            data.extend_from_slice(image)
        }
        Tensor::from_vec(data, (samples, CHANNELS, HEIGHT, WIDTH), device)
    }

    fn labels_tensor<'a, I, L>(labels: I, device: &Device) -> Result<Tensor>
    where
        I: ExactSizeIterator<Item = &'a L>,
        L: WithDType,
    {
        let samples = labels.len();
        Tensor::from_vec(labels.copied().collect::<Vec<_>>(), samples, device)
    }

    impl<Img, L> Cifar10Dataset<Vec<Img>, Vec<L>>
    where
        Img: Image,
        Img::Pixel: WithDType,
        L: WithDType,
    {
        /// Copies the dataset into tensors on `device`, values are kept as is.
        pub fn to_tensors(&self, device: &Device) -> Result<TensorDataset> {
            let train_images =
                images_tensor(self.training_images.iter().map(|i| i.as_slice()), device)?;
            let test_images = images_tensor(self.test_images.iter().map(|i| i.as_slice()), device)?;
            Ok(TensorDataset {
                train_images,
                train_labels: labels_tensor(self.training_labels.iter(), device)?,
                test_images,
                test_labels: labels_tensor(self.test_labels.iter(), device)?,
                labels: super::LABEL_COUNT,
            })
        }
    }
}

#[cfg(feature = "tensor")]
pub use tensor::TensorDataset;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn dataset(n: usize) -> FlatDataset {
        Cifar10Dataset {
            training_images: (0..n).map(|i| vec![i as u8; 4]).collect(),
            training_labels: (0..n).map(|i| i as u8).collect(),
            test_images: (0..n).map(|i| vec![i as u8; 4]).collect(),
            test_labels: (0..n).map(|i| i as u8).collect(),
        }
    }

    #[test]
    fn resize_is_shrink_only() {
        let mut ds = dataset(5);
        ds.resize_training(5);
        ds.resize_training(9);
        assert_eq!(ds, dataset(5));

        ds.resize_training(2);
        assert_eq!(ds.training_len(), 2);
        assert_eq!(ds.training_labels, [0, 1]);
        assert_eq!(ds.training_images[1], [1, 1, 1, 1]);
        assert_eq!(ds.test_len(), 5);

        ds.resize_test(0);
        assert_eq!(ds.test_len(), 0);
        assert!(ds.test_labels.is_empty());
    }

    #[test]
    fn resize_deque() {
        let mut ds: Cifar10Dataset<VecDeque<Vec<u8>>, VecDeque<u8>> = Cifar10Dataset::default();
        ds.test_images.extend([vec![1], vec![2], vec![3]]);
        ds.test_labels.extend([1, 2, 3]);
        ds.resize_test(1);
        assert_eq!(ds.test_labels, [1]);
        assert_eq!(ds.test_images.len(), 1);
    }

    #[cfg(feature = "tensor")]
    #[test]
    fn to_tensors() -> candle::Result<()> {
        use crate::image::flat_image;
        use crate::shard::PIXELS_PER_IMAGE;
        use candle::Device;

        let image = |v: f32| {
            let mut img = flat_image::<f32>();
            img.iter_mut().enumerate().for_each(|(k, p)| *p = v + (k % 3) as f32);
            img
        };
        let ds: FlatDataset<f32, u8> = Cifar10Dataset {
            training_images: vec![image(10.), image(200.)],
            training_labels: vec![3, 7],
            test_images: vec![image(100.)],
            test_labels: vec![9],
        };
        let t = ds.to_tensors(&Device::Cpu)?;
        assert_eq!(t.train_images.dims(), [2, 3, 32, 32]);
        assert_eq!(t.test_images.dims(), [1, 3, 32, 32]);
        assert_eq!(t.train_labels.to_vec1::<u8>()?, [3, 7]);
        assert_eq!(t.test_labels.to_vec1::<u8>()?, [9]);
        assert_eq!(t.labels, LABEL_COUNT);

        let train = t.train_images.flatten_all()?.to_vec1::<f32>()?;
        assert_eq!(&train[..3], [10., 11., 12.]);
        assert_eq!(train[PIXELS_PER_IMAGE], 200.);
        assert_eq!(train[PIXELS_PER_IMAGE + 2], 202.);
        let test = t.test_images.flatten_all()?.to_vec1::<f32>()?;
        assert_eq!(test.len(), PIXELS_PER_IMAGE);
        assert_eq!(&test[..3], [100., 101., 102.]);
        Ok(())
    }

    #[test]
    fn class_names() {
        assert_eq!(class_name(0), Some("airplane"));
        assert_eq!(class_name(9), Some("truck"));
        assert_eq!(class_name(10), None);
    }
}
